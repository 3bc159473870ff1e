//! # Proposals
//!
//! Turning an admin's response to a client quote into a proposal record.
//!
//! ## Quote Response Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Quote (new / reviewed / quoted)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProposalDraft { items, flat tax, discount, send_now }                 │
//! │       │  validate + Totals::from_parts (zero clamp)                    │
//! │       ▼                                                                 │
//! │  ProposalRecord { version n+1, Draft | Sent }  +  Quote → Quoted       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::ids::new_entity_id;
use crate::invoice::{calculate_subtotal_cents, LineItem, Totals};
use crate::money::Money;
use crate::validation::{validate_line_items, validate_non_negative_amount};
use crate::workflow::{ProposalStatus, QuoteStatus};

/// Version number for the next proposal on a quote (first is 1).
pub fn next_proposal_version(current: Option<u32>) -> u32 {
    current.unwrap_or(0).saturating_add(1)
}

/// Subtotal of a proposal's scope items.
pub fn proposal_subtotal(items: &[LineItem]) -> Money {
    Money::from_cents(calculate_subtotal_cents(items))
}

/// An admin's response to a quote, as entered in the respond form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDraft {
    pub quote_id: String,
    #[serde(default)]
    pub org_id: Option<String>,
    pub items: Vec<LineItem>,
    /// Tax as a flat amount, not a rate.
    #[serde(default)]
    pub tax: Money,
    #[serde(default)]
    pub discount: Money,
    #[serde(default)]
    pub send_now: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The shape written to the `proposals` collection.
///
/// Zero tax and zero discount are stored as absent, as the list views expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRecord {
    pub id: String,
    pub quote_id: String,
    pub org_id: Option<String>,
    pub version: u32,
    pub status: ProposalStatus,
    pub scope_items: Vec<LineItem>,
    pub subtotal: Money,
    pub discount: Option<Money>,
    pub tax: Option<Money>,
    pub total: Money,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Result of responding to a quote: the new proposal and the quote's new status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteResponse {
    pub proposal: ProposalRecord,
    pub quote_status: QuoteStatus,
}

impl ProposalDraft {
    pub fn totals(&self) -> Totals {
        Totals::from_parts(proposal_subtotal(&self.items), self.tax, self.discount)
    }

    /// Validates the draft against the quote's current state and builds the
    /// proposal record.
    ///
    /// `previous_version` is the highest version already attached to the
    /// quote, if any.
    pub fn respond(
        self,
        quote_status: QuoteStatus,
        previous_version: Option<u32>,
        created_at: DateTime<Utc>,
    ) -> CoreResult<QuoteResponse> {
        if !quote_status.accepts_response() {
            return Err(CoreError::QuoteNotRespondable {
                quote_id: self.quote_id,
                status: quote_status.to_string(),
            });
        }
        validate_line_items(&self.items)?;
        validate_non_negative_amount("tax", self.tax)?;
        validate_non_negative_amount("discount", self.discount)?;

        let totals = self.totals();
        let status = if self.send_now {
            ProposalStatus::Sent
        } else {
            ProposalStatus::Draft
        };
        let non_zero = |m: Money| (!m.is_zero()).then_some(m);

        Ok(QuoteResponse {
            proposal: ProposalRecord {
                id: new_entity_id("proposals"),
                quote_id: self.quote_id,
                org_id: self.org_id,
                version: next_proposal_version(previous_version),
                status,
                scope_items: self.items,
                subtotal: totals.subtotal,
                discount: non_zero(totals.discount),
                tax: non_zero(totals.tax),
                total: totals.total,
                notes: self.notes,
                created_at,
            },
            quote_status: QuoteStatus::Quoted,
        })
    }
}
