//! # Invoice Totals
//!
//! Line items and the subtotal / tax / discount / total calculation shared by
//! invoices and proposals.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items ──► Σ quantity × unit_amount ──► subtotal                       │
//! │                                             │                           │
//! │                   tax = round(subtotal × pct / 100) (half away from 0) │
//! │                                             │                           │
//! │            total = max(0, subtotal + tax − discount)                   │
//! │                                                                         │
//! │  A discount bigger than what is owed yields total 0 ("fully           │
//! │  discounted"), never a negative bill.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculation functions accept any input, including negative
//! quantities. Use [`crate::validation`] to reject those before saving.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::ids::new_entity_id;
use crate::money::Money;
use crate::types::TaxRate;
use crate::validation::{
    validate_line_items, validate_non_negative_amount, validate_required, validate_tax_rate,
};
use crate::workflow::InvoiceStatus;

// =============================================================================
// Line Item
// =============================================================================

/// A priced, quantified entry on an invoice or proposal draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unique within its list.
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_amount_cents: i64,
}

impl LineItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: i64,
        unit_amount_cents: i64,
    ) -> Self {
        LineItem {
            id: id.into(),
            name: name.into(),
            quantity,
            unit_amount_cents,
        }
    }

    #[inline]
    pub fn unit_amount(&self) -> Money {
        Money::from_cents(self.unit_amount_cents)
    }

    /// `unit_amount × quantity`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_amount().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Derived totals for a list of line items. Recomputed, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
}

impl Totals {
    /// Assembles totals from an already-known tax amount.
    ///
    /// Proposals enter tax as a flat amount rather than a rate; the clamp is
    /// the same as for invoices.
    pub fn from_parts(subtotal: Money, tax: Money, discount: Money) -> Self {
        Totals {
            subtotal,
            tax,
            discount,
            total: (subtotal + tax - discount).clamp_non_negative(),
        }
    }

    /// True when the discount swallowed everything owed.
    pub fn is_fully_discounted(&self) -> bool {
        self.total.is_zero() && !(self.subtotal + self.tax).is_zero()
    }
}

/// Inputs for [`calculate_invoice_totals`]; rate and discount default to 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotalsInput {
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub tax_rate: TaxRate,
    #[serde(default)]
    pub discount: Money,
}

impl InvoiceTotalsInput {
    pub fn new(items: Vec<LineItem>) -> Self {
        InvoiceTotalsInput {
            items,
            ..Default::default()
        }
    }

    pub fn with_tax_rate(mut self, rate: TaxRate) -> Self {
        self.tax_rate = rate;
        self
    }

    pub fn with_discount(mut self, discount: Money) -> Self {
        self.discount = discount;
        self
    }

    pub fn totals(&self) -> Totals {
        calculate_invoice_totals(&self.items, self.tax_rate, self.discount)
    }
}

/// Sum over items of `quantity × unit_amount_cents`.
///
/// Negative quantities are not rejected here; they reduce the subtotal.
pub fn calculate_subtotal_cents(items: &[LineItem]) -> i64 {
    items.iter().map(LineItem::line_total).sum::<Money>().cents()
}

/// Computes subtotal, tax, discount and the zero-clamped total.
///
/// ```rust
/// use devnetiks_core::invoice::{calculate_invoice_totals, LineItem};
/// use devnetiks_core::money::Money;
/// use devnetiks_core::types::TaxRate;
///
/// let items = vec![
///     LineItem::new("a", "Design", 2, 2000),
///     LineItem::new("b", "Hosting", 1, 500),
/// ];
/// let rate = TaxRate::from_percentage(10.0);
/// let totals = calculate_invoice_totals(&items, rate, Money::from_cents(100));
/// assert_eq!(totals.subtotal.cents(), 4500);
/// assert_eq!(totals.tax.cents(), 450);
/// assert_eq!(totals.total.cents(), 4850);
/// ```
pub fn calculate_invoice_totals(
    items: &[LineItem],
    tax_rate: TaxRate,
    discount: Money,
) -> Totals {
    let subtotal = Money::from_cents(calculate_subtotal_cents(items));
    let tax = subtotal.calculate_tax(tax_rate);
    Totals::from_parts(subtotal, tax, discount)
}

// =============================================================================
// Invoice Draft → Record
// =============================================================================

/// An invoice as edited in the admin form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub org_id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub tax_rate: TaxRate,
    #[serde(default)]
    pub discount: Money,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl InvoiceDraft {
    /// Checks the draft is fit to become a record.
    pub fn validate(&self) -> CoreResult<()> {
        validate_required("organization", &self.org_id)?;
        validate_line_items(&self.items)?;
        validate_tax_rate(self.tax_rate)?;
        validate_non_negative_amount("discount", self.discount)?;
        Ok(())
    }

    pub fn totals(&self) -> Totals {
        calculate_invoice_totals(&self.items, self.tax_rate, self.discount)
    }

    /// Validates and converts into an unpaid invoice record.
    pub fn into_record(self, issued_at: DateTime<Utc>) -> CoreResult<InvoiceRecord> {
        self.validate()?;
        let totals = self.totals();
        Ok(InvoiceRecord {
            id: new_entity_id("invoices"),
            org_id: self.org_id,
            project_id: self.project_id,
            items: self.items,
            tax_rate: self.tax_rate,
            subtotal_cents: totals.subtotal.cents(),
            tax_cents: totals.tax.cents(),
            discount_cents: totals.discount.cents(),
            total_cents: totals.total.cents(),
            status: InvoiceStatus::Unpaid,
            issued_at,
            due_date: self.due_date,
        })
    }
}

/// The shape written to the `invoices` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: String,
    pub org_id: String,
    pub project_id: Option<String>,
    pub items: Vec<LineItem>,
    #[ts(type = "number")]
    pub tax_rate: TaxRate,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub status: InvoiceStatus,
    #[ts(as = "String")]
    pub issued_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub due_date: Option<DateTime<Utc>>,
}

impl InvoiceRecord {
    /// Totals as stored on the record.
    pub fn totals(&self) -> Totals {
        Totals {
            subtotal: Money::from_cents(self.subtotal_cents),
            tax: Money::from_cents(self.tax_cents),
            discount: Money::from_cents(self.discount_cents),
            total: Money::from_cents(self.total_cents),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
