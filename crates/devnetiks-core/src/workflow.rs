//! # Workflow States
//!
//! Status enums for quotes, proposals, invoices, tickets and approvals, and
//! the pure transitions between them.
//!
//! ## Quote-to-Invoice Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Quote: New ──► Reviewed ──► Quoted ──► Accepted / Declined / Archived │
//! │                                │                                        │
//! │                                ▼                                        │
//! │  Proposal:            Draft ──► Sent ──► Accepted / Rejected / Expired │
//! │                                                                         │
//! │  Invoice:  Unpaid ──► Paid          PastDue ──► Paid                   │
//! │            Void, Refunded (terminal, untouched by payment)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Common Status
// =============================================================================

/// The shared status vocabulary used by list views and badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CommonStatus {
    Draft,
    Pending,
    Active,
    Approved,
    Rejected,
    Signed,
    Void,
    Paid,
    Unpaid,
    Overdue,
    Archived,
    Closed,
    Open,
}

impl CommonStatus {
    /// No further work is expected.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            CommonStatus::Signed
                | CommonStatus::Void
                | CommonStatus::Paid
                | CommonStatus::Rejected
                | CommonStatus::Archived
                | CommonStatus::Closed
        )
    }

    /// Still in progress.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            CommonStatus::Draft
                | CommonStatus::Pending
                | CommonStatus::Active
                | CommonStatus::Approved
                | CommonStatus::Open
        )
    }
}

// =============================================================================
// Quote Status
// =============================================================================

/// Status of a client intake quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    #[default]
    New,
    Reviewed,
    Quoted,
    Accepted,
    Declined,
    Archived,
}

impl QuoteStatus {
    /// Whether an admin may still send a (new version of a) proposal.
    pub fn accepts_response(&self) -> bool {
        matches!(
            self,
            QuoteStatus::New | QuoteStatus::Reviewed | QuoteStatus::Quoted
        )
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuoteStatus::New => "new",
            QuoteStatus::Reviewed => "reviewed",
            QuoteStatus::Quoted => "quoted",
            QuoteStatus::Accepted => "accepted",
            QuoteStatus::Declined => "declined",
            QuoteStatus::Archived => "archived",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Proposal Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

// =============================================================================
// Invoice Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Unpaid,
    Paid,
    PastDue,
    Void,
    Refunded,
}

impl InvoiceStatus {
    /// Status after a successful payment is recorded.
    ///
    /// Void and refunded invoices are left alone.
    pub fn next_on_payment(&self) -> InvoiceStatus {
        match self {
            InvoiceStatus::Unpaid | InvoiceStatus::PastDue | InvoiceStatus::Paid => {
                InvoiceStatus::Paid
            }
            other => *other,
        }
    }
}

// =============================================================================
// Support Tickets
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Waiting,
    Closed,
}

impl TicketStatus {
    /// Advances one step; `Closed` stays closed.
    pub fn next(&self) -> TicketStatus {
        match self {
            TicketStatus::Open => TicketStatus::InProgress,
            TicketStatus::InProgress => TicketStatus::Waiting,
            TicketStatus::Waiting | TicketStatus::Closed => TicketStatus::Closed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl TicketPriority {
    /// Response window in days.
    pub const fn response_days(&self) -> i64 {
        match self {
            TicketPriority::Low => 7,
            TicketPriority::Normal => 3,
            TicketPriority::High => 1,
            TicketPriority::Urgent => 0,
        }
    }

    /// When a ticket opened at `created_at` should be answered by.
    pub fn due_by(&self, created_at: DateTime<Utc>) -> DateTime<Utc> {
        created_at + Duration::days(self.response_days())
    }
}

// =============================================================================
// Approvals
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalState {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalDecision {
    Approve,
    Reject,
}

/// Applies a decision to a deliverable approval.
///
/// Only `Pending` moves; a decided approval keeps its state.
pub fn resolve_approval(current: ApprovalState, decision: ApprovalDecision) -> ApprovalState {
    if current != ApprovalState::Pending {
        return current;
    }
    match decision {
        ApprovalDecision::Approve => ApprovalState::Approved,
        ApprovalDecision::Reject => ApprovalState::Rejected,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_common_status_partitions() {
        assert!(CommonStatus::Paid.is_final());
        assert!(!CommonStatus::Paid.is_open());
        assert!(CommonStatus::Draft.is_open());
        // Unpaid and overdue are neither open nor final
        assert!(!CommonStatus::Unpaid.is_open());
        assert!(!CommonStatus::Overdue.is_final());
    }

    #[test]
    fn test_invoice_payment_transition() {
        assert_eq!(InvoiceStatus::Unpaid.next_on_payment(), InvoiceStatus::Paid);
        assert_eq!(InvoiceStatus::PastDue.next_on_payment(), InvoiceStatus::Paid);
        assert_eq!(InvoiceStatus::Paid.next_on_payment(), InvoiceStatus::Paid);
        assert_eq!(InvoiceStatus::Void.next_on_payment(), InvoiceStatus::Void);
        assert_eq!(
            InvoiceStatus::Refunded.next_on_payment(),
            InvoiceStatus::Refunded
        );
    }

    #[test]
    fn test_ticket_status_walk() {
        let mut status = TicketStatus::Open;
        let mut seen = vec![status];
        for _ in 0..4 {
            status = status.next();
            seen.push(status);
        }
        assert_eq!(
            seen,
            vec![
                TicketStatus::Open,
                TicketStatus::InProgress,
                TicketStatus::Waiting,
                TicketStatus::Closed,
                TicketStatus::Closed,
            ]
        );
    }

    #[test]
    fn test_ticket_due_by() {
        let created = Utc.with_ymd_and_hms(2024, 2, 27, 9, 0, 0).unwrap();
        assert_eq!(
            TicketPriority::Low.due_by(created),
            Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap()
        );
        assert_eq!(TicketPriority::Urgent.due_by(created), created);
    }

    #[test]
    fn test_resolve_approval_only_from_pending() {
        assert_eq!(
            resolve_approval(ApprovalState::Pending, ApprovalDecision::Approve),
            ApprovalState::Approved
        );
        assert_eq!(
            resolve_approval(ApprovalState::Pending, ApprovalDecision::Reject),
            ApprovalState::Rejected
        );
        assert_eq!(
            resolve_approval(ApprovalState::Rejected, ApprovalDecision::Approve),
            ApprovalState::Rejected
        );
    }

    #[test]
    fn test_quote_accepts_response() {
        assert!(QuoteStatus::New.accepts_response());
        assert!(QuoteStatus::Quoted.accepts_response());
        assert!(!QuoteStatus::Archived.accepts_response());
        assert_eq!(QuoteStatus::Declined.to_string(), "declined");
    }

    #[test]
    fn test_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::PastDue).unwrap(),
            "\"past_due\""
        );
        assert_eq!(
            serde_json::from_str::<TicketStatus>("\"in_progress\"").unwrap(),
            TicketStatus::InProgress
        );
    }
}
