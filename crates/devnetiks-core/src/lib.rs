//! # devnetiks-core: Pure Business Logic for the Devnetiks Portal
//!
//! Money arithmetic, invoice and proposal totals, and role-based access
//! decisions. Everything here is a pure function of its inputs: no document
//! store, no identity provider, no file system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Devnetiks Portal Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Web front end / devnetiks CLI                      │   │
//! │  │    Intake form ──► Quote respond ──► Invoice form ──► Router   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain function calls                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ devnetiks-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │  invoice  │  │  access   │  │ validation│  │   │
//! │  │   │   Money   │  │  Totals   │  │   Role    │  │   rules   │  │   │
//! │  │   │  format   │  │ proposal  │  │ nav/guard │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            Hosted document store (out of process)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer cents, lenient and strict parsing, formatting
//! - [`invoice`] - Line items, subtotal, tax, clamped totals, invoice drafts
//! - [`proposal`] - Responding to a quote with a versioned proposal
//! - [`pricing`] - Service price adjustments
//! - [`billing`] - Checkout items, order metadata, subscription dates
//! - [`schedule`] - Next run times for recurring jobs
//! - [`access`] - Role permissions, navigation sets, route guard
//! - [`workflow`] - Status enums and transitions
//! - [`validation`] - Form-layer checks
//! - [`domain`] - Organization domain normalization
//! - [`ids`] - Prefixed entity ids
//! - [`types`] - `TaxRate`, `StoredTimestamp`
//! - [`config`] - Currency and navigation settings
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use devnetiks_core::invoice::{calculate_invoice_totals, LineItem};
//! use devnetiks_core::money::Money;
//! use devnetiks_core::types::TaxRate;
//!
//! let items = vec![
//!     LineItem::new("1", "Design", 2, 2000),
//!     LineItem::new("2", "Hosting", 1, 500),
//! ];
//! let totals = calculate_invoice_totals(&items, TaxRate::from_bps(1000), Money::from_cents(100));
//!
//! assert_eq!(totals.subtotal.cents(), 4500);
//! assert_eq!(totals.tax.cents(), 450);
//! assert_eq!(totals.total.cents(), 4850);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod billing;
pub mod config;
pub mod domain;
pub mod error;
pub mod ids;
pub mod invoice;
pub mod money;
pub mod pricing;
pub mod proposal;
pub mod schedule;
pub mod types;
pub mod validation;
pub mod workflow;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use access::{GuardOutcome, Role};
pub use error::{CoreError, CoreResult, MoneyParseError, ValidationError};
pub use invoice::{LineItem, Totals};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items on one invoice or proposal.
pub const MAX_LINE_ITEMS: usize = 200;

/// Maximum length of a name field, in characters.
pub const MAX_NAME_LENGTH: usize = 200;

/// Highest accepted tax rate, as a percentage.
pub const MAX_TAX_RATE_PERCENT: u32 = 100;
