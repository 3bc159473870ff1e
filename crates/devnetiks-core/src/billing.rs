//! # Billing Helpers
//!
//! Shapes line items for a hosted checkout session and does the small amount
//! of recurring-date math subscriptions need.
//!
//! ## Checkout Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckoutLine { name, amount, quantity, currency?, metadata }           │
//! │        │                                                                │
//! │        ▼  to_checkout_items                                             │
//! │  CheckoutItem {                                                         │
//! │      price_data: { currency, product_data: { name, metadata },          │
//! │                    unit_amount },                                       │
//! │      quantity                                                           │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The payment provider is never called from here; callers post the result.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, Months, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::invoice::LineItem;
use crate::money::Money;

/// Currency used when a checkout line names none.
pub const DEFAULT_CHECKOUT_CURRENCY: &str = "usd";

// =============================================================================
// Checkout Items
// =============================================================================

/// One priced entry headed for checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub name: String,
    /// Unit amount in cents.
    pub amount: Money,
    pub quantity: i64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl From<&LineItem> for CheckoutLine {
    fn from(item: &LineItem) -> Self {
        CheckoutLine {
            name: item.name.clone(),
            amount: item.unit_amount(),
            quantity: item.quantity,
            currency: None,
            metadata: BTreeMap::new(),
        }
    }
}

/// Inline price data in the provider's wire format (snake_case).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutItem {
    pub price_data: PriceData,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceData {
    /// Lowercase ISO 4217 code.
    pub currency: String,
    pub product_data: ProductData,
    pub unit_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductData {
    pub name: String,
    pub metadata: BTreeMap<String, String>,
}

/// Maps checkout lines to inline price data, one item per line, in order.
pub fn to_checkout_items(lines: &[CheckoutLine]) -> Vec<CheckoutItem> {
    lines
        .iter()
        .map(|line| CheckoutItem {
            price_data: PriceData {
                currency: line
                    .currency
                    .as_deref()
                    .map(|code| code.trim().to_ascii_lowercase())
                    .unwrap_or_else(|| DEFAULT_CHECKOUT_CURRENCY.to_string()),
                product_data: ProductData {
                    name: line.name.clone(),
                    metadata: line.metadata.clone(),
                },
                unit_amount: line.amount.cents(),
            },
            quantity: line.quantity,
        })
        .collect()
}

/// Flattens arbitrary order metadata to string values.
///
/// Strings pass through unchanged; every other value (numbers, booleans,
/// `null`, arrays, objects) becomes its compact JSON text.
pub fn build_order_metadata(meta: &Map<String, Value>) -> BTreeMap<String, String> {
    meta.iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect()
}

/// `$12.34` style text for receipts and provider descriptions.
pub fn readable_amount(cents: i64) -> String {
    Money::from_cents(cents).to_string()
}

// =============================================================================
// Subscriptions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Day,
    Week,
    Month,
    Year,
}

/// Start of the billing period `count` intervals after `from`.
///
/// Month and year steps keep the day of month, clamped to the last day of a
/// shorter month (Jan 31 + 1 month = Feb 28/29). `None` past chrono's range.
pub fn next_billing_date(
    from: DateTime<Utc>,
    interval: BillingInterval,
    count: u32,
) -> Option<DateTime<Utc>> {
    match interval {
        BillingInterval::Day => from.checked_add_days(Days::new(u64::from(count))),
        BillingInterval::Week => from.checked_add_days(Days::new(u64::from(count) * 7)),
        BillingInterval::Month => from.checked_add_months(Months::new(count)),
        BillingInterval::Year => from.checked_add_months(Months::new(count.checked_mul(12)?)),
    }
}

/// Share of the current period already used at `now`, in `[0, 1]`.
///
/// A period with no positive length counts as fully used.
pub fn proration_fraction(
    now: DateTime<Utc>,
    current_period_end: DateTime<Utc>,
    previous_period_end: DateTime<Utc>,
) -> f64 {
    let span = (current_period_end - previous_period_end).num_milliseconds();
    if span <= 0 {
        return 1.0;
    }
    let used = (now - previous_period_end).num_milliseconds();
    (used as f64 / span as f64).clamp(0.0, 1.0)
}

// =============================================================================
// Unit Tests
// =============================================================================
