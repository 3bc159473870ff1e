//! Service pricing rules.
//!
//! A service has a base price; rules adjust it in order. Percentage rules
//! compound on the running price, flat rules add a fixed amount.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::money::{div_round_half_away, saturate_i64, Money};

/// How a rule changes the running price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PricingAdjustment {
    /// Adds `price × bps / 10000`; negative for a markdown.
    Percentage { bps: i32 },
    /// Adds a fixed amount in cents; negative for a credit.
    Flat { cents: i64 },
    /// Volume tiers. Stored, not yet priced.
    Tiered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRule {
    pub id: String,
    /// Global when `None`.
    #[serde(default)]
    pub applies_to_service_id: Option<String>,
    #[serde(flatten)]
    pub adjustment: PricingAdjustment,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl PricingRule {
    fn applies_to(&self, service_id: Option<&str>) -> bool {
        if !self.active {
            return false;
        }
        match self.applies_to_service_id.as_deref() {
            None => true,
            Some(scoped) => service_id == Some(scoped),
        }
    }
}

/// Applies every active rule that matches `service_id`, in order.
///
/// ```rust
/// use devnetiks_core::money::Money;
/// use devnetiks_core::pricing::{apply_pricing_rules, PricingAdjustment, PricingRule};
///
/// let rules = vec![PricingRule {
///     id: "rush".into(),
///     applies_to_service_id: None,
///     adjustment: PricingAdjustment::Percentage { bps: 2000 },
///     description: None,
///     active: true,
/// }];
/// assert_eq!(apply_pricing_rules(Money::from_cents(10_000), &rules, None).cents(), 12_000);
/// ```
pub fn apply_pricing_rules(base: Money, rules: &[PricingRule], service_id: Option<&str>) -> Money {
    rules
        .iter()
        .filter(|rule| rule.applies_to(service_id))
        .fold(base, |price, rule| match rule.adjustment {
            PricingAdjustment::Percentage { bps } => {
                let raw = i128::from(price.cents()) * i128::from(bps);
                let delta = div_round_half_away(raw, 10_000);
                price + Money::from_cents(saturate_i64(delta))
            }
            PricingAdjustment::Flat { cents } => price + Money::from_cents(cents),
            PricingAdjustment::Tiered => {
                trace!(rule = %rule.id, "tiered pricing rule skipped");
                price
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, scope: Option<&str>, adjustment: PricingAdjustment) -> PricingRule {
        PricingRule {
            id: id.to_string(),
            applies_to_service_id: scope.map(str::to_string),
            adjustment,
            description: None,
            active: true,
        }
    }

    #[test]
    fn test_rules_compound_in_order() {
        let rules = vec![
            rule("pct", None, PricingAdjustment::Percentage { bps: 1000 }),
            rule("flat", None, PricingAdjustment::Flat { cents: 500 }),
            rule("pct2", None, PricingAdjustment::Percentage { bps: 1000 }),
        ];
        // 10000 → 11000 → 11500 → 12650
        assert_eq!(
            apply_pricing_rules(Money::from_cents(10_000), &rules, None).cents(),
            12_650
        );
    }

    #[test]
    fn test_scoped_and_inactive_rules() {
        let mut inactive = rule("off", None, PricingAdjustment::Flat { cents: 999 });
        inactive.active = false;
        let rules = vec![
            rule("web", Some("svc_web"), PricingAdjustment::Flat { cents: 100 }),
            inactive,
            rule("tiers", None, PricingAdjustment::Tiered),
        ];
        let base = Money::from_cents(1000);
        assert_eq!(apply_pricing_rules(base, &rules, Some("svc_web")).cents(), 1100);
        assert_eq!(apply_pricing_rules(base, &rules, Some("svc_seo")).cents(), 1000);
        assert_eq!(apply_pricing_rules(base, &rules, None).cents(), 1000);
    }

    #[test]
    fn test_markdown_rounds_half_away_from_zero() {
        let rules = vec![rule("sale", None, PricingAdjustment::Percentage { bps: -2500 })];
        // 1002 × -25% = -250.5 → -251
        assert_eq!(
            apply_pricing_rules(Money::from_cents(1002), &rules, None).cents(),
            751
        );
    }

    #[test]
    fn test_rule_deserializes_from_json() {
        let json = r#"{"id":"r1","type":"percentage","bps":1500,"appliesToServiceId":"svc_1"}"#;
        let parsed: PricingRule = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.adjustment, PricingAdjustment::Percentage { bps: 1500 });
        assert!(parsed.active);
        assert_eq!(parsed.applies_to_service_id.as_deref(), Some("svc_1"));
    }
}
