//! Subcommand implementations.
//!
//! Each command returns a JSON value; `main` prints it. Keeping the printing
//! out of here lets the integration tests call the commands directly.

use std::path::Path;

use anyhow::{Context, Result};
use devnetiks_core::access::{
    account_menu_for, dashboard_target, guard_route, is_allowed, nav_set_for, navigation_for,
    redirect_target, Action, GuardInput, Role,
};
use devnetiks_core::config::PortalSettings;
use devnetiks_core::invoice::{calculate_invoice_totals, LineItem};
use devnetiks_core::money::{parse_money_to_cents, try_parse_money_to_cents, Money};
use devnetiks_core::validation::{
    validate_line_items, validate_non_negative_amount, validate_tax_rate,
};
use devnetiks_core::TaxRate;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::config::AppConfig;

// =============================================================================
// totals
// =============================================================================

/// Invoice draft file accepted by `totals`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsRequest {
    pub items: Vec<LineItem>,
    /// Percentage; the configured default when absent.
    #[serde(default)]
    pub tax_rate: Option<TaxRate>,
    #[serde(default)]
    pub discount_cents: Option<Money>,
}

/// Overrides given on the command line.
#[derive(Debug, Default, Clone)]
pub struct TotalsOverrides {
    /// Percentage, e.g. `8.875`.
    pub tax_rate: Option<TaxRate>,
    /// Free text, e.g. `$10.00`.
    pub discount: Option<String>,
}

/// Checks the draft the same way an invoice draft is checked before saving,
/// then computes totals.
pub fn cmd_totals(
    draft_path: &Path,
    overrides: &TotalsOverrides,
    settings: &PortalSettings,
) -> Result<Value> {
    let contents = std::fs::read_to_string(draft_path)
        .with_context(|| format!("reading draft {}", draft_path.display()))?;
    let request: TotalsRequest = serde_json::from_str(&contents)
        .with_context(|| format!("parsing draft {}", draft_path.display()))?;

    validate_line_items(&request.items).context("invalid line items")?;

    let tax_rate = overrides
        .tax_rate
        .or(request.tax_rate)
        .unwrap_or(settings.currency.default_tax_rate);
    validate_tax_rate(tax_rate).with_context(|| format!("invalid tax rate {}", tax_rate))?;

    let discount = match &overrides.discount {
        Some(text) => Money::from_cents(
            try_parse_money_to_cents(text).with_context(|| format!("discount '{}'", text))?,
        ),
        None => request.discount_cents.unwrap_or_default(),
    };
    validate_non_negative_amount("discount", discount).context("invalid discount")?;

    let totals = calculate_invoice_totals(&request.items, tax_rate, discount);
    info!(
        items = request.items.len(),
        total = totals.total.cents(),
        "Computed invoice totals"
    );

    let code = &settings.currency.code;
    let locale = &settings.currency.locale;
    Ok(json!({
        "subtotal": totals.subtotal,
        "tax": totals.tax,
        "discount": totals.discount,
        "total": totals.total,
        "taxRate": tax_rate,
        "fullyDiscounted": totals.is_fully_discounted(),
        "formatted": {
            "subtotal": totals.subtotal.format(code, locale),
            "tax": totals.tax.format(code, locale),
            "discount": totals.discount.format(code, locale),
            "total": totals.total.format(code, locale),
        },
    }))
}

// =============================================================================
// parse-money
// =============================================================================

/// Lenient mode always succeeds (garbage reads as 0). Strict mode fails
/// instead.
pub fn cmd_parse_money(text: &str, strict: bool, settings: &PortalSettings) -> Result<Value> {
    let cents = if strict {
        try_parse_money_to_cents(text).with_context(|| format!("parsing '{}'", text))?
    } else {
        parse_money_to_cents(text)
    };
    let currency = &settings.currency;
    Ok(json!({
        "input": text,
        "cents": cents,
        "formatted": Money::from_cents(cents).format(&currency.code, &currency.locale),
    }))
}

// =============================================================================
// access
// =============================================================================

pub fn cmd_access(
    role: Option<&str>,
    path: &str,
    authenticated: bool,
    settings: &PortalSettings,
) -> Result<Value> {
    let role = role.map(Role::parse);
    let nav = &settings.navigation;

    let mut permissions = Map::new();
    for action in Action::ALL {
        let allowed = role.as_ref().is_some_and(|r| is_allowed(r, action));
        permissions.insert(action.as_str().to_string(), Value::Bool(allowed));
    }

    let role = role.as_ref();
    debug!(?role, path, authenticated, "Resolving access");
    Ok(json!({
        "role": role.map(Role::as_str),
        "permissions": permissions,
        "navSet": nav_set_for(role, path, authenticated, nav),
        "navigation": navigation_for(role, path, authenticated, nav),
        "dashboard": dashboard_target(role, path, authenticated, nav),
        "accountMenu": account_menu_for(role, path, authenticated, nav),
    }))
}

// =============================================================================
// guard
// =============================================================================

pub fn cmd_guard(
    loading: bool,
    authenticated: bool,
    role: Option<&str>,
    require: &[String],
    settings: &PortalSettings,
) -> Result<Value> {
    let current = role.map(Role::parse);
    let required: Vec<Role> = require.iter().map(|r| Role::parse(r)).collect();

    let outcome = guard_route(GuardInput {
        is_authenticated: authenticated,
        loading,
        required_roles: (!required.is_empty()).then_some(required.as_slice()),
        current_role: current.as_ref(),
    });
    debug!(?outcome, "Route guard evaluated");

    Ok(json!({
        "outcome": outcome,
        "redirect": redirect_target(outcome, &settings.navigation),
    }))
}

// =============================================================================
// config
// =============================================================================

pub fn cmd_config(config: &AppConfig) -> Result<Value> {
    serde_json::to_value(config).context("serializing settings")
}
