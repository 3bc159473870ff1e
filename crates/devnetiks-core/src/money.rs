//! # Money Module
//!
//! Provides the `Money` type and the cent conversion helpers used by every
//! price, budget and total in the portal.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Form input "19.99" ──► 1999 cents ──► all math on i64               │
//! │    Display only: 1999 ──► "$19.99" (locale-aware)                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Never Panics
//! Everything here is called from form handlers on every keystroke. Bad input
//! degrades to `0` cents instead of erroring. [`try_parse_money_to_cents`] is
//! the strict variant for callers that must tell "0" apart from garbage.
//!
//! ## Usage
//! ```rust
//! use devnetiks_core::money::{parse_money_to_cents, format_cents, Money};
//!
//! let budget = parse_money_to_cents("$1,234.56");
//! assert_eq!(budget, 123456);
//!
//! let price = Money::from_cents(1099);
//! assert_eq!((price * 2).cents(), 2198);
//! assert_eq!(format_cents(budget, "USD", "en-US"), "$1,234.56");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use tracing::debug;
use ts_rs::TS;

use crate::error::MoneyParseError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediate values (credits, a
///   subtotal reduced by a negative quantity)
/// - **Single field tuple struct**: serializes as a bare integer
/// - **Saturating operators**: arithmetic never panics on overflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use devnetiks_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal dollar amount.
    ///
    /// See [`dollars_to_cents`] for rounding rules.
    #[inline]
    pub fn from_dollars(amount: f64) -> Self {
        Money(dollars_to_cents(amount))
    }

    /// Parses free text leniently; see [`parse_money_to_cents`].
    #[inline]
    pub fn parse_lenient(input: &str) -> Self {
        Money(parse_money_to_cents(input))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as decimal dollars (display and interop only).
    #[inline]
    pub fn to_dollars(&self) -> f64 {
        cents_to_dollars(self.0)
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamps negative values to zero.
    ///
    /// Used for totals: a discount larger than the amount owed means
    /// "fully discounted", never a negative bill.
    #[inline]
    pub const fn clamp_non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            Money(self.0)
        }
    }

    /// Calculates tax on this amount, rounding half away from zero.
    ///
    /// ## Implementation
    /// `amount_cents * pct / 100` computed exactly in `Decimal`, then rounded
    /// once to the nearest cent. `$10.00 × 8.25% = $0.825` rounds to `$0.83`;
    /// a negative base rounds symmetrically (`-$0.825` -> `-$0.83`). Saturates
    /// at the `i64` bounds.
    ///
    /// ```rust
    /// use devnetiks_core::money::Money;
    /// use devnetiks_core::types::TaxRate;
    ///
    /// let tax = Money::from_cents(1000).calculate_tax(TaxRate::from_bps(825));
    /// assert_eq!(tax.cents(), 83);
    ///
    /// let nyc = Money::from_cents(100_000).calculate_tax(TaxRate::from_percentage(8.875));
    /// assert_eq!(nyc.cents(), 8875);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let negative = (self.0 < 0) != rate.is_negative();
        let saturated = if negative { i64::MIN } else { i64::MAX };
        let cents = Decimal::from(self.0)
            .checked_mul(rate.percent())
            .and_then(|raw| raw.checked_div(Decimal::ONE_HUNDRED))
            .map(|raw| raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|rounded| rounded.to_i64())
            .unwrap_or(saturated);
        Money(cents)
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats for display; see [`format_cents`].
    pub fn format(&self, currency_code: &str, locale: &str) -> String {
        format_cents(self.0, currency_code, locale)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly USD rendering. Use [`format_cents`] for user-facing text.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl From<i64> for Money {
    fn from(cents: i64) -> Self {
        Money(cents)
    }
}

// =============================================================================
// Conversion Functions
// =============================================================================

/// Converts a decimal dollar amount to cents, rounding half away from zero.
///
/// Negative amounts pass through; sign checks belong to the form layer.
/// Non-finite input (NaN, infinity) yields `0`.
///
/// ```rust
/// use devnetiks_core::money::dollars_to_cents;
///
/// assert_eq!(dollars_to_cents(19.99), 1999);
/// assert_eq!(dollars_to_cents(-2.5), -250);
/// ```
pub fn dollars_to_cents(amount: f64) -> i64 {
    if !amount.is_finite() {
        return 0;
    }
    // f64::round is half-away-from-zero; `as` saturates at the i64 bounds
    (amount * 100.0).round() as i64
}

/// Converts cents to decimal dollars. No further rounding is applied.
pub fn cents_to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Parses a free-text amount into cents, returning `0` when it can't.
///
/// ## Known Ambiguity
/// `""`, `"abc"` and `"0"` all return `0`. A caller that needs to know the
/// field was left empty must check the raw text itself, or use
/// [`try_parse_money_to_cents`].
///
/// ```rust
/// use devnetiks_core::money::parse_money_to_cents;
///
/// assert_eq!(parse_money_to_cents("$1,234.56"), 123456);
/// assert_eq!(parse_money_to_cents("19,99"), 1999);
/// assert_eq!(parse_money_to_cents("abc"), 0);
/// ```
pub fn parse_money_to_cents(input: &str) -> i64 {
    match try_parse_money_to_cents(input) {
        Ok(cents) => cents,
        Err(err) => {
            debug!(input = %input, error = %err, "money text degraded to zero");
            0
        }
    }
}

/// Strict form of [`parse_money_to_cents`].
///
/// ## Parsing Rules
/// 1. Drop everything except digits, `.`, `,` and `-`.
/// 2. When both `.` and `,` occur, the last one is the decimal separator and
///    the other is a thousands separator.
/// 3. A lone `,` followed by one or two digits is a decimal separator;
///    otherwise commas are thousands separators.
/// 4. Parse exactly, multiply by 100, round half away from zero.
pub fn try_parse_money_to_cents(input: &str) -> Result<i64, MoneyParseError> {
    if input.trim().is_empty() {
        return Err(MoneyParseError::Empty);
    }

    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return Err(MoneyParseError::Invalid {
            input: input.to_string(),
        });
    }

    let normalized = normalize_separators(&cleaned);
    let amount = Decimal::from_str(&normalized).map_err(|_| MoneyParseError::Invalid {
        input: input.to_string(),
    })?;

    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| MoneyParseError::OutOfRange {
            input: input.to_string(),
        })
}

/// Rewrites `cleaned` so the only separator left is a single `.`.
fn normalize_separators(cleaned: &str) -> String {
    let last_dot = cleaned.rfind('.');
    let last_comma = cleaned.rfind(',');

    match (last_dot, last_comma) {
        (_, None) => cleaned.to_string(),
        (Some(dot), Some(comma)) if dot > comma => cleaned.replace(',', ""),
        (Some(_), Some(_)) => cleaned.replace('.', "").replace(',', "."),
        (None, Some(comma)) => {
            let fraction = &cleaned[comma + 1..];
            let single = cleaned.matches(',').count() == 1;
            if single
                && (1..=2).contains(&fraction.len())
                && fraction.chars().all(|c| c.is_ascii_digit())
            {
                cleaned.replacen(',', ".", 1)
            } else {
                cleaned.replace(',', "")
            }
        }
    }
}

/// Sums cent amounts. Saturates instead of overflowing.
pub fn sum_cents(values: &[i64]) -> i64 {
    values.iter().fold(0i64, |acc, v| acc.saturating_add(*v))
}

// =============================================================================
// Locale-Aware Formatting
// =============================================================================

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPosition {
    Prefix,
    /// Suffix separated by a no-break space.
    Suffix,
}

/// Number rendering conventions for one locale.
#[derive(Debug, Clone, Copy)]
struct LocaleConventions {
    tag: &'static str,
    group: &'static str,
    decimal: char,
    position: SymbolPosition,
    /// Integer digits beyond the first group needed before grouping kicks in.
    min_grouping: usize,
}

const NBSP: char = '\u{a0}';

#[rustfmt::skip]
const LOCALES: &[LocaleConventions] = &[
    LocaleConventions { tag: "en-US", group: ",", decimal: '.', position: SymbolPosition::Prefix, min_grouping: 1 },
    LocaleConventions { tag: "en-GB", group: ",", decimal: '.', position: SymbolPosition::Prefix, min_grouping: 1 },
    LocaleConventions { tag: "en-CA", group: ",", decimal: '.', position: SymbolPosition::Prefix, min_grouping: 1 },
    LocaleConventions { tag: "en-AU", group: ",", decimal: '.', position: SymbolPosition::Prefix, min_grouping: 1 },
    LocaleConventions { tag: "ja-JP", group: ",", decimal: '.', position: SymbolPosition::Prefix, min_grouping: 1 },
    LocaleConventions { tag: "de-DE", group: ".", decimal: ',', position: SymbolPosition::Suffix, min_grouping: 1 },
    LocaleConventions { tag: "fr-FR", group: "\u{202f}", decimal: ',', position: SymbolPosition::Suffix, min_grouping: 1 },
    LocaleConventions { tag: "es-ES", group: ".", decimal: ',', position: SymbolPosition::Suffix, min_grouping: 2 },
];

impl LocaleConventions {
    /// Resolves a BCP 47-ish tag (`en-US`, `en_us`, `de`), defaulting to en-US.
    fn resolve(locale: &str) -> Self {
        let wanted = locale.trim().replace('_', "-");
        let exact = LOCALES
            .iter()
            .find(|l| l.tag.eq_ignore_ascii_case(&wanted));
        let by_language = || {
            let language = wanted.split('-').next().unwrap_or_default();
            LOCALES.iter().find(|l| {
                l.tag
                    .split('-')
                    .next()
                    .is_some_and(|lang| lang.eq_ignore_ascii_case(language))
            })
        };
        exact.or_else(by_language).copied().unwrap_or(LOCALES[0])
    }
}

/// Symbol for `code` as shown in `locale_tag`; `None` means "show the code".
fn currency_symbol(code: &str, locale_tag: &str) -> Option<&'static str> {
    match (code, locale_tag) {
        ("USD", "en-CA" | "en-AU") => Some("US$"),
        ("USD", _) => Some("$"),
        ("CAD", "en-CA") => Some("$"),
        ("CAD", _) => Some("CA$"),
        ("AUD", "en-AU") => Some("$"),
        ("AUD", _) => Some("A$"),
        ("EUR", _) => Some("€"),
        ("GBP", _) => Some("£"),
        ("JPY", _) => Some("¥"),
        _ => None,
    }
}

/// Number of minor-unit digits shown for a currency.
fn minor_digits(code: &str) -> u32 {
    match code {
        "JPY" | "KRW" | "VND" => 0,
        _ => 2,
    }
}

fn group_digits(digits: &str, conventions: &LocaleConventions) -> String {
    if digits.len() < 3 + conventions.min_grouping {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(conventions.group);
        }
        out.push(ch);
    }
    out
}

/// Renders cents as a localized currency string.
///
/// ## Supported Locales
/// en-US, en-GB, en-CA, en-AU, ja-JP, de-DE, fr-FR, es-ES. Unknown locales
/// use en-US conventions. Unknown currency codes are shown as the code.
///
/// ```rust
/// use devnetiks_core::money::format_cents;
///
/// assert_eq!(format_cents(123456, "USD", "en-US"), "$1,234.56");
/// assert_eq!(format_cents(123456, "EUR", "de-DE"), "1.234,56\u{a0}€");
/// ```
pub fn format_cents(cents: i64, currency_code: &str, locale: &str) -> String {
    let conventions = LocaleConventions::resolve(locale);
    let code = currency_code.trim().to_ascii_uppercase();

    let magnitude = i128::from(cents).abs();
    let number = if minor_digits(&code) == 0 {
        let whole = div_round_half_away(magnitude, 100);
        group_digits(&whole.to_string(), &conventions)
    } else {
        let mut text = group_digits(&(magnitude / 100).to_string(), &conventions);
        text.push(conventions.decimal);
        text.push_str(&format!("{:02}", magnitude % 100));
        text
    };

    let sign = if cents < 0 { "-" } else { "" };
    match (currency_symbol(&code, conventions.tag), conventions.position) {
        (Some(symbol), SymbolPosition::Prefix) => format!("{sign}{symbol}{number}"),
        (None, SymbolPosition::Prefix) => format!("{sign}{code}{NBSP}{number}"),
        (Some(symbol), SymbolPosition::Suffix) => format!("{sign}{number}{NBSP}{symbol}"),
        (None, SymbolPosition::Suffix) => format!("{sign}{number}{NBSP}{code}"),
    }
}

// =============================================================================
// Integer Rounding Helpers
// =============================================================================

/// Divides and rounds half away from zero. `denominator` must be positive.
pub(crate) fn div_round_half_away(numerator: i128, denominator: i128) -> i128 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}

/// Narrows to i64, pinning at the bounds.
pub(crate) fn saturate_i64(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic_saturates() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!((Money::from_cents(i64::MAX) + a).cents(), i64::MAX);
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_cents(-1).clamp_non_negative(), Money::zero());
        assert_eq!(Money::from_cents(42).clamp_non_negative().cents(), 42);
    }

    #[test]
    fn test_tax_rounds_half_away_from_zero() {
        let rate = TaxRate::from_bps(825);
        assert_eq!(Money::from_cents(1000).calculate_tax(rate).cents(), 83);
        assert_eq!(Money::from_cents(-1000).calculate_tax(rate).cents(), -83);
        // 4500 × 10% = 450 exactly
        assert_eq!(
            Money::from_cents(4500)
                .calculate_tax(TaxRate::from_bps(1000))
                .cents(),
            450
        );
        // 5 × 10% = 0.5 → 1
        assert_eq!(
            Money::from_cents(5)
                .calculate_tax(TaxRate::from_bps(1000))
                .cents(),
            1
        );
    }

    #[test]
    fn test_tax_keeps_fractional_basis_points() {
        let nyc = TaxRate::from_percentage(8.875);
        assert_eq!(Money::from_cents(100_000).calculate_tax(nyc).cents(), 8875);
        // 1000 × 8.875% = 88.75 → 89
        assert_eq!(Money::from_cents(1000).calculate_tax(nyc).cents(), 89);
        assert_eq!(Money::from_cents(-1000).calculate_tax(nyc).cents(), -89);
        // 8.88% would give 3552
        assert_eq!(Money::from_cents(40_000).calculate_tax(nyc).cents(), 3550);
    }

    #[test]
    fn test_tax_saturates() {
        let rate = TaxRate::from_bps(10_000);
        assert_eq!(Money::from_cents(i64::MAX).calculate_tax(rate).cents(), i64::MAX);
        assert_eq!(
            Money::from_cents(i64::MAX)
                .calculate_tax(TaxRate::from_bps(20_000))
                .cents(),
            i64::MAX
        );
    }

    #[test]
    fn test_dollars_to_cents() {
        assert_eq!(dollars_to_cents(19.99), 1999);
        assert_eq!(dollars_to_cents(0.29), 29);
        assert_eq!(dollars_to_cents(0.005), 1);
        assert_eq!(dollars_to_cents(-2.5), -250);
        assert_eq!(dollars_to_cents(f64::NAN), 0);
        assert_eq!(dollars_to_cents(f64::INFINITY), 0);
    }

    #[test]
    fn test_cents_to_dollars() {
        assert!((cents_to_dollars(1999) - 19.99).abs() < f64::EPSILON);
        assert!((cents_to_dollars(-5) + 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_money_common_inputs() {
        assert_eq!(parse_money_to_cents("$1,234.56"), 123456);
        assert_eq!(parse_money_to_cents("19.99"), 1999);
        assert_eq!(parse_money_to_cents("19,99"), 1999);
        assert_eq!(parse_money_to_cents("1,234"), 123400);
        assert_eq!(parse_money_to_cents("1.234,56 €"), 123456);
        assert_eq!(parse_money_to_cents("USD 250"), 25000);
        assert_eq!(parse_money_to_cents("-5.00"), -500);
        assert_eq!(parse_money_to_cents("0.125"), 13);
    }

    /// `0` is ambiguous: empty, garbage and a genuine zero all look the same.
    #[test]
    fn test_parse_money_zero_is_ambiguous() {
        assert_eq!(parse_money_to_cents(""), 0);
        assert_eq!(parse_money_to_cents("abc"), 0);
        assert_eq!(parse_money_to_cents("0"), 0);
        assert_eq!(parse_money_to_cents("1.2.3"), 0);
    }

    #[test]
    fn test_try_parse_distinguishes_zero_from_garbage() {
        assert_eq!(try_parse_money_to_cents("0"), Ok(0));
        assert_eq!(try_parse_money_to_cents("   "), Err(MoneyParseError::Empty));
        // symbols only: not blank, so Invalid rather than Empty
        assert!(matches!(
            try_parse_money_to_cents("$ ,"),
            Err(MoneyParseError::Invalid { .. })
        ));
        assert!(matches!(
            try_parse_money_to_cents("abc"),
            Err(MoneyParseError::Invalid { .. })
        ));
        assert!(matches!(
            try_parse_money_to_cents("5-5"),
            Err(MoneyParseError::Invalid { .. })
        ));
        assert!(matches!(
            try_parse_money_to_cents("99999999999999999999999"),
            Err(MoneyParseError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_sum_cents() {
        assert_eq!(sum_cents(&[]), 0);
        assert_eq!(sum_cents(&[100, 250, -50]), 300);
        assert_eq!(sum_cents(&[i64::MAX, 1]), i64::MAX);
    }

    #[test]
    fn test_format_cents_locales() {
        assert_eq!(format_cents(123456, "USD", "en-US"), "$1,234.56");
        assert_eq!(format_cents(-550, "usd", "en-US"), "-$5.50");
        assert_eq!(format_cents(5, "USD", "en-US"), "$0.05");
        assert_eq!(format_cents(123456, "EUR", "de-DE"), "1.234,56\u{a0}€");
        assert_eq!(format_cents(123456, "GBP", "en_GB"), "£1,234.56");
        assert_eq!(format_cents(123456, "EUR", "es-ES"), "1234,56\u{a0}€");
        assert_eq!(format_cents(1234567, "EUR", "es-ES"), "12.345,67\u{a0}€");
        assert_eq!(format_cents(123456, "JPY", "ja-JP"), "¥1,235");
        assert_eq!(format_cents(123456, "CAD", "en-CA"), "$1,234.56");
        assert_eq!(format_cents(123456, "CAD", "en-US"), "CA$1,234.56");
    }

    #[test]
    fn test_format_cents_fallbacks() {
        assert_eq!(format_cents(100, "XYZ", "en-US"), "XYZ\u{a0}1.00");
        assert_eq!(format_cents(100, "USD", "tlh-KX"), "$1.00");
        assert_eq!(format_cents(100, "EUR", "de"), "1,00\u{a0}€");
    }

    proptest! {
        #[test]
        fn prop_cents_dollars_round_trip(c in 0i64..1_000_000_000_000) {
            prop_assert_eq!(dollars_to_cents(cents_to_dollars(c)), c);
        }

        #[test]
        fn prop_two_decimal_dollars_have_no_drift(whole in 0i64..10_000_000, frac in 0i64..100) {
            let text = format!("{}.{:02}", whole, frac);
            let x: f64 = text.parse().unwrap();
            let cents = dollars_to_cents(x);
            prop_assert_eq!(cents, whole * 100 + frac);
            prop_assert_eq!(cents_to_dollars(cents), x);
        }

        #[test]
        fn prop_lenient_parse_never_panics(s in ".*") {
            let _ = parse_money_to_cents(&s);
        }
    }
}
