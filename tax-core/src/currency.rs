//! Naira amount entry and display.
//!
//! Amounts are typed as free text (`"₦1,200,000"`, `"1200000"`) and shown
//! as whole naira with thousands separators. Parsing never fails: anything
//! that is not a digit is dropped and an empty result counts as zero.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::calculations::common::round_whole;

/// Currency symbol for Nigerian naira.
pub const NAIRA_SIGN: char = '₦';

/// Parses free-text amount entry into whole naira.
///
/// Every non-digit character is removed before parsing, including any
/// decimal point, so `"1,234.56"` reads as `123456`. Input with no digits is
/// zero. Digit strings too long for [`Decimal`] saturate at
/// [`Decimal::MAX`].
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::currency::parse_currency_input;
///
/// assert_eq!(parse_currency_input("₦1,200,000"), dec!(1200000));
/// assert_eq!(parse_currency_input("abc"), dec!(0));
/// assert_eq!(parse_currency_input(""), dec!(0));
/// ```
pub fn parse_currency_input(s: &str) -> Decimal {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Decimal::ZERO;
    }
    digits.parse().unwrap_or_else(|e| {
        warn!(input = %s, "amount out of range, saturating: {}", e);
        Decimal::MAX
    })
}

/// Formats an amount as whole naira with thousands separators and no
/// symbol, e.g. `1,200,000`.
pub fn format_grouped(value: Decimal) -> String {
    let (negative, digits) = whole_digits(value);
    let grouped = group_thousands(&digits);
    if negative { format!("-{grouped}") } else { grouped }
}

/// Formats an amount as naira with no fractional digits, e.g. `₦783,600`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::currency::format_naira;
///
/// assert_eq!(format_naira(dec!(783600)), "₦783,600");
/// assert_eq!(format_naira(dec!(65300.4)), "₦65,300");
/// assert_eq!(format_naira(dec!(-1500)), "-₦1,500");
/// ```
pub fn format_naira(value: Decimal) -> String {
    let (negative, digits) = whole_digits(value);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{NAIRA_SIGN}{}", group_thousands(&digits))
}

/// Formats a percentage with one decimal place, e.g. `13.1%`.
pub fn format_rate(rate: Decimal) -> String {
    let mut rounded = rate.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    format!("{rounded}%")
}

/// Sign and unsigned digit string of `value` rounded to whole naira.
fn whole_digits(value: Decimal) -> (bool, String) {
    let rounded = round_whole(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    (negative, rounded.abs().trunc().to_string())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
