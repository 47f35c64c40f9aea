//! Conversions between the decimal strings users type and see, and the integer base units the
//! contract works in.

use alloy_primitives::{
    utils::{format_units, parse_units},
    U256,
};

use crate::error::Error;

/// Parses a user-entered decimal amount into base units, accepting only strictly positive values.
///
/// Only plain decimal notation is accepted: digits with at most one point and no more fractional
/// digits than the token has decimals. Nothing is rounded.
pub fn parse_amount(input: &str, decimals: u8) -> Result<U256, Error> {
    let invalid = |reason: &str| Error::InvalidAmount {
        input: input.to_string(),
        reason: reason.to_string(),
    };
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty"));
    }
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    let is_decimal = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_decimal(whole) || !is_decimal(fraction) {
        return Err(invalid("invalid decimal value"));
    }
    if fraction.len() > usize::from(decimals) {
        return Err(invalid("fractional component exceeds decimals"));
    }
    if negative {
        return Err(Error::NonPositiveAmount);
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let normalized = if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    };
    let amount = parse_units(&normalized, decimals)
        .map_err(|err| invalid(&err.to_string()))?
        .get_absolute();
    if amount.is_zero() {
        return Err(Error::NonPositiveAmount);
    }
    Ok(amount)
}

/// Formats base units as a decimal string with trailing zeros removed but at least one
/// fractional digit, e.g. `950.0` or `0.25`.
pub fn format_amount(value: U256, decimals: u8) -> String {
    let Ok(mut formatted) = format_units(value, decimals) else {
        return value.to_string();
    };
    if let Some(dot) = formatted.find('.') {
        let keep = formatted.trim_end_matches('0').len().max(dot + 2);
        formatted.truncate(keep);
    } else {
        formatted.push_str(".0");
    }
    formatted
}
