/// Exact conversion between human token amounts and integer base units
///
/// Amounts are scaled by `10^decimals` in 256-bit integer arithmetic, so
/// no value that fits a uint256 on chain ever loses precision.

use alloy::primitives::U256;
use staking_types::{DeployResult, StakeDeployError};

/// `10^decimals`, or `None` if it does not fit in 256 bits
pub fn pow10(decimals: u8) -> Option<U256> {
    U256::from(10u64).checked_pow(U256::from(decimals))
}

/// Convert a human amount such as `10_500_000.0` into base units
pub fn to_base_units(amount: f64, decimals: u8) -> DeployResult<U256> {
    if !amount.is_finite() {
        return Err(StakeDeployError::conversion(&amount.to_string(), "amount is not finite"));
    }
    if amount < 0.0 {
        return Err(StakeDeployError::conversion(&amount.to_string(), "amount is negative"));
    }
    // -0.0 renders with a sign
    let amount = if amount == 0.0 { 0.0 } else { amount };

    // f64 Display is the shortest exact decimal and never uses exponents.
    parse_base_units(&amount.to_string(), decimals)
}

/// Parse a decimal string such as `"1342250"` or `"0.25"` into base units
pub fn parse_base_units(text: &str, decimals: u8) -> DeployResult<U256> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(StakeDeployError::conversion(text, "amount is empty"));
    }
    if trimmed.starts_with('-') {
        return Err(StakeDeployError::conversion(text, "amount is negative"));
    }

    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(StakeDeployError::conversion(text, "amount has no digits"));
    }
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole) || !is_digits(fraction) {
        return Err(StakeDeployError::conversion(text, "amount is not a plain decimal number"));
    }
    if fraction.len() > decimals as usize {
        return Err(StakeDeployError::conversion(
            text,
            &format!("more than {} fractional digits", decimals),
        ));
    }

    let overflow = || StakeDeployError::conversion(text, "amount does not fit in 256 bits");
    let scale = pow10(decimals).ok_or_else(overflow)?;

    let whole_value = parse_digits(whole).ok_or_else(overflow)?;
    let fraction_value = match fraction.len() {
        0 => U256::ZERO,
        len => {
            let padding = pow10(decimals - len as u8).ok_or_else(overflow)?;
            parse_digits(fraction)
                .and_then(|f| f.checked_mul(padding))
                .ok_or_else(overflow)?
        }
    };

    whole_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or_else(overflow)
}

fn parse_digits(digits: &str) -> Option<U256> {
    if digits.is_empty() {
        return Some(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).ok()
}

/// Render base units back as a decimal string without trailing zeros
pub fn format_base_units(value: U256, decimals: u8) -> String {
    let Some(scale) = pow10(decimals) else {
        return value.to_string();
    };
    let whole = value / scale;
    let fraction = value % scale;
    if fraction.is_zero() {
        return whole.to_string();
    }

    let padded = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    format!("{}.{}", whole, padded.trim_end_matches('0'))
}
