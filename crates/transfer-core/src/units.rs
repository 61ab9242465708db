//! Exact conversion between human decimal strings and integer base units.
//!
//! Amounts are user input ("1.5") and must convert to base units (wei,
//! lamports, token units) without ever gaining or losing a unit. The
//! conversion is pure string-and-integer arithmetic on `U256`; no
//! floating point touches the transaction path.

use alloy_primitives::U256;

use crate::error::TransferError;

/// Convert a decimal string to base units for a token with `decimals`
/// decimal places.
///
/// The fractional part is truncated (never rounded) to `decimals` digits
/// and right-padded with zeros; a missing integer part reads as `0`.
/// Fails with [`TransferError::InvalidAmount`] on empty input, more than
/// one decimal point, or non-digit characters.
pub fn to_base_units(amount: &str, decimals: u32) -> Result<U256, TransferError> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(TransferError::InvalidAmount("amount is empty".into()));
    }

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((_, frac)) if frac.contains('.') => {
            return Err(TransferError::InvalidAmount(format!(
                "more than one decimal point in {trimmed:?}"
            )));
        }
        Some((int, frac)) => (int, frac),
        None => (trimmed, ""),
    };
    let int_part = if int_part.is_empty() { "0" } else { int_part };

    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(TransferError::InvalidAmount(format!(
            "non-digit characters in {trimmed:?}"
        )));
    }

    // Truncate, never round, then right-pad to the full decimal width.
    let width = decimals as usize;
    let mut frac: String = frac_part.chars().take(width).collect();
    while frac.len() < width {
        frac.push('0');
    }

    let int_value = parse_digits(int_part)?;
    let frac_value = if frac.is_empty() {
        U256::ZERO
    } else {
        parse_digits(&frac)?
    };

    let scale = U256::from(10)
        .checked_pow(U256::from(decimals))
        .ok_or_else(|| TransferError::InvalidAmount("decimal count out of range".into()))?;

    int_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(|| TransferError::InvalidAmount(format!("amount out of range: {trimmed}")))
}

/// [`to_base_units`] narrowed to `u64`, for lamport and SPL amounts.
pub fn to_base_units_u64(amount: &str, decimals: u32) -> Result<u64, TransferError> {
    let value = to_base_units(amount, decimals)?;
    u64::try_from(value).map_err(|_| {
        TransferError::InvalidAmount(format!("amount exceeds 64-bit base units: {amount}"))
    })
}

/// Format a base-unit value back as an exact decimal string with trailing
/// zeros trimmed: the inverse of [`to_base_units`] up to truncation.
pub fn from_base_units(value: U256, decimals: u32) -> String {
    let mut digits = value.to_string();
    let width = decimals as usize;
    if width == 0 {
        return digits;
    }

    // Guarantee at least one integer digit.
    if digits.len() <= width {
        let pad = width + 1 - digits.len();
        digits.insert_str(0, &"0".repeat(pad));
    }

    let (int_part, frac_part) = digits.split_at(digits.len() - width);
    let frac_trimmed = frac_part.trim_end_matches('0');
    if frac_trimmed.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_trimmed}")
    }
}

/// Human-readable tiered balance display: `0`, `<0.0001`, four decimal
/// places under 1, two under 1000, whole numbers above.
pub fn format_balance(balance: &str, decimals: u8) -> String {
    let Ok(raw) = balance.parse::<f64>() else {
        return "0".to_string();
    };
    let value = raw / 10f64.powi(i32::from(decimals));

    if value == 0.0 {
        "0".to_string()
    } else if value < 0.0001 {
        "<0.0001".to_string()
    } else if value < 1.0 {
        format!("{value:.4}")
    } else if value < 1000.0 {
        format!("{value:.2}")
    } else {
        format!("{value:.0}")
    }
}

fn parse_digits(digits: &str) -> Result<U256, TransferError> {
    U256::from_str_radix(digits, 10)
        .map_err(|e| TransferError::InvalidAmount(format!("unparseable digits: {e}")))
}
