//! EVM address parsing and validation.
//!
//! Addresses arrive as user or API input in the usual `0x`-prefixed
//! 40-hex-character form. Checksum casing is accepted but not enforced;
//! the signer SDK re-validates on submission.

use crate::error::EthError;

/// Parse a `0x`-prefixed hex address into its 20-byte form.
pub fn parse_address(address: &str) -> Result<[u8; 20], EthError> {
    let hex_str = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| EthError::InvalidAddress("address must start with 0x".into()))?;

    if hex_str.len() != 40 {
        return Err(EthError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            hex_str.len()
        )));
    }

    let bytes = hex::decode(hex_str)
        .map_err(|e| EthError::InvalidAddress(format!("invalid hex: {e}")))?;

    let mut addr = [0u8; 20];
    addr.copy_from_slice(&bytes);
    Ok(addr)
}

/// Validate that an address string is well-formed.
pub fn validate_address(address: &str) -> Result<(), EthError> {
    parse_address(address).map(|_| ())
}
