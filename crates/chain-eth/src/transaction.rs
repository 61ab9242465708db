//! EVM transaction request assembly.
//!
//! This crate never signs: it produces an EIP-1559 transaction request
//! (recipient, value, calldata, gas and fee fields) that the external
//! wallet SDK signs and broadcasts. Fees are derived from the current gas
//! price with a fixed bump, not a fee-market estimate.

use alloy_primitives::U256;
use serde::Serialize;

use crate::address::validate_address;
use crate::erc20;
use crate::error::EthError;

/// Gas limit for a plain native-value transfer.
const NATIVE_TRANSFER_GAS_LIMIT: u64 = 21_000;

/// Gas limit for an ERC-20 `transfer` call.
const ERC20_TRANSFER_GAS_LIMIT: u64 = 100_000;

/// An EIP-1559 transaction request for the external signer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmTransactionRequest {
    pub from: String,
    pub to: String,
    /// Transfer value in wei (zero for token transfers).
    pub value: U256,
    /// `0x`-prefixed hex calldata, absent for native transfers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    pub gas_limit: u64,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
}

/// Build a native-value transfer request.
///
/// Both fee fields are set to twice the current gas price.
pub fn build_native_transfer(
    from: &str,
    to: &str,
    value_wei: U256,
    gas_price: U256,
) -> Result<EvmTransactionRequest, EthError> {
    validate_address(to)?;
    let max_fee = doubled(gas_price)?;

    Ok(EvmTransactionRequest {
        from: from.to_string(),
        to: to.to_string(),
        value: value_wei,
        data: None,
        gas_limit: NATIVE_TRANSFER_GAS_LIMIT,
        max_fee_per_gas: max_fee,
        max_priority_fee_per_gas: max_fee,
    })
}

/// Build an ERC-20 `transfer` request against `token_contract`.
///
/// Max fee is twice the current gas price; the priority fee is half the
/// gas price (integer division).
pub fn build_erc20_transfer(
    from: &str,
    token_contract: &str,
    to: &str,
    amount: U256,
    gas_price: U256,
) -> Result<EvmTransactionRequest, EthError> {
    validate_address(token_contract)?;

    let calldata = erc20::encode_transfer(to, amount.to_be_bytes::<32>())?;

    Ok(EvmTransactionRequest {
        from: from.to_string(),
        to: token_contract.to_string(),
        value: U256::ZERO,
        data: Some(format!("0x{}", hex::encode(calldata))),
        gas_limit: ERC20_TRANSFER_GAS_LIMIT,
        max_fee_per_gas: doubled(gas_price)?,
        max_priority_fee_per_gas: gas_price / U256::from(2),
    })
}

fn doubled(gas_price: U256) -> Result<U256, EthError> {
    gas_price
        .checked_mul(U256::from(2))
        .ok_or_else(|| EthError::TransactionBuildError("gas price overflow".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FROM: &str = "0x1111111111111111111111111111111111111111";
    const TO: &str = "0x000000000000000000000000000000000000dEaD";
    const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

    #[test]
    fn native_transfer_fields() {
        let gas_price = U256::from(30_000_000_000u64);
        let value = U256::from(1_000_000_000_000_000_000u64);

        let tx = build_native_transfer(FROM, TO, value, gas_price).unwrap();

        assert_eq!(tx.from, FROM);
        assert_eq!(tx.to, TO);
        assert_eq!(tx.value, value);
        assert!(tx.data.is_none());
        assert_eq!(tx.gas_limit, 21_000);
        assert_eq!(tx.max_fee_per_gas, U256::from(60_000_000_000u64));
        assert_eq!(tx.max_priority_fee_per_gas, U256::from(60_000_000_000u64));
    }

    #[test]
    fn native_transfer_rejects_bad_recipient() {
        assert!(build_native_transfer(FROM, "bad", U256::from(1), U256::from(1)).is_err());
    }

    #[test]
    fn erc20_transfer_fields() {
        let gas_price = U256::from(30_000_000_000u64);
        let amount = U256::from(2_500_000u64);

        let tx = build_erc20_transfer(FROM, USDC, TO, amount, gas_price).unwrap();

        assert_eq!(tx.to, USDC);
        assert_eq!(tx.value, U256::ZERO);
        assert_eq!(tx.gas_limit, 100_000);
        assert_eq!(tx.max_fee_per_gas, U256::from(60_000_000_000u64));
        assert_eq!(tx.max_priority_fee_per_gas, U256::from(15_000_000_000u64));

        // Calldata: 0x + selector + two 32-byte words.
        let data = tx.data.unwrap();
        assert!(data.starts_with("0xa9059cbb"));
        assert_eq!(data.len(), 2 + 68 * 2);
    }

    #[test]
    fn erc20_priority_fee_uses_integer_division() {
        let tx = build_erc20_transfer(FROM, USDC, TO, U256::from(1), U256::from(3)).unwrap();
        assert_eq!(tx.max_priority_fee_per_gas, U256::from(1));
        assert_eq!(tx.max_fee_per_gas, U256::from(6));
    }

    #[test]
    fn erc20_transfer_rejects_bad_contract() {
        assert!(
            build_erc20_transfer(FROM, "not-an-address", TO, U256::from(1), U256::from(1))
                .is_err()
        );
    }

    #[test]
    fn erc20_transfer_rejects_bad_recipient() {
        assert!(build_erc20_transfer(FROM, USDC, "bad", U256::from(1), U256::from(1)).is_err());
    }

    #[test]
    fn gas_price_overflow_is_rejected() {
        assert!(build_native_transfer(FROM, TO, U256::from(1), U256::MAX).is_err());
    }

    #[test]
    fn request_serializes_with_camel_case_fields() {
        let tx = build_native_transfer(FROM, TO, U256::from(5), U256::from(10)).unwrap();
        let json = serde_json::to_value(&tx).unwrap();

        assert!(json.get("gasLimit").is_some());
        assert!(json.get("maxFeePerGas").is_some());
        assert!(json.get("maxPriorityFeePerGas").is_some());
        // Native transfers omit calldata entirely.
        assert!(json.get("data").is_none());
    }
}
