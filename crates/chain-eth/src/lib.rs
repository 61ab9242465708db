//! EVM chain support for the transfer core.
//!
//! This crate provides:
//! - Minimal ABI encoding (32-byte words, no dynamic types)
//! - ERC-20 `transfer` calldata construction
//! - EIP-1559 transaction request assembly for an external signer
//! - Multi-chain EVM network definitions

pub mod abi;
pub mod address;
pub mod chains;
pub mod erc20;
pub mod error;
pub mod transaction;

pub use error::EthError;
pub use transaction::{build_erc20_transfer, build_native_transfer, EvmTransactionRequest};
