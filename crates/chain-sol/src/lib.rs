//! Solana chain support for the transfer core.
//!
//! This crate handles Base58 public-key decoding, the legacy transaction
//! wire format, and SPL token transfers — all without pulling in
//! `solana-sdk` (which drags in tokio and 200+ transitive dependencies).
//!
//! Transactions are produced unsigned: the key material lives in the
//! external wallet SDK, so every payload carries a zeroed signature
//! placeholder and is handed off as base64.

pub mod base58;
pub mod cluster;
pub mod error;
pub mod spl_token;
pub mod transaction;

// Re-export key public types for ergonomic imports.
pub use base58::{decode_pubkey, encode, PUBKEY_LEN};
pub use cluster::SolanaCluster;
pub use error::SolError;
pub use spl_token::{
    build_token_transfer, derive_associated_token_address, token_transfer_instruction,
    ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
pub use transaction::{
    build_native_transfer, compile, encode_compact_u16, system_transfer_instruction,
    AccountMeta, CompiledInstruction, Instruction, Transaction, SYSTEM_PROGRAM_ID,
};
