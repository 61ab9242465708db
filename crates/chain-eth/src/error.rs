use thiserror::Error;

/// EVM chain operation errors.
#[derive(Debug, Error)]
pub enum EthError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("transaction build error: {0}")]
    TransactionBuildError(String),
}
