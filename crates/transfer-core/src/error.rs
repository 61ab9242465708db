use thiserror::Error;

use chain_eth::EthError;
use chain_sol::SolError;

/// Top-level transfer and balance-resolution errors.
///
/// Encoding and validation failures surface before any network call is
/// attempted. Network failures during submission are not retried and
/// propagate verbatim; every call is independently retryable.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("transaction failed: {0}")]
    TransactionFailed(String),
}

impl From<EthError> for TransferError {
    fn from(e: EthError) -> Self {
        match e {
            EthError::InvalidAddress(_) => TransferError::InvalidAddress(format!("ETH: {e}")),
            _ => TransferError::TransactionFailed(format!("ETH: {e}")),
        }
    }
}

impl From<SolError> for TransferError {
    fn from(e: SolError) -> Self {
        match e {
            SolError::InvalidCharacter(_) | SolError::InvalidAddress(_) => {
                TransferError::InvalidAddress(format!("SOL: {e}"))
            }
            _ => TransferError::TransactionFailed(format!("SOL: {e}")),
        }
    }
}
