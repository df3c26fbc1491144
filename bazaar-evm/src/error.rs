use crate::contracts::ContractKind;
use thiserror::Error;

/// Defines the error types for EVM-side marketplace operations.
///
/// Chain and API failures pass through; the SDK adds no retry or
/// compensation on top of them.
#[derive(Error, Debug)]
pub enum EvmError {
    #[error(transparent)]
    Core(#[from] bazaar_core::Error),

    #[error(transparent)]
    Api(#[from] bazaar_api::ApiError),

    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("signer error: {0}")]
    Signer(String),

    #[error("no {0} contract registered")]
    MissingContract(ContractKind),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid token id: {0}")]
    InvalidTokenId(String),

    #[error("failed to decode contract return data: {0}")]
    AbiDecode(String),
}
