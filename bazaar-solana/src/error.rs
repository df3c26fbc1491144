use solana_client::client_error::ClientError;
use solana_sdk::pubkey::ParsePubkeyError;
use thiserror::Error;

/// Defines the error types for Solana-side marketplace operations.
///
/// RPC and API failures pass through unmodified; there is no retry or
/// rollback at this layer.
#[derive(Error, Debug)]
pub enum SolanaError {
    #[error(transparent)]
    Core(#[from] bazaar_core::Error),

    #[error(transparent)]
    Api(#[from] bazaar_api::ApiError),

    #[error("rpc client error: {0}")]
    Client(#[from] ClientError),

    #[error("signer error: {0}")]
    Signer(String),

    #[error("invalid public key: {0}")]
    Pubkey(#[from] ParsePubkeyError),

    #[error("instruction encoding failed: {0}")]
    Encode(String),
}
