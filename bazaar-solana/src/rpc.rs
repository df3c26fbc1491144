//! The RPC seam between the SDK and the cluster.

use async_trait::async_trait;
use solana_client::{client_error::ClientError, nonblocking::rpc_client::RpcClient};
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::Transaction,
};

/// A trait abstracting over the asynchronous RPC client functionality.
///
/// This keeps the handlers generic over the RPC client, so tests can drive
/// the flows with a recording mock instead of a live cluster.
#[async_trait]
pub trait AsyncRpcClient: Send + Sync {
    /// Fetches the latest blockhash from the RPC endpoint.
    async fn get_latest_blockhash(&self) -> Result<Hash, ClientError>;

    /// Sends and confirms a transaction, waiting for it to be finalized.
    async fn send_and_confirm_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, ClientError>;

    /// Minimum lamports for rent exemption of an account of `size` bytes.
    async fn get_minimum_balance_for_rent_exemption(
        &self,
        size: usize,
    ) -> Result<u64, ClientError>;

    /// Whether an account exists at the address.
    async fn account_exists(&self, pubkey: &Pubkey) -> Result<bool, ClientError>;
}

#[async_trait]
impl AsyncRpcClient for RpcClient {
    async fn get_latest_blockhash(&self) -> Result<Hash, ClientError> {
        self.get_latest_blockhash().await
    }

    async fn send_and_confirm_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, ClientError> {
        self.send_and_confirm_transaction(transaction).await
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        size: usize,
    ) -> Result<u64, ClientError> {
        self.get_minimum_balance_for_rent_exemption(size).await
    }

    async fn account_exists(&self, pubkey: &Pubkey) -> Result<bool, ClientError> {
        let response = self
            .get_account_with_commitment(pubkey, CommitmentConfig::confirmed())
            .await?;
        Ok(response.value.is_some())
    }
}
