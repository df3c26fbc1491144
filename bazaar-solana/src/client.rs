//! The Solana client facade and the handler dispatch table.

use crate::batch::{BatchSet, InstructionBatch};
use crate::error::SolanaError;
use crate::nft::{SolanaNft, SplNft};
use crate::rpc::AsyncRpcClient;
use crate::transaction::SolanaTransaction;
use crate::wallet::SolanaWallet;
use bazaar_api::ApiClient;
use bazaar_core::{Error as CoreError, ItemDescriptor, TokenType};
use lazy_static::lazy_static;
use solana_sdk::signature::Keypair;
use solana_sdk::transaction::Transaction;
use std::collections::HashMap;
use std::sync::Arc;

type HandlerCtor = fn(Arc<SolanaClient>, ItemDescriptor) -> Result<Box<dyn SolanaNft>, SolanaError>;

lazy_static! {
    /// The token-type → handler-constructor table. Immutable, built once.
    static ref NFT_MAP: HashMap<TokenType, HandlerCtor> = HashMap::from([(
        TokenType::Spl,
        (|client, item| Ok(Box::new(SplNft::new(client, item)?) as Box<dyn SolanaNft>))
            as HandlerCtor,
    )]);
}

/// The Solana client facade.
///
/// Holds the caller-supplied RPC client and wallet plus the marketplace
/// API client. Handlers keep an `Arc` back to it; the facade itself
/// acquires nothing and adds no coordination across calls.
pub struct SolanaClient {
    rpc: Arc<dyn AsyncRpcClient>,
    wallet: Arc<dyn SolanaWallet>,
    api: ApiClient,
}

impl SolanaClient {
    pub fn new(
        rpc: Arc<dyn AsyncRpcClient>,
        wallet: Arc<dyn SolanaWallet>,
        api: ApiClient,
    ) -> Arc<Self> {
        Arc::new(Self { rpc, wallet, api })
    }

    pub fn rpc(&self) -> &dyn AsyncRpcClient {
        self.rpc.as_ref()
    }

    pub fn wallet(&self) -> &dyn SolanaWallet {
        self.wallet.as_ref()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Signs one batch with the wallet and its extra signers, submits it,
    /// and waits for confirmation.
    pub async fn submit_batch(
        &self,
        batch: &InstructionBatch,
    ) -> Result<SolanaTransaction, SolanaError> {
        let blockhash = self.rpc.get_latest_blockhash().await?;
        let payer = self.wallet.pubkey();

        let mut transaction = Transaction::new_with_payer(batch.instructions(), Some(&payer));
        if !batch.signers().is_empty() {
            let signers: Vec<&Keypair> = batch.signers().iter().collect();
            transaction
                .try_partial_sign(&signers, blockhash)
                .map_err(|e| SolanaError::Signer(e.to_string()))?;
        }
        self.wallet.sign_transaction(&mut transaction, blockhash)?;

        let signature = self.rpc.send_and_confirm_transaction(&transaction).await?;
        tracing::debug!(%signature, instructions = batch.instructions().len(), "batch confirmed");
        Ok(SolanaTransaction::new(signature))
    }

    /// Submits every batch in order, stopping at the first failure.
    pub async fn submit_all(&self, set: &BatchSet) -> Result<Vec<SolanaTransaction>, SolanaError> {
        let mut transactions = Vec::with_capacity(set.batches().len());
        for batch in set.batches() {
            transactions.push(self.submit_batch(batch).await?);
        }
        Ok(transactions)
    }

    /// Dispatches a token-type tag to its concrete handler, bound to this
    /// client and the given item.
    pub fn create_nft(
        self: &Arc<Self>,
        token_type: TokenType,
        item: ItemDescriptor,
    ) -> Result<Box<dyn SolanaNft>, SolanaError> {
        let ctor = NFT_MAP
            .get(&token_type)
            .ok_or(CoreError::UnsupportedTokenType(token_type))?;
        ctor(Arc::clone(self), item)
    }
}
