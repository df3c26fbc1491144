//! The EVM client facade and the handler dispatch table.

use crate::contracts::ContractRegistry;
use crate::error::EvmError;
use crate::nft::{Erc1155Nft, Erc721Nft, EvmNft};
use crate::provider::{normalize_signature, EvmProvider};
use alloy_primitives::Address;
use bazaar_api::ApiClient;
use bazaar_core::{Error as CoreError, ItemDescriptor, TokenType};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Arc;

type HandlerCtor = fn(Arc<EvmClient>, ItemDescriptor) -> Result<Box<dyn EvmNft>, EvmError>;

lazy_static! {
    /// The token-type → handler-constructor table. Immutable, built once.
    static ref NFT_MAP: HashMap<TokenType, HandlerCtor> = HashMap::from([
        (
            TokenType::Erc721,
            (|client, item| Ok(Box::new(Erc721Nft::new(client, item)?) as Box<dyn EvmNft>))
                as HandlerCtor,
        ),
        (
            TokenType::Erc1155,
            (|client, item| Ok(Box::new(Erc1155Nft::new(client, item)?) as Box<dyn EvmNft>))
                as HandlerCtor,
        ),
    ]);
}

/// The EVM client facade.
///
/// Holds the caller-supplied provider, the marketplace API client, and the
/// deployment's contract addresses. Handlers keep an `Arc` back to it; the
/// facade itself acquires nothing and adds no coordination across calls.
pub struct EvmClient {
    provider: Arc<dyn EvmProvider>,
    api: ApiClient,
    contracts: ContractRegistry,
}

impl EvmClient {
    pub fn new(
        provider: Arc<dyn EvmProvider>,
        api: ApiClient,
        contracts: ContractRegistry,
    ) -> Arc<Self> {
        Arc::new(Self {
            provider,
            api,
            contracts,
        })
    }

    pub fn provider(&self) -> &dyn EvmProvider {
        self.provider.as_ref()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn contracts(&self) -> &ContractRegistry {
        &self.contracts
    }

    pub fn account_address(&self) -> Address {
        self.provider.address()
    }

    /// Signs a message through the provider and normalizes legacy
    /// recovery bytes.
    pub async fn personal_sign(&self, message: &[u8]) -> Result<Vec<u8>, EvmError> {
        let signature = self.provider.sign_message(message).await?;
        normalize_signature(signature)
    }

    /// Dispatches a token-type tag to its concrete handler, bound to this
    /// client and the given item.
    pub fn create_nft(
        self: &Arc<Self>,
        token_type: TokenType,
        item: ItemDescriptor,
    ) -> Result<Box<dyn EvmNft>, EvmError> {
        let ctor = NFT_MAP
            .get(&token_type)
            .ok_or(CoreError::UnsupportedTokenType(token_type))?;
        ctor(Arc::clone(self), item)
    }
}
