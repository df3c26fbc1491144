//! The single-edition (ERC-721) handler.

use super::{BuyParams, EvmNft, NftBase, PutForSaleParams, RoleKinds};
use crate::client::EvmClient;
use crate::contracts::{ContractKind, IErc721};
use crate::error::EvmError;
use crate::transaction::EvmTransaction;
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use bazaar_core::{ChainId, ItemDescriptor, SaleOffer, TokenType};
use std::sync::Arc;

const ROLES: RoleKinds = RoleKinds {
    sale: ContractKind::Erc721Sale,
    nonce_holder: ContractKind::Erc721SaleNonceHolder,
    auction: ContractKind::Erc721Auction,
    airdrop: ContractKind::Erc721Airdrop,
};

#[derive(Debug)]
pub struct Erc721Nft {
    base: NftBase,
}

impl Erc721Nft {
    pub fn new(client: Arc<EvmClient>, item: ItemDescriptor) -> Result<Self, EvmError> {
        Ok(Self {
            base: NftBase::bound(client, TokenType::Erc721, ROLES, item)?,
        })
    }

    /// A handler without an item descriptor; operations needing one fail
    /// until `set_item` binds it.
    pub fn detached(client: Arc<EvmClient>, chain_id: ChainId) -> Result<Self, EvmError> {
        Ok(Self {
            base: NftBase::detached(client, TokenType::Erc721, ROLES, chain_id)?,
        })
    }
}

#[async_trait]
impl EvmNft for Erc721Nft {
    fn base(&self) -> &NftBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NftBase {
        &mut self.base
    }

    async fn put_for_sale(&self, params: PutForSaleParams) -> Result<SaleOffer, EvmError> {
        // Single edition; supply in the params is ignored.
        self.base
            .put_for_sale_flow(&params.price, 1, params.start_time, params.end_time)
            .await
    }

    async fn transfer(
        &self,
        from: Address,
        to: Address,
        _supply: u64,
    ) -> Result<EvmTransaction, EvmError> {
        let token = self.base.token_address()?;
        let data = IErc721::transferFromCall {
            from,
            to,
            tokenId: self.base.token_id_uint()?,
        }
        .abi_encode();
        let hash = self
            .base
            .client()
            .provider()
            .send(token, data, U256::ZERO)
            .await?;
        Ok(EvmTransaction::new(hash))
    }

    async fn burn(&self, _supply: u64, _owner: Address) -> Result<EvmTransaction, EvmError> {
        let token = self.base.token_address()?;
        let data = IErc721::burnCall {
            tokenId: self.base.token_id_uint()?,
        }
        .abi_encode();
        let hash = self
            .base
            .client()
            .provider()
            .send(token, data, U256::ZERO)
            .await?;
        Ok(EvmTransaction::new(hash))
    }

    async fn buy(&self, params: BuyParams) -> Result<EvmTransaction, EvmError> {
        self.base.buy_flow(&params, None).await
    }

    async fn buy_using_voucher(
        &self,
        params: BuyParams,
        voucher: Vec<u8>,
    ) -> Result<EvmTransaction, EvmError> {
        self.base.buy_flow(&params, Some(voucher)).await
    }
}
