//! The multi-edition (ERC-1155) handler.

use super::{BuyParams, EvmNft, NftBase, PutForSaleParams, RoleKinds};
use crate::client::EvmClient;
use crate::contracts::{ContractKind, IErc1155};
use crate::error::EvmError;
use crate::transaction::EvmTransaction;
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use bazaar_core::{ChainId, ItemDescriptor, SaleOffer, TokenType};
use std::sync::Arc;

const ROLES: RoleKinds = RoleKinds {
    sale: ContractKind::Erc1155Sale,
    nonce_holder: ContractKind::Erc1155SaleNonceHolder,
    auction: ContractKind::Erc1155Auction,
    airdrop: ContractKind::Erc1155Airdrop,
};

#[derive(Debug)]
pub struct Erc1155Nft {
    base: NftBase,
}

impl Erc1155Nft {
    pub fn new(client: Arc<EvmClient>, item: ItemDescriptor) -> Result<Self, EvmError> {
        Ok(Self {
            base: NftBase::bound(client, TokenType::Erc1155, ROLES, item)?,
        })
    }

    /// A handler without an item descriptor; operations needing one fail
    /// until `set_item` binds it.
    pub fn detached(client: Arc<EvmClient>, chain_id: ChainId) -> Result<Self, EvmError> {
        Ok(Self {
            base: NftBase::detached(client, TokenType::Erc1155, ROLES, chain_id)?,
        })
    }
}

#[async_trait]
impl EvmNft for Erc1155Nft {
    fn base(&self) -> &NftBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NftBase {
        &mut self.base
    }

    async fn put_for_sale(&self, params: PutForSaleParams) -> Result<SaleOffer, EvmError> {
        self.base
            .put_for_sale_flow(
                &params.price,
                params.supply.max(1),
                params.start_time,
                params.end_time,
            )
            .await
    }

    async fn transfer(
        &self,
        from: Address,
        to: Address,
        supply: u64,
    ) -> Result<EvmTransaction, EvmError> {
        let token = self.base.token_address()?;
        let data = IErc1155::safeTransferFromCall {
            from,
            to,
            id: self.base.token_id_uint()?,
            amount: U256::from(supply),
            data: Bytes::new(),
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

    async fn burn(&self, supply: u64, owner: Address) -> Result<EvmTransaction, EvmError> {
        let token = self.base.token_address()?;
        let data = IErc1155::burnCall {
            account: owner,
            id: self.base.token_id_uint()?,
            amount: U256::from(supply),
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
