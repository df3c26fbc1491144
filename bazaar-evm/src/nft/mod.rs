//! NFT handlers: the capability trait and the shared operation flows.
//!
//! Each token standard gets a concrete handler ([`Erc721Nft`],
//! [`Erc1155Nft`]) implementing [`EvmNft`]. The multi-step flows — sale,
//! purchase, auction, bid, airdrop — are shared on [`NftBase`] and differ
//! per standard only in the token-contract calls and supply semantics.
//!
//! Every flow is a sequential chain of fallible calls; a failure at any
//! step surfaces immediately and leaves earlier steps (an already
//! submitted approval, for instance) in place.

mod erc1155;
mod erc721;

pub use erc1155::Erc1155Nft;
pub use erc721::Erc721Nft;

use crate::client::EvmClient;
use crate::contracts::{ContractKind, IAirdrop, IAuction, IErc1155, IErc20, ISale, ISaleNonceHolder};
use crate::error::EvmError;
use crate::sale::sale_params_hash;
use crate::transaction::EvmTransaction;
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use bazaar_api::{CreateOfferInput, OfferPriceInput, RefreshMetadataInput};
use bazaar_core::{
    chain, AuctionOffer, ChainConfig, ChainId, Error as CoreError, ItemDescriptor, OfferKind,
    Price, SaleId, SaleOffer, SaleVersion, TokenType,
};
use chrono::{DateTime, Utc};
use std::str::FromStr;
use std::sync::Arc;

/// Parameters for `put_for_sale`.
#[derive(Debug, Clone)]
pub struct PutForSaleParams {
    pub price: Price,
    /// Number of editions to list. ERC-721 handlers force this to 1.
    pub supply: u64,
    /// Defaults to now when unset.
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// Parameters for `buy` / `buy_using_voucher`: the signed sale parameters
/// as echoed by the server.
#[derive(Debug, Clone)]
pub struct BuyParams {
    /// The composite sale identifier to redeem.
    pub blockchain_id: String,
    /// The seller's signature over the sale-parameters hash.
    pub signature: Vec<u8>,
    /// Per-edition price.
    pub price: Price,
    /// The seller.
    pub owner: Address,
    /// Editions the seller listed.
    pub supply: u64,
    /// Editions being bought. Defaults to 1.
    pub amount: Option<u64>,
}

/// Parameters for `put_for_auction`.
#[derive(Debug, Clone)]
pub struct PutForAuctionParams {
    /// The minimum bid.
    pub price: Price,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// The contract roles a handler resolves against the registry, fixed per
/// token standard at construction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RoleKinds {
    pub sale: ContractKind,
    pub nonce_holder: ContractKind,
    pub auction: ContractKind,
    pub airdrop: ContractKind,
}

/// The uniform operation set every chain/standard handler provides.
///
/// Operations needing the item descriptor fail with
/// [`bazaar_core::Error::MissingItem`] when none is set. Auction, bid,
/// airdrop, and metadata operations share one implementation on
/// [`NftBase`]; the token-contract specifics stay per handler.
#[async_trait]
pub trait EvmNft: Send + Sync + std::fmt::Debug {
    fn base(&self) -> &NftBase;
    fn base_mut(&mut self) -> &mut NftBase;

    fn token_type(&self) -> TokenType {
        self.base().token_type
    }

    fn item(&self) -> Result<&ItemDescriptor, EvmError> {
        self.base().item()
    }

    /// Rebinds the handler to another item on the same registry of chains.
    fn set_item(&mut self, item: ItemDescriptor) -> Result<(), EvmError> {
        self.base_mut().set_item(item)
    }

    async fn put_for_sale(&self, params: PutForSaleParams) -> Result<SaleOffer, EvmError>;

    async fn transfer(
        &self,
        from: Address,
        to: Address,
        supply: u64,
    ) -> Result<EvmTransaction, EvmError>;

    async fn burn(&self, supply: u64, owner: Address) -> Result<EvmTransaction, EvmError>;

    async fn buy(&self, params: BuyParams) -> Result<EvmTransaction, EvmError>;

    async fn buy_using_voucher(
        &self,
        params: BuyParams,
        voucher: Vec<u8>,
    ) -> Result<EvmTransaction, EvmError>;

    async fn cancel_sale(&self, blockchain_id: Option<&str>) -> Result<EvmTransaction, EvmError> {
        self.base().cancel_sale_flow(blockchain_id).await
    }

    async fn put_for_auction(
        &self,
        params: PutForAuctionParams,
    ) -> Result<(EvmTransaction, AuctionOffer), EvmError> {
        self.base().put_for_auction_flow(&params).await
    }

    async fn place_bid(
        &self,
        price: Price,
        auction_id: Option<u64>,
        owner: Option<Address>,
    ) -> Result<EvmTransaction, EvmError> {
        self.base().place_bid_flow(&price, auction_id, owner).await
    }

    async fn cancel_auction(
        &self,
        auction_id: Option<u64>,
        owner: Option<Address>,
    ) -> Result<EvmTransaction, EvmError> {
        self.base().cancel_auction_flow(auction_id, owner).await
    }

    async fn end_auction(
        &self,
        auction_id: Option<u64>,
        owner: Option<Address>,
    ) -> Result<EvmTransaction, EvmError> {
        self.base().end_auction_flow(auction_id, owner).await
    }

    async fn airdrop(&self, recipients: Vec<Address>) -> Result<EvmTransaction, EvmError> {
        self.base().airdrop_flow(recipients).await
    }

    async fn refresh_metadata(&self) -> Result<bool, EvmError> {
        self.base().refresh_metadata().await
    }
}

/// State and shared flows common to every EVM handler.
pub struct NftBase {
    client: Arc<EvmClient>,
    token_type: TokenType,
    kinds: RoleKinds,
    chain: &'static ChainConfig,
    item: Option<ItemDescriptor>,
}

impl std::fmt::Debug for NftBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NftBase")
            .field("token_type", &self.token_type)
            .field("kinds", &self.kinds)
            .field("chain", &self.chain)
            .field("item", &self.item)
            .finish_non_exhaustive()
    }
}

impl NftBase {
    pub(crate) fn bound(
        client: Arc<EvmClient>,
        token_type: TokenType,
        kinds: RoleKinds,
        item: ItemDescriptor,
    ) -> Result<Self, EvmError> {
        let chain = chain::require_chain(item.chain_id)?;
        Ok(Self {
            client,
            token_type,
            kinds,
            chain,
            item: Some(item),
        })
    }

    pub(crate) fn detached(
        client: Arc<EvmClient>,
        token_type: TokenType,
        kinds: RoleKinds,
        chain_id: ChainId,
    ) -> Result<Self, EvmError> {
        let chain = chain::require_chain(chain_id)?;
        Ok(Self {
            client,
            token_type,
            kinds,
            chain,
            item: None,
        })
    }

    pub fn item(&self) -> Result<&ItemDescriptor, EvmError> {
        self.item.as_ref().ok_or(CoreError::MissingItem.into())
    }

    pub fn set_item(&mut self, item: ItemDescriptor) -> Result<(), EvmError> {
        self.chain = chain::require_chain(item.chain_id)?;
        self.item = Some(item);
        Ok(())
    }

    pub fn chain(&self) -> &'static ChainConfig {
        self.chain
    }

    pub(crate) fn client(&self) -> &Arc<EvmClient> {
        &self.client
    }

    // --- Currency helpers ---

    /// The payment token address for a currency; the zero address stands
    /// for the native currency.
    pub fn payment_token(&self, symbol: &str) -> Result<Address, EvmError> {
        let currency = self.chain.currency(symbol)?;
        if currency.native {
            return Ok(Address::ZERO);
        }
        Address::from_str(&currency.address)
            .map_err(|_| EvmError::InvalidAddress(currency.address.clone()))
    }

    pub fn is_native_currency(&self, symbol: &str) -> Result<bool, EvmError> {
        Ok(self.chain.is_native_currency(symbol)?)
    }

    /// Converts a price to the currency's smallest unit.
    pub fn parse_currency(&self, price: &Price) -> Result<U256, EvmError> {
        let currency = self.chain.currency(&price.currency)?;
        Ok(U256::from(price.in_smallest_unit(currency.decimals)?))
    }

    // --- Item projections ---

    pub(crate) fn token_address(&self) -> Result<Address, EvmError> {
        let item = self.item()?;
        Address::from_str(&item.contract_address)
            .map_err(|_| EvmError::InvalidAddress(item.contract_address.clone()))
    }

    pub(crate) fn token_id_uint(&self) -> Result<U256, EvmError> {
        let raw = &self.item()?.token_id;
        let parsed = match raw.strip_prefix("0x") {
            Some(hexadecimal) => U256::from_str_radix(hexadecimal, 16),
            None => U256::from_str_radix(raw, 10),
        };
        parsed.map_err(|_| EvmError::InvalidTokenId(raw.clone()))
    }

    // --- Approval ---

    pub async fn is_approved_for_all(&self, operator: Address) -> Result<bool, EvmError> {
        let token = self.token_address()?;
        // setApprovalForAll/isApprovedForAll share selectors across both
        // token standards.
        let data = IErc1155::isApprovedForAllCall {
            account: self.client.account_address(),
            operator,
        }
        .abi_encode();
        let returned = self.client.provider().call(token, data).await?;
        let decoded = IErc1155::isApprovedForAllCall::abi_decode_returns(&returned, true)
            .map_err(|e| EvmError::AbiDecode(e.to_string()))?;
        Ok(decoded.approved)
    }

    /// Submits a `setApprovalForAll` transaction only when the operator is
    /// not yet approved.
    pub async fn approve_if_needed(
        &self,
        operator: Address,
    ) -> Result<Option<EvmTransaction>, EvmError> {
        if self.is_approved_for_all(operator).await? {
            return Ok(None);
        }
        let token = self.token_address()?;
        let data = IErc1155::setApprovalForAllCall {
            operator,
            approved: true,
        }
        .abi_encode();
        let hash = self.client.provider().send(token, data, U256::ZERO).await?;
        tracing::debug!(%operator, tx = %hash, "submitted setApprovalForAll");
        Ok(Some(EvmTransaction::new(hash)))
    }

    // --- Sale flow ---

    async fn sale_nonce(&self) -> Result<u64, EvmError> {
        let holder = self.client.contracts().address(self.kinds.nonce_holder)?;
        let data = ISaleNonceHolder::getNonceCall {
            token: self.token_address()?,
            tokenId: self.token_id_uint()?,
            owner: self.client.account_address(),
        }
        .abi_encode();
        let returned = self.client.provider().call(holder, data).await?;
        let decoded = ISaleNonceHolder::getNonceCall::abi_decode_returns(&returned, true)
            .map_err(|e| EvmError::AbiDecode(e.to_string()))?;
        u64::try_from(decoded.nonce).map_err(|_| EvmError::AbiDecode("nonce overflow".to_string()))
    }

    pub(crate) async fn put_for_sale_flow(
        &self,
        price: &Price,
        supply: u64,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<SaleOffer, EvmError> {
        let item = self.item()?.clone();
        let token = self.token_address()?;
        let token_id = self.token_id_uint()?;

        let proxy = self.client.contracts().address(ContractKind::TransferProxy)?;
        self.approve_if_needed(proxy).await?;

        let pay_token = self.payment_token(&price.currency)?;
        let amount = self.parse_currency(price)?;

        let nonce = self.sale_nonce().await?;
        let hash = sale_params_hash(token, token_id, pay_token, amount, supply, nonce);
        let signature = self.client.personal_sign(hash.as_slice()).await?;

        let blockchain_id = SaleId::new(nonce + 1, SaleVersion::V2).to_blockchain_id();
        tracing::debug!(%blockchain_id, token = %token, "submitting sale offer");

        let record = self
            .client
            .api()
            .create_offer(CreateOfferInput {
                token_id: item.token_id,
                contract_address: item.contract_address,
                kind: OfferKind::Sale,
                price: OfferPriceInput {
                    currency: price.currency.clone(),
                    amount: amount.to_string(),
                },
                supply,
                start_time: start_time.unwrap_or_else(Utc::now),
                end_time,
                signature: Some(format!("0x{}", hex::encode(&signature))),
                blockchain_id,
                voucher: None,
            })
            .await?;

        Ok(SaleOffer::new(record))
    }

    pub(crate) async fn cancel_sale_flow(
        &self,
        blockchain_id: Option<&str>,
    ) -> Result<EvmTransaction, EvmError> {
        let token = self.token_address()?;
        let token_id = self.token_id_uint()?;
        if let Some(encoded) = blockchain_id {
            let sale_id: SaleId = encoded.parse().map_err(EvmError::from)?;
            tracing::debug!(raw = sale_id.raw, version = %sale_id.version, "cancelling sale");
        }
        let sale_contract = self.client.contracts().address(self.kinds.sale)?;
        let data = ISale::cancelCall {
            token,
            tokenId: token_id,
        }
        .abi_encode();
        let hash = self
            .client
            .provider()
            .send(sale_contract, data, U256::ZERO)
            .await?;
        Ok(EvmTransaction::new(hash))
    }

    // --- Purchase flow ---

    /// The shared purchase routine behind `buy` and `buy_using_voucher`.
    pub(crate) async fn buy_flow(
        &self,
        params: &BuyParams,
        voucher: Option<Vec<u8>>,
    ) -> Result<EvmTransaction, EvmError> {
        self.item()?;
        let token = self.token_address()?;
        let token_id = self.token_id_uint()?;

        let sale_id: SaleId = params.blockchain_id.parse().map_err(EvmError::from)?;
        tracing::debug!(raw = sale_id.raw, version = %sale_id.version, "buying");

        let pay_token = self.payment_token(&params.price.currency)?;
        let unit_amount = self.parse_currency(&params.price)?;
        let buying = params.amount.unwrap_or(1);
        let value = if self.is_native_currency(&params.price.currency)? {
            unit_amount * U256::from(buying)
        } else {
            U256::ZERO
        };

        let sale_contract = self.client.contracts().address(self.kinds.sale)?;
        let signature: Bytes = params.signature.clone().into();
        let data = match voucher {
            None => ISale::buyCall {
                token,
                tokenId: token_id,
                payToken: pay_token,
                amount: unit_amount,
                selling: U256::from(params.supply.max(1)),
                owner: params.owner,
                signature,
            }
            .abi_encode(),
            Some(voucher) => ISale::buyWithVoucherCall {
                token,
                tokenId: token_id,
                payToken: pay_token,
                amount: unit_amount,
                selling: U256::from(params.supply.max(1)),
                owner: params.owner,
                signature,
                voucher: voucher.into(),
            }
            .abi_encode(),
        };

        let hash = self.client.provider().send(sale_contract, data, value).await?;
        Ok(EvmTransaction::new(hash))
    }

    // --- Auction flows ---

    async fn resolve_auction_id(
        &self,
        provided: Option<u64>,
        owner: Option<Address>,
    ) -> Result<u64, EvmError> {
        if let Some(id) = provided {
            return Ok(id);
        }
        let auction = self.client.contracts().address(self.kinds.auction)?;
        let data = IAuction::getAuctionIdCall {
            token: self.token_address()?,
            tokenId: self.token_id_uint()?,
            owner: owner.unwrap_or_else(|| self.client.account_address()),
        }
        .abi_encode();
        let returned = self.client.provider().call(auction, data).await?;
        let decoded = IAuction::getAuctionIdCall::abi_decode_returns(&returned, true)
            .map_err(|e| EvmError::AbiDecode(e.to_string()))?;
        u64::try_from(decoded.auctionId)
            .map_err(|_| EvmError::AbiDecode("auction id overflow".to_string()))
    }

    pub(crate) async fn put_for_auction_flow(
        &self,
        params: &PutForAuctionParams,
    ) -> Result<(EvmTransaction, AuctionOffer), EvmError> {
        let item = self.item()?.clone();
        let token = self.token_address()?;
        let token_id = self.token_id_uint()?;

        let auction = self.client.contracts().address(self.kinds.auction)?;
        self.approve_if_needed(auction).await?;

        let pay_token = self.payment_token(&params.price.currency)?;
        let min_bid = self.parse_currency(&params.price)?;

        let data = IAuction::createAuctionCall {
            token,
            tokenId: token_id,
            payToken: pay_token,
            minBid: min_bid,
            startTime: U256::from(params.start_time.timestamp() as u64),
            endTime: U256::from(params.end_time.timestamp() as u64),
        }
        .abi_encode();
        let hash = self.client.provider().send(auction, data, U256::ZERO).await?;
        let tx = EvmTransaction::new(hash);

        let auction_id = self.resolve_auction_id(None, None).await?;
        let blockchain_id = SaleId::new(auction_id, SaleVersion::V2).to_blockchain_id();
        tracing::debug!(%blockchain_id, "auction created on-chain");

        let record = self
            .client
            .api()
            .create_offer(CreateOfferInput {
                token_id: item.token_id,
                contract_address: item.contract_address,
                kind: OfferKind::Auction,
                price: OfferPriceInput {
                    currency: params.price.currency.clone(),
                    amount: min_bid.to_string(),
                },
                supply: item.supply.unwrap_or(1),
                start_time: params.start_time,
                end_time: Some(params.end_time),
                signature: None,
                blockchain_id,
                voucher: None,
            })
            .await?;

        Ok((tx, AuctionOffer::new(record)))
    }

    pub(crate) async fn place_bid_flow(
        &self,
        price: &Price,
        auction_id: Option<u64>,
        owner: Option<Address>,
    ) -> Result<EvmTransaction, EvmError> {
        self.item()?;
        let auction = self.client.contracts().address(self.kinds.auction)?;
        let id = self.resolve_auction_id(auction_id, owner).await?;
        let amount = self.parse_currency(price)?;

        let value = if self.is_native_currency(&price.currency)? {
            amount
        } else {
            // ERC-20 bids escrow through the auction contract.
            let pay_token = self.payment_token(&price.currency)?;
            let approve = IErc20::approveCall {
                spender: auction,
                amount,
            }
            .abi_encode();
            self.client.provider().send(pay_token, approve, U256::ZERO).await?;
            U256::ZERO
        };

        let data = IAuction::placeBidCall {
            auctionId: U256::from(id),
            amount,
        }
        .abi_encode();
        let hash = self.client.provider().send(auction, data, value).await?;
        Ok(EvmTransaction::new(hash))
    }

    pub(crate) async fn cancel_auction_flow(
        &self,
        auction_id: Option<u64>,
        owner: Option<Address>,
    ) -> Result<EvmTransaction, EvmError> {
        self.item()?;
        let auction = self.client.contracts().address(self.kinds.auction)?;
        let id = self.resolve_auction_id(auction_id, owner).await?;
        let data = IAuction::cancelAuctionCall {
            auctionId: U256::from(id),
        }
        .abi_encode();
        let hash = self.client.provider().send(auction, data, U256::ZERO).await?;
        Ok(EvmTransaction::new(hash))
    }

    pub(crate) async fn end_auction_flow(
        &self,
        auction_id: Option<u64>,
        owner: Option<Address>,
    ) -> Result<EvmTransaction, EvmError> {
        self.item()?;
        let auction = self.client.contracts().address(self.kinds.auction)?;
        let id = self.resolve_auction_id(auction_id, owner).await?;
        let data = IAuction::endAuctionCall {
            auctionId: U256::from(id),
        }
        .abi_encode();
        let hash = self.client.provider().send(auction, data, U256::ZERO).await?;
        Ok(EvmTransaction::new(hash))
    }

    // --- Airdrop ---

    pub(crate) async fn airdrop_flow(
        &self,
        recipients: Vec<Address>,
    ) -> Result<EvmTransaction, EvmError> {
        let item = self.item()?;
        if let Some(supply) = item.supply {
            if recipients.len() as u64 > supply {
                return Err(CoreError::InvalidAmount(format!(
                    "airdrop needs {} editions, supply is {supply}",
                    recipients.len()
                ))
                .into());
            }
        }
        let token = self.token_address()?;
        let token_id = self.token_id_uint()?;

        let airdrop = self.client.contracts().address(self.kinds.airdrop)?;
        self.approve_if_needed(airdrop).await?;

        let data = IAirdrop::airdropCall {
            token,
            tokenIds: vec![token_id; recipients.len()],
            recipients,
        }
        .abi_encode();
        let hash = self.client.provider().send(airdrop, data, U256::ZERO).await?;
        Ok(EvmTransaction::new(hash))
    }

    // --- Metadata ---

    pub(crate) async fn refresh_metadata(&self) -> Result<bool, EvmError> {
        let item = self.item()?;
        Ok(self
            .client
            .api()
            .refresh_metadata(RefreshMetadataInput {
                token_id: item.token_id.clone(),
                contract_address: item.contract_address.clone(),
                chain_id: item.chain_id,
                kind: self.token_type,
            })
            .await?)
    }
}
