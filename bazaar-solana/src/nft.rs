//! The SPL handler: the capability trait and the operation flows.
//!
//! One token standard exists on this side, so the flows live directly on
//! [`SplNft`]. Every flow is a sequential chain of fallible calls; a
//! failure surfaces immediately and leaves already submitted
//! transactions in place.

use crate::actions;
use crate::batch::InstructionBatch;
use crate::client::SolanaClient;
use crate::error::SolanaError;
use crate::programs::{self, NATIVE_MINT};
use crate::transaction::SolanaTransaction;
use async_trait::async_trait;
use bazaar_api::{CreateOfferInput, OfferPriceInput, RefreshMetadataInput};
use bazaar_core::{
    chain, AuctionOffer, ChainConfig, ChainId, Error as CoreError, ItemDescriptor, OfferKind,
    Price, SaleId, SaleOffer, SaleVersion, TokenType,
};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;
use solana_system_interface::instruction as system_instruction;
use std::str::FromStr;
use std::sync::Arc;

/// Parameters for `put_for_sale`.
#[derive(Debug, Clone)]
pub struct SolanaSaleParams {
    pub price: Price,
    /// Number of editions to list. Clamped to at least 1.
    pub supply: u64,
    /// Defaults to now when unset.
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// Parameters for `buy`: the listing as echoed by the server.
#[derive(Debug, Clone)]
pub struct SolanaBuyParams {
    /// The composite sale identifier to redeem.
    pub blockchain_id: String,
    /// Per-edition price.
    pub price: Price,
    /// The seller's wallet address.
    pub owner: String,
    /// Editions being bought. Defaults to 1.
    pub amount: Option<u64>,
}

/// Parameters for `put_for_auction`.
#[derive(Debug, Clone)]
pub struct SolanaAuctionParams {
    /// The minimum bid.
    pub price: Price,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// The result of `put_for_auction`: the server-side offer plus the
/// on-chain addresses later operations are addressed to.
#[derive(Debug, Clone)]
pub struct SolanaAuction {
    pub offer: AuctionOffer,
    /// The vault the auction was created over; the resource later
    /// bid/cancel/end calls reference.
    pub vault: Pubkey,
    /// The auction PDA the program allocated.
    pub auction: Pubkey,
    /// The setup transactions, in submission order.
    pub transactions: Vec<SolanaTransaction>,
}

/// The uniform operation set the Solana-side handler provides.
///
/// Operations needing the item descriptor fail with
/// [`bazaar_core::Error::MissingItem`] when none is set.
#[async_trait]
pub trait SolanaNft: Send + Sync {
    fn token_type(&self) -> TokenType;

    fn item(&self) -> Result<&ItemDescriptor, SolanaError>;

    /// Rebinds the handler to another item on the same registry of chains.
    fn set_item(&mut self, item: ItemDescriptor) -> Result<(), SolanaError>;

    async fn put_for_sale(&self, params: SolanaSaleParams) -> Result<SaleOffer, SolanaError>;

    async fn transfer(
        &self,
        recipient: &str,
        amount: u64,
    ) -> Result<SolanaTransaction, SolanaError>;

    async fn burn(&self, amount: u64) -> Result<SolanaTransaction, SolanaError>;

    async fn buy(&self, params: SolanaBuyParams) -> Result<SolanaTransaction, SolanaError>;

    async fn cancel_sale(&self, offer_id: &str) -> Result<bool, SolanaError>;

    async fn put_for_auction(
        &self,
        params: SolanaAuctionParams,
    ) -> Result<SolanaAuction, SolanaError>;

    async fn place_bid(
        &self,
        auction_resource: &str,
        bid: Price,
    ) -> Result<SolanaTransaction, SolanaError>;

    async fn cancel_auction(
        &self,
        auction_resource: &str,
    ) -> Result<SolanaTransaction, SolanaError>;

    async fn end_auction(&self, auction_resource: &str)
        -> Result<SolanaTransaction, SolanaError>;

    async fn airdrop(&self, recipients: &[String]) -> Result<SolanaTransaction, SolanaError>;

    async fn refresh_metadata(&self) -> Result<bool, SolanaError>;
}

/// The SPL token handler.
pub struct SplNft {
    client: Arc<SolanaClient>,
    chain: &'static ChainConfig,
    item: Option<ItemDescriptor>,
}

impl SplNft {
    pub(crate) fn new(
        client: Arc<SolanaClient>,
        item: ItemDescriptor,
    ) -> Result<Self, SolanaError> {
        let chain = chain::require_chain(item.chain_id)?;
        Ok(Self {
            client,
            chain,
            item: Some(item),
        })
    }

    /// A handler bound to a chain but no item yet.
    pub fn detached(client: Arc<SolanaClient>, chain_id: ChainId) -> Result<Self, SolanaError> {
        let chain = chain::require_chain(chain_id)?;
        Ok(Self {
            client,
            chain,
            item: None,
        })
    }

    fn item_ref(&self) -> Result<&ItemDescriptor, SolanaError> {
        Ok(self.item.as_ref().ok_or(CoreError::MissingItem)?)
    }

    /// The item's mint address.
    fn mint(&self) -> Result<Pubkey, SolanaError> {
        Ok(Pubkey::from_str(&self.item_ref()?.contract_address)?)
    }

    /// The mint prices in a currency are settled in. Native prices map to
    /// the wrapped-SOL mint.
    fn payment_mint(&self, symbol: &str) -> Result<Pubkey, SolanaError> {
        let currency = self.chain.currency(symbol)?;
        if currency.native {
            Ok(NATIVE_MINT)
        } else {
            Ok(Pubkey::from_str(&currency.address)?)
        }
    }

    /// Converts a decimal price into the currency's smallest unit.
    fn unit_amount(&self, price: &Price) -> Result<u64, SolanaError> {
        let currency = self.chain.currency(&price.currency)?;
        let units = price.in_smallest_unit(currency.decimals)?;
        Ok(u64::try_from(units).map_err(|_| CoreError::InvalidAmount(price.amount.to_string()))?)
    }

    /// The associated account for `(owner, mint)`, creating it in the
    /// batch when it does not exist yet.
    async fn ensure_associated_account(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
        batch: &mut InstructionBatch,
    ) -> Result<Pubkey, SolanaError> {
        let account = programs::associated_token_address(owner, mint);
        if !self.client.rpc().account_exists(&account).await? {
            batch.add_instruction(programs::create_associated_token_account(
                &self.client.wallet().pubkey(),
                owner,
                mint,
            ));
        }
        Ok(account)
    }

    /// The deterministic digest the seller signs: mint, token id, payment
    /// mint, smallest-unit amount, and supply, in order.
    fn sale_digest(
        &self,
        mint: &Pubkey,
        payment_mint: &Pubkey,
        unit_amount: u64,
        supply: u64,
    ) -> Result<[u8; 32], SolanaError> {
        let item = self.item_ref()?;
        let mut hasher = Sha256::new();
        hasher.update(mint.as_ref());
        hasher.update(item.token_id.as_bytes());
        hasher.update(payment_mint.as_ref());
        hasher.update(unit_amount.to_le_bytes());
        hasher.update(supply.to_le_bytes());
        Ok(hasher.finalize().into())
    }
}

#[async_trait]
impl SolanaNft for SplNft {
    fn token_type(&self) -> TokenType {
        TokenType::Spl
    }

    fn item(&self) -> Result<&ItemDescriptor, SolanaError> {
        self.item_ref()
    }

    fn set_item(&mut self, item: ItemDescriptor) -> Result<(), SolanaError> {
        self.chain = chain::require_chain(item.chain_id)?;
        self.item = Some(item);
        Ok(())
    }

    async fn put_for_sale(&self, params: SolanaSaleParams) -> Result<SaleOffer, SolanaError> {
        let item = self.item_ref()?.clone();
        let supply = params.supply.max(1);
        let mint = self.mint()?;
        let payment_mint = self.payment_mint(&params.price.currency)?;
        let unit_amount = self.unit_amount(&params.price)?;

        let digest = self.sale_digest(&mint, &payment_mint, unit_amount, supply)?;
        let signature = self.client.wallet().sign_message(&digest)?;

        // The digest prefix doubles as the raw sale id; it is stable for
        // identical sale parameters and survives the composite encoding.
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&digest[..8]);
        let sale_id = SaleId::new(u64::from_le_bytes(raw), SaleVersion::V2);

        tracing::info!(%mint, supply, blockchain_id = %sale_id, "listing item for sale");
        let record = self
            .client
            .api()
            .create_offer(CreateOfferInput {
                token_id: item.token_id,
                contract_address: item.contract_address,
                kind: OfferKind::Sale,
                price: OfferPriceInput {
                    currency: params.price.currency.clone(),
                    amount: unit_amount.to_string(),
                },
                supply,
                start_time: params.start_time.unwrap_or_else(Utc::now),
                end_time: params.end_time,
                signature: Some(signature.to_string()),
                blockchain_id: sale_id.to_blockchain_id(),
                voucher: None,
            })
            .await?;
        Ok(SaleOffer::new(record))
    }

    async fn transfer(
        &self,
        recipient: &str,
        amount: u64,
    ) -> Result<SolanaTransaction, SolanaError> {
        let mint = self.mint()?;
        let owner = self.client.wallet().pubkey();
        let recipient = Pubkey::from_str(recipient)?;

        let mut batch = InstructionBatch::new();
        let source = programs::associated_token_address(&owner, &mint);
        let destination = self
            .ensure_associated_account(&recipient, &mint, &mut batch)
            .await?;
        batch.add_instruction(programs::spl_transfer(&source, &destination, &owner, amount));
        self.client.submit_batch(&batch).await
    }

    async fn burn(&self, amount: u64) -> Result<SolanaTransaction, SolanaError> {
        let mint = self.mint()?;
        let owner = self.client.wallet().pubkey();
        let account = programs::associated_token_address(&owner, &mint);

        let mut batch = InstructionBatch::new();
        batch.add_instruction(programs::spl_burn(&account, &mint, &owner, amount));
        self.client.submit_batch(&batch).await
    }

    async fn buy(&self, params: SolanaBuyParams) -> Result<SolanaTransaction, SolanaError> {
        self.item_ref()?;
        let sale_id: SaleId = params.blockchain_id.parse()?;
        let seller = Pubkey::from_str(&params.owner)?;
        let buyer = self.client.wallet().pubkey();

        let amount = params.amount.unwrap_or(1).max(1);
        let per_edition = self.unit_amount(&params.price)?;
        let total = per_edition
            .checked_mul(amount)
            .ok_or_else(|| CoreError::InvalidAmount(params.price.amount.to_string()))?;

        let currency = self.chain.currency(&params.price.currency)?;
        let mut batch = InstructionBatch::new();
        if currency.native {
            batch.add_instruction(system_instruction::transfer(&buyer, &seller, total));
        } else {
            let payment_mint = Pubkey::from_str(&currency.address)?;
            let source = programs::associated_token_address(&buyer, &payment_mint);
            let destination = self
                .ensure_associated_account(&seller, &payment_mint, &mut batch)
                .await?;
            batch.add_instruction(programs::spl_transfer(&source, &destination, &buyer, total));
        }

        tracing::info!(blockchain_id = %sale_id, amount, total, "buying item");
        self.client.submit_batch(&batch).await
    }

    async fn cancel_sale(&self, offer_id: &str) -> Result<bool, SolanaError> {
        self.item_ref()?;
        Ok(self.client.api().cancel_offer(offer_id).await?)
    }

    async fn put_for_auction(
        &self,
        params: SolanaAuctionParams,
    ) -> Result<SolanaAuction, SolanaError> {
        let item = self.item_ref()?.clone();
        let mint = self.mint()?;
        let payer = self.client.wallet().pubkey();
        let unit_floor = self.unit_amount(&params.price)?;

        let mut transactions = Vec::new();

        let (batch, price_account) =
            actions::create_external_price_account(self.client.rpc(), &payer).await?;
        transactions.push(self.client.submit_batch(&batch).await?);

        let (batch, vault) = actions::create_vault(
            self.client.rpc(),
            &payer,
            &price_account.account,
            &price_account.price_mint,
        )
        .await?;
        transactions.push(self.client.submit_batch(&batch).await?);

        let (batch, auction) = actions::make_auction(
            &payer,
            &vault.vault,
            &mint,
            unit_floor,
            params.start_time.timestamp(),
            params.end_time.timestamp(),
        )?;
        transactions.push(self.client.submit_batch(&batch).await?);

        tracing::info!(%mint, %auction, vault = %vault.vault, "created auction");
        let record = self
            .client
            .api()
            .create_offer(CreateOfferInput {
                token_id: item.token_id,
                contract_address: item.contract_address,
                kind: OfferKind::Auction,
                price: OfferPriceInput {
                    currency: params.price.currency.clone(),
                    amount: unit_floor.to_string(),
                },
                supply: item.supply.unwrap_or(1),
                start_time: params.start_time,
                end_time: Some(params.end_time),
                signature: None,
                blockchain_id: auction.to_string(),
                voucher: None,
            })
            .await?;

        Ok(SolanaAuction {
            offer: AuctionOffer::new(record),
            vault: vault.vault,
            auction,
            transactions,
        })
    }

    async fn place_bid(
        &self,
        auction_resource: &str,
        bid: Price,
    ) -> Result<SolanaTransaction, SolanaError> {
        self.item_ref()?;
        let resource = Pubkey::from_str(auction_resource)?;
        let bidder = self.client.wallet().pubkey();
        let amount = self.unit_amount(&bid)?;

        let mut batch = InstructionBatch::new();
        batch.add_instruction(programs::place_bid(&bidder, &resource, amount)?);
        self.client.submit_batch(&batch).await
    }

    async fn cancel_auction(
        &self,
        auction_resource: &str,
    ) -> Result<SolanaTransaction, SolanaError> {
        self.item_ref()?;
        let resource = Pubkey::from_str(auction_resource)?;
        let authority = self.client.wallet().pubkey();

        let mut batch = InstructionBatch::new();
        batch.add_instruction(programs::cancel_auction(&authority, &resource)?);
        self.client.submit_batch(&batch).await
    }

    async fn end_auction(
        &self,
        auction_resource: &str,
    ) -> Result<SolanaTransaction, SolanaError> {
        self.item_ref()?;
        let resource = Pubkey::from_str(auction_resource)?;
        let authority = self.client.wallet().pubkey();

        let mut batch = InstructionBatch::new();
        batch.add_instruction(programs::end_auction(&authority, &resource)?);
        self.client.submit_batch(&batch).await
    }

    async fn airdrop(&self, recipients: &[String]) -> Result<SolanaTransaction, SolanaError> {
        let item = self.item_ref()?;
        if let Some(supply) = item.supply {
            if supply < recipients.len() as u64 {
                return Err(CoreError::InvalidAmount(format!(
                    "supply {supply} does not cover {} recipients",
                    recipients.len()
                ))
                .into());
            }
        }

        let mint = self.mint()?;
        let owner = self.client.wallet().pubkey();
        let source = programs::associated_token_address(&owner, &mint);

        let mut batch = InstructionBatch::new();
        for recipient in recipients {
            let recipient = Pubkey::from_str(recipient)?;
            let destination = self
                .ensure_associated_account(&recipient, &mint, &mut batch)
                .await?;
            batch.add_instruction(programs::spl_transfer(&source, &destination, &owner, 1));
        }
        self.client.submit_batch(&batch).await
    }

    async fn refresh_metadata(&self) -> Result<bool, SolanaError> {
        let item = self.item_ref()?;
        Ok(self
            .client
            .api()
            .refresh_metadata(RefreshMetadataInput {
                token_id: item.token_id.clone(),
                contract_address: item.contract_address.clone(),
                chain_id: item.chain_id,
                kind: TokenType::Spl,
            })
            .await?)
    }
}
