//! Shared foundation types for the `bazaar` marketplace SDK.
//!
//! This crate carries everything the chain-specific crates
//! (`bazaar-evm`, `bazaar-solana`) and the API client (`bazaar-api`)
//! agree on, without pulling in any chain or network dependency:
//!
//! * [`chain`]: the static chain configuration registry and supported
//!   currency lookups.
//! * [`item`]: the item descriptor identifying an NFT and the
//!   [`item::TokenType`] tag used for handler dispatch.
//! * [`price`]: decimal prices and the pure smallest-unit conversion.
//! * [`sale_id`]: the composite sale identifier (`raw id` + version tag)
//!   that round-trips through its string encoding.
//! * [`offer`]: server-side offer records returned by the marketplace API.

pub mod chain;
pub mod error;
pub mod item;
pub mod offer;
pub mod price;
pub mod sale_id;

pub use chain::{chain_config, ChainConfig, ChainId, ChainKind, Currency};
pub use error::Error;
pub use item::{ItemDescriptor, TokenType};
pub use offer::{AuctionOffer, OfferKind, OfferRecord, SaleOffer};
pub use price::{parse_units, Price};
pub use sale_id::{SaleId, SaleVersion};
