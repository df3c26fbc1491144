//! EVM-side client for the `bazaar` marketplace SDK.
//!
//! This crate turns marketplace actions (sale, auction, transfer, burn,
//! bid, airdrop) into EVM contract calls plus the accompanying API
//! mutation. It holds no state of its own: the signer/provider arrives
//! from the caller behind the [`provider::EvmProvider`] trait, contract
//! addresses live in an explicit [`contracts::ContractRegistry`], and
//! every chain or API failure propagates unmodified — no retry, no
//! rollback.
//!
//! # Key Components
//!
//! *   [`client::EvmClient`]: the facade holding the provider, the API
//!     client, and the contract registry; its `create_nft` method
//!     dispatches a [`bazaar_core::TokenType`] tag to a concrete handler.
//! *   [`nft::EvmNft`]: the capability trait every handler implements,
//!     with [`nft::Erc721Nft`] and [`nft::Erc1155Nft`] as the concrete
//!     variants.
//! *   [`provider::NodeProvider`]: a JSON-RPC provider for nodes that
//!     manage their own accounts; anything else implements the trait.

pub mod client;
/// `sol!`-declared contract interfaces and the per-chain address registry.
pub mod contracts;
pub mod error;
pub mod nft;
pub mod provider;
/// Sale-parameter hashing shared by sale creation and purchase.
pub mod sale;
pub mod transaction;

pub use client::EvmClient;
pub use contracts::{ContractKind, ContractRegistry};
pub use error::EvmError;
pub use nft::{BuyParams, Erc1155Nft, Erc721Nft, EvmNft, PutForAuctionParams, PutForSaleParams};
pub use provider::{EvmProvider, NodeProvider};
pub use transaction::EvmTransaction;
