//! Solana-side client for the `bazaar` marketplace SDK.
//!
//! This crate turns marketplace actions into manually constructed program
//! instructions — SPL token transfers and burns, token-vault setup, and
//! auction-program calls — submitted through the [`rpc::AsyncRpcClient`]
//! seam. The wallet arrives from the caller behind the
//! [`wallet::SolanaWallet`] trait; the SDK signs nothing itself and keeps
//! no local state.
//!
//! # Key Components
//!
//! *   [`client::SolanaClient`]: the facade holding the wallet, RPC
//!     client, and API client; `create_nft` dispatches the SPL handler.
//! *   [`nft::SplNft`]: the handler implementing the uniform operation
//!     set over program instructions and API mutations.
//! *   [`actions`]: vault and auction instruction builders (external
//!     price account, vault creation, auction creation).
//! *   [`batch::InstructionBatch`]: one transaction's instructions plus
//!     the extra signers it needs, submitted sequentially.

pub mod actions;
pub mod batch;
pub mod client;
pub mod error;
pub mod nft;
/// Program ids, PDAs, and instruction layouts for the external programs.
pub mod programs;
pub mod rpc;
pub mod transaction;
pub mod wallet;

pub use batch::{BatchSet, InstructionBatch};
pub use client::SolanaClient;
pub use error::SolanaError;
pub use nft::{
    SolanaAuction, SolanaAuctionParams, SolanaBuyParams, SolanaNft, SolanaSaleParams, SplNft,
};
pub use rpc::AsyncRpcClient;
pub use transaction::SolanaTransaction;
pub use wallet::SolanaWallet;
