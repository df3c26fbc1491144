//! Multi-instruction preparation steps for the auction flow.
//!
//! Each action assembles an [`InstructionBatch`](crate::batch::InstructionBatch)
//! and returns the addresses it created. Batches are submitted in order
//! by the client; none of them touch the network themselves beyond rent
//! queries.

mod create_external_price_account;
mod create_vault;
mod make_auction;

pub use create_external_price_account::{create_external_price_account, ExternalPriceAccount};
pub use create_vault::{create_vault, VaultAccounts};
pub use make_auction::make_auction;
