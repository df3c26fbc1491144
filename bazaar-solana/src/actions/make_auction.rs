use crate::batch::InstructionBatch;
use crate::error::SolanaError;
use crate::programs::{self, CreateAuctionArgs};
use solana_sdk::pubkey::Pubkey;

/// Builds the `CreateAuction` call for a vaulted resource and returns
/// the auction PDA the program will allocate.
pub fn make_auction(
    payer: &Pubkey,
    vault: &Pubkey,
    token_mint: &Pubkey,
    price_floor: u64,
    start_time: i64,
    end_time: i64,
) -> Result<(InstructionBatch, Pubkey), SolanaError> {
    let (auction, _) = programs::auction_pda(vault);
    let args = CreateAuctionArgs {
        authority: payer.to_bytes(),
        resource: vault.to_bytes(),
        token_mint: token_mint.to_bytes(),
        price_floor,
        start_time,
        end_time,
    };

    let mut batch = InstructionBatch::new();
    batch.add_instruction(programs::create_auction(payer, vault, &args)?);

    tracing::debug!(%auction, %vault, "prepared auction");
    Ok((batch, auction))
}
