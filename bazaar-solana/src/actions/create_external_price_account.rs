use crate::batch::InstructionBatch;
use crate::error::SolanaError;
use crate::programs::{
    self, ExternalPriceAccountData, MAX_EXTERNAL_ACCOUNT_SIZE, NATIVE_MINT, VAULT_PROGRAM_ID,
};
use crate::rpc::AsyncRpcClient;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use solana_system_interface::instruction as system_instruction;

const EXTERNAL_ACCOUNT_KEY: u8 = 2;

#[derive(Debug, Clone, Copy)]
pub struct ExternalPriceAccount {
    pub account: Pubkey,
    pub price_mint: Pubkey,
}

/// Allocates a price account owned by the vault program and writes its
/// initial pricing data. Prices are quoted in the native mint and the
/// vault is allowed to combine from the start.
pub async fn create_external_price_account(
    rpc: &dyn AsyncRpcClient,
    payer: &Pubkey,
) -> Result<(InstructionBatch, ExternalPriceAccount), SolanaError> {
    let epa = Keypair::new();
    let account = epa.pubkey();
    let rent = rpc
        .get_minimum_balance_for_rent_exemption(MAX_EXTERNAL_ACCOUNT_SIZE)
        .await?;

    let mut batch = InstructionBatch::new();
    batch.add_instruction(system_instruction::create_account(
        payer,
        &account,
        rent,
        MAX_EXTERNAL_ACCOUNT_SIZE as u64,
        &VAULT_PROGRAM_ID,
    ));
    batch.add_instruction(programs::update_external_price_account(
        &account,
        &ExternalPriceAccountData {
            key: EXTERNAL_ACCOUNT_KEY,
            price_per_share: 0,
            price_mint: NATIVE_MINT.to_bytes(),
            allowed_to_combine: true,
        },
    )?);
    batch.add_signer(epa);

    tracing::debug!(%account, "prepared external price account");
    Ok((
        batch,
        ExternalPriceAccount {
            account,
            price_mint: NATIVE_MINT,
        },
    ))
}
