use crate::batch::InstructionBatch;
use crate::error::SolanaError;
use crate::programs::{
    self, MAX_VAULT_SIZE, MINT_SIZE, TOKEN_ACCOUNT_SIZE, TOKEN_PROGRAM_ID, VAULT_PROGRAM_ID,
};
use crate::rpc::AsyncRpcClient;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use solana_system_interface::instruction as system_instruction;

#[derive(Debug, Clone, Copy)]
pub struct VaultAccounts {
    pub vault: Pubkey,
    pub fraction_mint: Pubkey,
    pub redeem_treasury: Pubkey,
    pub fraction_treasury: Pubkey,
}

/// Allocates and initializes everything an uninitialized vault needs:
/// a fractional share mint, treasuries for redemption and shares, and
/// the vault account itself. Both treasuries are owned by the vault
/// authority PDA so the program can move funds without extra signers.
pub async fn create_vault(
    rpc: &dyn AsyncRpcClient,
    payer: &Pubkey,
    external_price_account: &Pubkey,
    price_mint: &Pubkey,
) -> Result<(InstructionBatch, VaultAccounts), SolanaError> {
    let vault = Keypair::new();
    let fraction_mint = Keypair::new();
    let redeem_treasury = Keypair::new();
    let fraction_treasury = Keypair::new();

    let (vault_authority, _) = programs::vault_authority_pda(&vault.pubkey());

    let mint_rent = rpc.get_minimum_balance_for_rent_exemption(MINT_SIZE).await?;
    let account_rent = rpc
        .get_minimum_balance_for_rent_exemption(TOKEN_ACCOUNT_SIZE)
        .await?;
    let vault_rent = rpc
        .get_minimum_balance_for_rent_exemption(MAX_VAULT_SIZE)
        .await?;

    let mut batch = InstructionBatch::new();

    batch.add_instruction(system_instruction::create_account(
        payer,
        &fraction_mint.pubkey(),
        mint_rent,
        MINT_SIZE as u64,
        &TOKEN_PROGRAM_ID,
    ));
    batch.add_instruction(programs::initialize_mint(
        &fraction_mint.pubkey(),
        &vault_authority,
        0,
    ));

    batch.add_instruction(system_instruction::create_account(
        payer,
        &redeem_treasury.pubkey(),
        account_rent,
        TOKEN_ACCOUNT_SIZE as u64,
        &TOKEN_PROGRAM_ID,
    ));
    batch.add_instruction(programs::initialize_account(
        &redeem_treasury.pubkey(),
        price_mint,
        &vault_authority,
    ));

    batch.add_instruction(system_instruction::create_account(
        payer,
        &fraction_treasury.pubkey(),
        account_rent,
        TOKEN_ACCOUNT_SIZE as u64,
        &TOKEN_PROGRAM_ID,
    ));
    batch.add_instruction(programs::initialize_account(
        &fraction_treasury.pubkey(),
        &fraction_mint.pubkey(),
        &vault_authority,
    ));

    batch.add_instruction(system_instruction::create_account(
        payer,
        &vault.pubkey(),
        vault_rent,
        MAX_VAULT_SIZE as u64,
        &VAULT_PROGRAM_ID,
    ));
    batch.add_instruction(programs::init_vault(
        &vault.pubkey(),
        &fraction_mint.pubkey(),
        &redeem_treasury.pubkey(),
        &fraction_treasury.pubkey(),
        external_price_account,
        &vault_authority,
        false,
    )?);

    let accounts = VaultAccounts {
        vault: vault.pubkey(),
        fraction_mint: fraction_mint.pubkey(),
        redeem_treasury: redeem_treasury.pubkey(),
        fraction_treasury: fraction_treasury.pubkey(),
    };

    batch.add_signer(vault);
    batch.add_signer(fraction_mint);
    batch.add_signer(redeem_treasury);
    batch.add_signer(fraction_treasury);

    tracing::debug!(vault = %accounts.vault, "prepared vault");
    Ok((batch, accounts))
}
