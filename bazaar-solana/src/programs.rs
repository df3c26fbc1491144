//! External program ids and instruction layouts.
//!
//! The token, vault, and auction programs are versioned external
//! contracts; only the instructions the SDK submits are laid out here.
//! Pubkeys inside borsh payloads travel as raw 32-byte arrays.

use crate::error::SolanaError;
use borsh::BorshSerialize;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::{system_program, sysvar};

pub const TOKEN_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
pub const VAULT_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("vau1zxA2LbssAUEF7Gpw91zMM1LvXrvpzJtmZ58rPsn");
pub const AUCTION_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("auctxRXPeJoc4817jDhf4HbjnhEcr1cCXenosMhK5R8");
pub const NATIVE_MINT: Pubkey =
    Pubkey::from_str_const("So11111111111111111111111111111111111111112");

pub const AUCTION_PREFIX: &[u8] = b"auction";
pub const VAULT_PREFIX: &[u8] = b"vault";

/// key + price_per_share + price_mint + allowed_to_combine
pub const MAX_EXTERNAL_ACCOUNT_SIZE: usize = 1 + 8 + 32 + 1;
pub const MAX_VAULT_SIZE: usize = 1 + 32 + 32 + 32 + 32 + 1 + 8 + 1 + 1 + 1 + 8;

pub const MINT_SIZE: usize = 82;
pub const TOKEN_ACCOUNT_SIZE: usize = 165;

fn with_tag(tag: u8, args: &impl BorshSerialize) -> Result<Vec<u8>, SolanaError> {
    let mut data = vec![tag];
    args.serialize(&mut data)
        .map_err(|e| SolanaError::Encode(e.to_string()))?;
    Ok(data)
}

// --- SPL token program ---

fn token_amount_data(tag: u8, amount: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(9);
    data.push(tag);
    data.extend_from_slice(&amount.to_le_bytes());
    data
}

/// The associated token account for `(wallet, mint)`.
pub fn associated_token_address(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[wallet.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .0
}

pub fn create_associated_token_account(
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(associated_token_address(owner, mint), false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data: Vec::new(),
    }
}

/// SPL token `InitializeMint` (tag 0), no freeze authority.
pub fn initialize_mint(mint: &Pubkey, authority: &Pubkey, decimals: u8) -> Instruction {
    let mut data = Vec::with_capacity(35);
    data.push(0);
    data.push(decimals);
    data.extend_from_slice(authority.as_ref());
    data.push(0);
    Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*mint, false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
        ],
        data,
    }
}

/// SPL token `InitializeAccount` (tag 1).
pub fn initialize_account(account: &Pubkey, mint: &Pubkey, owner: &Pubkey) -> Instruction {
    Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*account, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
        ],
        data: vec![1],
    }
}

/// SPL token `Transfer` (tag 3).
pub fn spl_transfer(
    source: &Pubkey,
    destination: &Pubkey,
    owner: &Pubkey,
    amount: u64,
) -> Instruction {
    Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*source, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*owner, true),
        ],
        data: token_amount_data(3, amount),
    }
}

/// SPL token `Burn` (tag 8).
pub fn spl_burn(account: &Pubkey, mint: &Pubkey, owner: &Pubkey, amount: u64) -> Instruction {
    Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*account, false),
            AccountMeta::new(*mint, false),
            AccountMeta::new_readonly(*owner, true),
        ],
        data: token_amount_data(8, amount),
    }
}

// --- Token-vault program ---

#[derive(Debug, Clone, BorshSerialize)]
pub struct ExternalPriceAccountData {
    pub key: u8,
    pub price_per_share: u64,
    pub price_mint: [u8; 32],
    pub allowed_to_combine: bool,
}

/// The authority PDA that signs on behalf of a vault.
pub fn vault_authority_pda(vault: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[VAULT_PREFIX, VAULT_PROGRAM_ID.as_ref(), vault.as_ref()],
        &VAULT_PROGRAM_ID,
    )
}

/// Vault `UpdateExternalPriceAccount` (tag 9).
pub fn update_external_price_account(
    external_price_account: &Pubkey,
    data: &ExternalPriceAccountData,
) -> Result<Instruction, SolanaError> {
    Ok(Instruction {
        program_id: VAULT_PROGRAM_ID,
        accounts: vec![AccountMeta::new(*external_price_account, false)],
        data: with_tag(9, data)?,
    })
}

/// Vault `InitVault` (tag 0).
#[allow(clippy::too_many_arguments)]
pub fn init_vault(
    vault: &Pubkey,
    fraction_mint: &Pubkey,
    redeem_treasury: &Pubkey,
    fraction_treasury: &Pubkey,
    external_price_account: &Pubkey,
    authority: &Pubkey,
    allow_further_share_creation: bool,
) -> Result<Instruction, SolanaError> {
    Ok(Instruction {
        program_id: VAULT_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*fraction_mint, false),
            AccountMeta::new(*redeem_treasury, false),
            AccountMeta::new(*fraction_treasury, false),
            AccountMeta::new(*vault, false),
            AccountMeta::new_readonly(*authority, false),
            AccountMeta::new_readonly(*external_price_account, false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
        ],
        data: with_tag(0, &allow_further_share_creation)?,
    })
}

// --- Auction program ---

#[derive(Debug, Clone, BorshSerialize)]
pub struct CreateAuctionArgs {
    pub authority: [u8; 32],
    pub resource: [u8; 32],
    pub token_mint: [u8; 32],
    pub price_floor: u64,
    pub start_time: i64,
    pub end_time: i64,
}

/// The auction account PDA for a resource (a vault, typically).
pub fn auction_pda(resource: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[AUCTION_PREFIX, AUCTION_PROGRAM_ID.as_ref(), resource.as_ref()],
        &AUCTION_PROGRAM_ID,
    )
}

/// Auction `CreateAuction` (tag 0).
pub fn create_auction(
    payer: &Pubkey,
    resource: &Pubkey,
    args: &CreateAuctionArgs,
) -> Result<Instruction, SolanaError> {
    let (auction, _) = auction_pda(resource);
    Ok(Instruction {
        program_id: AUCTION_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(auction, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: with_tag(0, args)?,
    })
}

/// Auction `PlaceBid` (tag 1).
pub fn place_bid(
    bidder: &Pubkey,
    resource: &Pubkey,
    amount: u64,
) -> Result<Instruction, SolanaError> {
    let (auction, _) = auction_pda(resource);
    Ok(Instruction {
        program_id: AUCTION_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*bidder, true),
            AccountMeta::new(auction, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: with_tag(1, &amount)?,
    })
}

/// Auction `CancelAuction` (tag 2).
pub fn cancel_auction(authority: &Pubkey, resource: &Pubkey) -> Result<Instruction, SolanaError> {
    let (auction, _) = auction_pda(resource);
    Ok(Instruction {
        program_id: AUCTION_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(auction, false),
        ],
        data: with_tag(2, &())?,
    })
}

/// Auction `EndAuction` (tag 3).
pub fn end_auction(authority: &Pubkey, resource: &Pubkey) -> Result<Instruction, SolanaError> {
    let (auction, _) = auction_pda(resource);
    Ok(Instruction {
        program_id: AUCTION_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(auction, false),
        ],
        data: with_tag(3, &())?,
    })
}
