//! The caller-supplied wallet capability.

use crate::error::SolanaError;
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};

/// A trait abstracting the wallet the SDK acts as.
///
/// The SDK holds a shared reference only; key custody stays with the
/// caller (an in-process keypair, a remote signer bridge, a test wallet).
pub trait SolanaWallet: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    /// Signs an arbitrary message (off-chain sale parameters).
    fn sign_message(&self, message: &[u8]) -> Result<Signature, SolanaError>;

    /// Signs the transaction as the fee payer for the given blockhash.
    fn sign_transaction(
        &self,
        transaction: &mut Transaction,
        blockhash: Hash,
    ) -> Result<(), SolanaError>;
}

impl SolanaWallet for Keypair {
    fn pubkey(&self) -> Pubkey {
        Signer::pubkey(self)
    }

    fn sign_message(&self, message: &[u8]) -> Result<Signature, SolanaError> {
        self.try_sign_message(message)
            .map_err(|e| SolanaError::Signer(e.to_string()))
    }

    fn sign_transaction(
        &self,
        transaction: &mut Transaction,
        blockhash: Hash,
    ) -> Result<(), SolanaError> {
        transaction
            .try_partial_sign(&[self], blockhash)
            .map_err(|e| SolanaError::Signer(e.to_string()))
    }
}
