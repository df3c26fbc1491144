//! Instruction batches.
//!
//! A multi-step flow (vault setup, auction creation) produces several
//! transactions; each [`InstructionBatch`] holds one transaction's
//! instructions plus the extra signers it needs beyond the fee payer.
//! The client submits a [`BatchSet`] sequentially, stopping at the first
//! failure.

use solana_sdk::{instruction::Instruction, signature::Keypair};

#[derive(Default)]
pub struct InstructionBatch {
    instructions: Vec<Instruction>,
    signers: Vec<Keypair>,
}

impl InstructionBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_instruction(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn add_signer(&mut self, signer: Keypair) {
        self.signers.push(signer);
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn signers(&self) -> &[Keypair] {
        &self.signers
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// An ordered collection of batches, one transaction each.
#[derive(Default)]
pub struct BatchSet {
    batches: Vec<InstructionBatch>,
}

impl BatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, batch: InstructionBatch) {
        if !batch.is_empty() {
            self.batches.push(batch);
        }
    }

    pub fn batches(&self) -> &[InstructionBatch] {
        &self.batches
    }
}
