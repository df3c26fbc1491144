use solana_sdk::signature::Signature;

/// A confirmed cluster transaction, identified by its signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolanaTransaction {
    signature: Signature,
}

impl SolanaTransaction {
    pub fn new(signature: Signature) -> Self {
        Self { signature }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

impl std::fmt::Display for SolanaTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.signature.fmt(f)
    }
}
