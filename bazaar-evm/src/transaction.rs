use alloy_primitives::B256;

/// A thin wrapper around a submitted transaction's hash.
///
/// No state is kept beyond the handle itself; confirmation tracking is
/// the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvmTransaction {
    tx_hash: B256,
}

impl EvmTransaction {
    pub fn new(tx_hash: B256) -> Self {
        Self { tx_hash }
    }

    pub fn hash(&self) -> B256 {
        self.tx_hash
    }
}
