use crate::chain::ChainId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The token-standard tag that selects a concrete handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    Erc721,
    Erc1155,
    Spl,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenType::Erc721 => "ERC721",
            TokenType::Erc1155 => "ERC1155",
            TokenType::Spl => "SPL",
        };
        write!(f, "{s}")
    }
}

/// Identifies an NFT: contract address, chain, token id, optional supply.
///
/// Immutable once constructed; handlers replace it wholesale via their
/// explicit `set_item` method when a flow needs to rebind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescriptor {
    pub contract_address: String,
    pub chain_id: ChainId,
    pub token_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supply: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<u64>,
}

impl ItemDescriptor {
    pub fn new(
        contract_address: impl Into<String>,
        chain_id: ChainId,
        token_id: impl Into<String>,
    ) -> Self {
        Self {
            contract_address: contract_address.into(),
            chain_id,
            token_id: token_id.into(),
            supply: None,
            total_supply: None,
        }
    }

    pub fn with_supply(mut self, supply: u64, total_supply: u64) -> Self {
        self.supply = Some(supply);
        self.total_supply = Some(total_supply);
        self
    }
}
