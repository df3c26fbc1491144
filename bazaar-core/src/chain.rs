//! The static chain configuration registry.
//!
//! Each supported chain maps to a [`ChainConfig`] listing its currencies.
//! The registry is immutable process-wide data built once at first access;
//! handlers consult it at construction time and fail with
//! [`Error::UnsupportedChain`] for unknown ids.

use crate::error::Error;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A numeric chain identifier.
///
/// EVM chains use their canonical chain id; Solana clusters are assigned
/// ids in the 100 range, matching the cluster numbering convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    pub const ETHEREUM: ChainId = ChainId(1);
    pub const GOERLI: ChainId = ChainId(5);
    pub const BSC: ChainId = ChainId(56);
    pub const BSC_TESTNET: ChainId = ChainId(97);
    pub const POLYGON: ChainId = ChainId(137);
    pub const POLYGON_MUMBAI: ChainId = ChainId(80001);
    pub const SOLANA_MAINNET: ChainId = ChainId(101);
    pub const SOLANA_DEVNET: ChainId = ChainId(103);
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Distinguishes the contract model a chain runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainKind {
    Evm,
    Solana,
}

/// A currency accepted for offers on a given chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// The ticker symbol used in prices, e.g. `"ETH"`.
    pub symbol: String,
    /// The token contract address or mint. Empty for the native currency.
    pub address: String,
    /// The number of decimals in the smallest unit.
    pub decimals: u8,
    /// Whether this is the chain's native currency.
    pub native: bool,
}

/// Static, read-only configuration for one chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: ChainId,
    pub name: String,
    pub kind: ChainKind,
    pub supported_currencies: Vec<Currency>,
}

impl ChainConfig {
    /// Looks up a supported currency by its ticker symbol.
    pub fn currency(&self, symbol: &str) -> Result<&Currency, Error> {
        self.supported_currencies
            .iter()
            .find(|c| c.symbol == symbol)
            .ok_or_else(|| Error::UnsupportedCurrency(symbol.to_string()))
    }

    /// The payment token address for a currency symbol.
    pub fn payment_token(&self, symbol: &str) -> Result<&str, Error> {
        Ok(self.currency(symbol)?.address.as_str())
    }

    /// Whether the given symbol is the chain's native currency.
    pub fn is_native_currency(&self, symbol: &str) -> Result<bool, Error> {
        Ok(self.currency(symbol)?.native)
    }
}

fn currency(symbol: &str, address: &str, decimals: u8, native: bool) -> Currency {
    Currency {
        symbol: symbol.to_string(),
        address: address.to_string(),
        decimals,
        native,
    }
}

fn config(
    chain_id: ChainId,
    name: &str,
    kind: ChainKind,
    supported_currencies: Vec<Currency>,
) -> (ChainId, ChainConfig) {
    (
        chain_id,
        ChainConfig {
            chain_id,
            name: name.to_string(),
            kind,
            supported_currencies,
        },
    )
}

lazy_static! {
    static ref CHAIN_MAP: HashMap<ChainId, ChainConfig> = HashMap::from([
        config(
            ChainId::ETHEREUM,
            "Ethereum",
            ChainKind::Evm,
            vec![
                currency("ETH", "", 18, true),
                currency("WETH", "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2", 18, false),
                currency("USDC", "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", 6, false),
            ],
        ),
        config(
            ChainId::GOERLI,
            "Goerli",
            ChainKind::Evm,
            vec![
                currency("ETH", "", 18, true),
                currency("WETH", "0xB4FBF271143F4FBf7B91A5ded31805e42b2208d6", 18, false),
            ],
        ),
        config(
            ChainId::BSC,
            "BNB Smart Chain",
            ChainKind::Evm,
            vec![
                currency("BNB", "", 18, true),
                currency("BUSD", "0xe9e7CEA3DedcA5984780Bafc599bD69ADd087D56", 18, false),
                currency("USDT", "0x55d398326f99059fF775485246999027B3197955", 18, false),
            ],
        ),
        config(
            ChainId::BSC_TESTNET,
            "BNB Smart Chain Testnet",
            ChainKind::Evm,
            vec![
                currency("BNB", "", 18, true),
                currency("BUSD", "0xeD24FC36d5Ee211Ea25A80239Fb8C4Cfd80f12Ee", 18, false),
            ],
        ),
        config(
            ChainId::POLYGON,
            "Polygon",
            ChainKind::Evm,
            vec![
                currency("MATIC", "", 18, true),
                currency("USDC", "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174", 6, false),
            ],
        ),
        config(
            ChainId::POLYGON_MUMBAI,
            "Polygon Mumbai",
            ChainKind::Evm,
            vec![currency("MATIC", "", 18, true)],
        ),
        config(
            ChainId::SOLANA_MAINNET,
            "Solana",
            ChainKind::Solana,
            vec![
                currency("SOL", "", 9, true),
                currency("USDC", "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", 6, false),
            ],
        ),
        config(
            ChainId::SOLANA_DEVNET,
            "Solana Devnet",
            ChainKind::Solana,
            vec![currency("SOL", "", 9, true)],
        ),
    ]);
}

/// Looks up the static configuration for a chain id.
pub fn chain_config(chain_id: ChainId) -> Option<&'static ChainConfig> {
    CHAIN_MAP.get(&chain_id)
}

/// Like [`chain_config`], but fails with [`Error::UnsupportedChain`].
pub fn require_chain(chain_id: ChainId) -> Result<&'static ChainConfig, Error> {
    chain_config(chain_id).ok_or(Error::UnsupportedChain(chain_id))
}
