//! The composite sale identifier.
//!
//! A sale or auction is referenced on-chain by a raw numeric id; the API
//! additionally carries a version tag distinguishing contract generations.
//! Both travel together as one string token, `"{raw}:{version}"`, which
//! must decompose back to `(raw, version)` wherever it is consumed.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// The sale contract generation a blockchain id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleVersion {
    V1,
    V2,
}

impl fmt::Display for SaleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleVersion::V1 => write!(f, "V1"),
            SaleVersion::V2 => write!(f, "V2"),
        }
    }
}

impl FromStr for SaleVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "V1" => Ok(SaleVersion::V1),
            "V2" => Ok(SaleVersion::V2),
            other => Err(Error::InvalidSaleId(other.to_string())),
        }
    }
}

/// A raw sale id paired with its version tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleId {
    pub raw: u64,
    pub version: SaleVersion,
}

impl SaleId {
    pub fn new(raw: u64, version: SaleVersion) -> Self {
        Self { raw, version }
    }

    /// Encodes into the string token the API and contracts exchange.
    pub fn to_blockchain_id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.raw, self.version)
    }
}

impl FromStr for SaleId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (raw, version) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidSaleId(s.to_string()))?;
        let raw = raw
            .parse::<u64>()
            .map_err(|_| Error::InvalidSaleId(s.to_string()))?;
        Ok(SaleId {
            raw,
            version: version.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_for_all_versions() {
        for version in [SaleVersion::V1, SaleVersion::V2] {
            for raw in [0u64, 1, 7, 42, u64::MAX] {
                let id = SaleId::new(raw, version);
                let decoded: SaleId = id.to_blockchain_id().parse().unwrap();
                assert_eq!(decoded, id);
            }
        }
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!("".parse::<SaleId>().is_err());
        assert!("17".parse::<SaleId>().is_err());
        assert!("17:V3".parse::<SaleId>().is_err());
        assert!("x:V2".parse::<SaleId>().is_err());
    }
}
