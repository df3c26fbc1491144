//! Prices and smallest-unit conversion.
//!
//! Offer amounts travel as decimal numbers and are converted to on-chain
//! integer units at the point of submission, using the currency's decimal
//! count from the chain configuration. The conversion is a pure function
//! of `(amount, decimals)`.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// A currency symbol plus a decimal amount, as carried in offers and bids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub currency: String,
    pub amount: f64,
}

impl Price {
    pub fn new(currency: impl Into<String>, amount: f64) -> Self {
        Self {
            currency: currency.into(),
            amount,
        }
    }

    /// Converts the amount to the currency's smallest unit.
    pub fn in_smallest_unit(&self, decimals: u8) -> Result<u128, Error> {
        parse_units(&self.amount.to_string(), decimals)
    }
}

/// Parses a non-negative decimal string into an integer amount of
/// `10^-decimals` units.
///
/// Fails when the value is negative, malformed, has more fractional digits
/// than `decimals`, or overflows `u128`.
pub fn parse_units(amount: &str, decimals: u8) -> Result<u128, Error> {
    let invalid = || Error::InvalidAmount(amount.to_string());

    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, f),
        None => (amount, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }
    if frac_part.len() > decimals as usize {
        return Err(Error::InvalidAmount(format!(
            "{amount} has more than {decimals} fractional digits"
        )));
    }

    let scale = 10u128
        .checked_pow(decimals as u32)
        .ok_or_else(invalid)?;
    let int_units = if int_part.is_empty() {
        0
    } else {
        int_part.parse::<u128>().map_err(|_| invalid())?
    };
    let frac_units = if frac_part.is_empty() {
        0
    } else {
        let padding = decimals as usize - frac_part.len();
        let frac = frac_part.parse::<u128>().map_err(|_| invalid())?;
        frac * 10u128.pow(padding as u32)
    };

    int_units
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_units))
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_and_fractional_amounts() {
        assert_eq!(parse_units("1.5", 18).unwrap(), 1_500_000_000_000_000_000);
        assert_eq!(parse_units("0.000001", 6).unwrap(), 1);
        assert_eq!(parse_units("42", 0).unwrap(), 42);
        assert_eq!(parse_units(".5", 1).unwrap(), 5);
    }

    #[test]
    fn conversion_is_pure() {
        let first = parse_units("1.5", 18).unwrap();
        for _ in 0..10 {
            assert_eq!(parse_units("1.5", 18).unwrap(), first);
        }
    }

    #[test]
    fn rejects_excess_precision_and_garbage() {
        assert!(parse_units("0.0000001", 6).is_err());
        assert!(parse_units("-1", 18).is_err());
        assert!(parse_units("1.2.3", 18).is_err());
        assert!(parse_units("", 18).is_err());
        assert!(parse_units("abc", 18).is_err());
    }

    #[test]
    fn price_uses_shortest_float_repr() {
        let price = Price::new("ETH", 1.5);
        assert_eq!(
            price.in_smallest_unit(18).unwrap(),
            1_500_000_000_000_000_000
        );
    }
}
