//! Offer records returned by the marketplace API.
//!
//! The server owns these; the client keeps only the identifiers and echoes
//! them back in later actions (bid, cancel, end).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Distinguishes a fixed-price sale from an auction listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferKind {
    Sale,
    Auction,
}

/// The price as echoed back by the API, with the amount already converted
/// to the currency's smallest unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferPrice {
    pub currency: String,
    pub amount: String,
}

/// A server-side offer record. Fields the server omits stay `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: OfferKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<OfferPrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supply: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// A fixed-price listing, as created by `put_for_sale`.
#[derive(Debug, Clone)]
pub struct SaleOffer {
    pub record: OfferRecord,
}

impl SaleOffer {
    pub fn new(record: OfferRecord) -> Self {
        Self { record }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn blockchain_id(&self) -> Option<&str> {
        self.record.blockchain_id.as_deref()
    }
}

/// An auction listing, as created by `put_for_auction`.
#[derive(Debug, Clone)]
pub struct AuctionOffer {
    pub record: OfferRecord,
}

impl AuctionOffer {
    pub fn new(record: OfferRecord) -> Self {
        Self { record }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn blockchain_id(&self) -> Option<&str> {
        self.record.blockchain_id.as_deref()
    }
}
