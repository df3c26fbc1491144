use bazaar_core::{ChainId, OfferKind, TokenType};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The price as submitted in a mutation, amount already converted to the
/// currency's smallest unit.
#[derive(Debug, Clone, Serialize)]
pub struct OfferPriceInput {
    pub currency: String,
    pub amount: String,
}

/// Variables for the `createOfferForItems` mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferInput {
    pub token_id: String,
    pub contract_address: String,
    #[serde(rename = "type")]
    pub kind: OfferKind,
    pub price: OfferPriceInput,
    pub supply: u64,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    pub blockchain_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher: Option<serde_json::Value>,
}

/// Variables for the `refreshMetadata` mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshMetadataInput {
    pub token_id: String,
    pub contract_address: String,
    pub chain_id: ChainId,
    #[serde(rename = "type")]
    pub kind: TokenType,
}
