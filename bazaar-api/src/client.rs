use crate::error::ApiError;
use crate::graphql;
use crate::transport::{GraphQlTransport, HttpTransport};
use crate::types::{CreateOfferInput, RefreshMetadataInput};
use bazaar_core::OfferRecord;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// The marketplace API client.
///
/// Cheaply cloneable; both chain clients hold one and submit mutations
/// through it. Every call is a single request with no retry.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn GraphQlTransport>,
}

impl ApiClient {
    /// Creates a client over the live HTTP transport.
    pub fn new(url: &str, bearer_token: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            transport: Arc::new(HttpTransport::new(url, bearer_token)?),
        })
    }

    /// Creates a client over a custom transport. Tests use this to record
    /// requests instead of hitting the network.
    pub fn with_transport(transport: Arc<dyn GraphQlTransport>) -> Self {
        Self { transport }
    }

    /// Executes a GraphQL document and deserializes the payload found
    /// under `root` in the response data.
    pub async fn request<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: impl Serialize,
        root: &str,
    ) -> Result<T, ApiError> {
        let variables = serde_json::to_value(variables)?;
        let data = self.transport.execute(query, variables).await?;
        let field = data
            .get(root)
            .cloned()
            .ok_or_else(|| ApiError::MissingField(root.to_string()))?;
        Ok(serde_json::from_value(field)?)
    }

    /// Submits a `createOfferForItems` mutation and returns the offer
    /// record the server created.
    pub async fn create_offer(&self, input: CreateOfferInput) -> Result<OfferRecord, ApiError> {
        tracing::debug!(token_id = %input.token_id, kind = ?input.kind, "creating offer");
        self.request(
            graphql::CREATE_OFFER,
            json!({ "input": input }),
            "createOfferForItems",
        )
        .await
    }

    /// Asks the server to re-read the token's on-chain metadata.
    pub async fn refresh_metadata(&self, input: RefreshMetadataInput) -> Result<bool, ApiError> {
        self.request(
            graphql::REFRESH_METADATA,
            json!({ "input": input }),
            "refreshMetadata",
        )
        .await
    }

    /// Cancels a server-side offer by its id.
    pub async fn cancel_offer(&self, offer_id: &str) -> Result<bool, ApiError> {
        self.request(graphql::CANCEL_OFFER, json!({ "id": offer_id }), "cancelOffer")
            .await
    }
}
