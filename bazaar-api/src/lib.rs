//! The marketplace GraphQL API client.
//!
//! All offer bookkeeping lives server-side; this crate submits the
//! mutations (`createOfferForItems`, `refreshMetadata`, `cancelOffer`)
//! and deserializes the returned records. The HTTP layer sits behind the
//! [`transport::GraphQlTransport`] trait so tests can substitute a
//! recording mock for the live bearer-token transport.
//!
//! GraphQL-level errors surface as [`ApiError::GraphQl`]; there is no
//! retry or recovery at this layer.

pub mod client;
pub mod error;
/// GraphQL mutation documents, kept verbatim as sent over the wire.
pub mod graphql;
pub mod settings;
pub mod transport;
/// Typed mutation inputs.
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use settings::{load_settings, Settings};
pub use transport::{GraphQlTransport, HttpTransport};
pub use types::{CreateOfferInput, OfferPriceInput, RefreshMetadataInput};
