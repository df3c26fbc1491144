use crate::chain::ChainId;
use crate::item::TokenType;
use thiserror::Error;

/// Defines the error types shared by every crate in the workspace.
///
/// These cover the SDK's own preconditions; failures from chain libraries
/// and the API surface through the chain crates' error types unmodified.
#[derive(Error, Debug)]
pub enum Error {
    #[error("chain {0} is not supported")]
    UnsupportedChain(ChainId),

    #[error("token type {0} is not supported")]
    UnsupportedTokenType(TokenType),

    #[error("unable to do this action, item required")]
    MissingItem,

    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid sale id: {0}")]
    InvalidSaleId(String),
}
