//! Quote provider contract and error classification.
//!
//! | Operation | Success | Failure |
//! |-----------|---------|---------|
//! | [`QuoteProvider::lookup_price`] | [`Quote`] | [`QuoteError`] |
//! | [`QuoteProvider::search_symbols`] | ranked [`SearchMatch`] list | [`QuoteError`] |
//!
//! Calls are independent: a provider never deduplicates or cancels earlier
//! calls, so callers that care about ordering must guard against stale results.

mod alphavantage;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::{Quote, SearchMatch, Symbol};

pub use alphavantage::AlphaVantageClient;

/// User-facing text for provider backpressure.
pub const RATE_LIMIT_MESSAGE: &str =
    "Please wait! Our standard API call frequency is 5 calls per minute and 500 calls per day";
/// User-facing text for a well-formed response without a price.
pub const INVALID_SYMBOL_MESSAGE: &str = "Invalid symbol!";
/// User-facing text for transport failures and unreadable payloads.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid!";

pub type LookupFuture<'a> = Pin<Box<dyn Future<Output = Result<Quote, QuoteError>> + Send + 'a>>;
pub type SearchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<SearchMatch>, QuoteError>> + Send + 'a>>;

/// Lookup failure, in the order the provider response is classified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// No response, or a non-success status.
    #[error("transport error: {message}")]
    Transport { status: Option<u16>, message: String },

    /// The provider asked the caller to slow down.
    #[error("rate limited: {notice}")]
    RateLimited { notice: String },

    /// Well-formed response that carries no price.
    #[error("symbol '{symbol}' not found")]
    SymbolNotFound { symbol: String },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

impl QuoteError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self::Transport {
            status: Some(status),
            message: format!("provider returned status {status}"),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Short message rendered by a widget in its error state.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Transport { .. } | Self::MalformedResponse { .. } => INVALID_RESPONSE_MESSAGE,
            Self::RateLimited { .. } => RATE_LIMIT_MESSAGE,
            Self::SymbolNotFound { .. } => INVALID_SYMBOL_MESSAGE,
        }
    }
}

/// Stock quote source used by the price and search widgets.
pub trait QuoteProvider: Send + Sync {
    fn lookup_price<'a>(&'a self, symbol: &'a Symbol) -> LookupFuture<'a>;

    fn search_symbols<'a>(&'a self, query: &'a str) -> SearchFuture<'a>;
}
