use pricewatch_core::{ConfigError, FailureKind, PriceQuote, StoreDescriptor};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("product page not found: {url}")]
    NotFound { url: String },

    #[error("rate limited by {domain} (HTTP {status})")]
    RateLimited { domain: String, status: u16 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid selector \"{selector}\": {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("invalid client identity header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("client identity needs at least one user agent")]
    EmptyUserAgentPool,

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ScraperError {
    /// Maps the error onto the per-store failure taxonomy reported to callers.
    #[must_use]
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            ScraperError::NotFound { .. } => FailureKind::NotFound,
            ScraperError::RateLimited { .. } => FailureKind::RateLimited,
            ScraperError::Http(e) if e.is_timeout() => FailureKind::Timeout,
            ScraperError::Http(e) if e.is_connect() => FailureKind::Unreachable,
            _ => FailureKind::FetchFailed,
        }
    }

    /// Short human-readable reason placed in a quote's `error` field.
    #[must_use]
    pub fn failure_message(&self) -> String {
        match self {
            ScraperError::UnexpectedStatus { status, .. } => format!("HTTP {status}"),
            other => other.failure_kind().default_message().to_owned(),
        }
    }

    /// Downgrades the error into a failed quote for `store`.
    #[must_use]
    pub fn to_quote(&self, store: &StoreDescriptor, url: String) -> PriceQuote {
        PriceQuote::failed(store, url, self.failure_kind(), self.failure_message())
    }
}
