//! HTTP client that fetches one storefront product page and extracts a quote.

mod fetch_all;
mod origin;

use std::time::Duration;

use reqwest::header::{HeaderMap, USER_AGENT};
use reqwest::{Client, StatusCode};

use pricewatch_core::{AppConfig, PriceQuote, ProductId, StoreDescriptor, StoreRegistry};

use crate::error::ScraperError;
use crate::extract::{extract_listing, ExtractionProfile, Listing};
use crate::identity::ClientIdentity;
use crate::normalize::PriceNormalizer;
use crate::pacing::Pacing;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Knobs for [`StoreClient::new`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Whole-request deadline, body included.
    pub request_timeout: Duration,
    pub max_redirects: usize,
    pub identity: ClientIdentity,
    pub pacing: Pacing,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(15),
            max_redirects: 5,
            identity: ClientIdentity::default(),
            pacing: Pacing::default(),
        }
    }
}

impl ClientSettings {
    /// # Errors
    ///
    /// Returns [`ScraperError`] if the configured user agents or
    /// `Accept-Language` cannot be sent as headers.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let user_agents = config
            .scraper_user_agents
            .clone()
            .unwrap_or_else(|| ClientIdentity::default().user_agents().to_vec());
        let identity = ClientIdentity::new(user_agents, config.scraper_accept_language.clone())?;
        Ok(Self {
            request_timeout: Duration::from_secs(config.scraper_request_timeout_secs),
            max_redirects: config.scraper_max_redirects,
            identity,
            pacing: Pacing::from_app_config(config),
        })
    }
}

/// Fetches storefront product pages with a browser-like identity.
///
/// Every outcome of [`StoreClient::fetch_one`] is a [`PriceQuote`]; transport
/// and HTTP failures are classified into the quote instead of returned.
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: Client,
    identity: ClientIdentity,
    base_headers: HeaderMap,
    profile: ExtractionProfile,
    normalizer: PriceNormalizer,
    pacing: Pacing,
    origin_override: Option<String>,
}

impl StoreClient {
    /// The normalizer strips every currency token `registry` knows.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScraperError::InvalidHeader`] if the
    /// identity headers are malformed.
    pub fn new(
        settings: ClientSettings,
        profile: ExtractionProfile,
        registry: &StoreRegistry,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(settings.request_timeout))
            .redirect(reqwest::redirect::Policy::limited(settings.max_redirects))
            .build()?;
        let base_headers = settings.identity.base_headers()?;
        Ok(Self {
            client,
            identity: settings.identity,
            base_headers,
            profile,
            normalizer: PriceNormalizer::for_registry(registry),
            pacing: settings.pacing,
            origin_override: None,
        })
    }

    /// Sends every request to `{origin}/dp/{asin}` instead of the store's
    /// own host. Quotes still report the store they were requested for.
    #[must_use]
    pub fn with_origin(self, origin: impl Into<String>) -> Self {
        Self {
            origin_override: Some(origin.into()),
            ..self
        }
    }

    #[must_use]
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    #[must_use]
    pub fn product_url(&self, store: &StoreDescriptor, asin: &ProductId) -> String {
        origin::product_page_url(self.origin_override.as_deref(), store, asin)
    }

    /// Fetches one store's product page and turns it into a quote.
    ///
    /// Never fails: every error becomes a quote with `error` set.
    pub async fn fetch_one(&self, asin: &ProductId, store: &StoreDescriptor) -> PriceQuote {
        let url = self.product_url(store, asin);
        match self.fetch_listing(&url).await {
            Ok(listing) => {
                if let Some(price) = &listing.price {
                    tracing::debug!(
                        store = %store.id,
                        selector = %price.selector,
                        "price extracted"
                    );
                }
                listing.into_quote(store, url)
            }
            Err(e) => {
                tracing::debug!(store = %store.id, url = %url, error = %e, "store fetch failed");
                e.to_quote(store, url)
            }
        }
    }

    /// # Errors
    ///
    /// - [`ScraperError::NotFound`] for HTTP 404.
    /// - [`ScraperError::RateLimited`] for HTTP 503 or 429.
    /// - [`ScraperError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`ScraperError::Http`] for timeouts, connection and redirect failures.
    pub async fn fetch_listing(&self, url: &str) -> Result<Listing, ScraperError> {
        let response = self
            .client
            .get(url)
            .headers(self.base_headers.clone())
            .header(USER_AGENT, self.identity.pick_user_agent())
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }

        if status == StatusCode::SERVICE_UNAVAILABLE || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ScraperError::RateLimited {
                domain: origin::extract_domain(url),
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        Ok(extract_listing(&body, &self.profile, &self.normalizer))
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
