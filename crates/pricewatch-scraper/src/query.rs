//! Validated entry points shared by the HTTP server and the CLI.

use pricewatch_core::{
    load_stores, AggregateResult, AppConfig, CoreError, PriceQuote, ProductId, StoreDescriptor,
    StoreRegistry,
};

use crate::aggregate::log_outcome;
use crate::client::{ClientSettings, StoreClient};
use crate::error::ScraperError;
use crate::extract::ExtractionProfile;

/// Validates caller input, then delegates to a [`StoreClient`].
///
/// Input is checked before any I/O; once it passes, every call succeeds
/// with per-store failures carried inside the quotes.
#[derive(Debug, Clone)]
pub struct PriceService {
    client: StoreClient,
    registry: StoreRegistry,
}

impl PriceService {
    #[must_use]
    pub fn new(client: StoreClient, registry: StoreRegistry) -> Self {
        Self { client, registry }
    }

    /// Builds the registry (YAML file or built-in) and the client from config.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Config`] if the stores file cannot be loaded,
    /// or any construction error from [`StoreClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let registry = match &config.stores_path {
            Some(path) => load_stores(path)?,
            None => StoreRegistry::default(),
        };
        tracing::debug!(stores = registry.len(), "store registry loaded");

        let client = StoreClient::new(
            ClientSettings::from_app_config(config)?,
            ExtractionProfile::storefront()?,
            &registry,
        )?;
        Ok(Self::new(client, registry))
    }

    #[must_use]
    pub fn registry(&self) -> &StoreRegistry {
        &self.registry
    }

    #[must_use]
    pub fn stores(&self) -> &[StoreDescriptor] {
        self.registry.stores()
    }

    /// Compares prices across every registered store.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidProductId`] if `raw_asin` is malformed.
    pub async fn quote_all(&self, raw_asin: &str) -> Result<AggregateResult, CoreError> {
        let asin = ProductId::parse(raw_asin)?;
        Ok(self.client.fetch_all(&asin, self.registry.stores()).await)
    }

    /// Fetches a single store's quote.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidProductId`] if `raw_asin` is malformed, or
    /// [`CoreError::UnknownStore`] if `raw_store` is not registered.
    pub async fn quote_one(&self, raw_asin: &str, raw_store: &str) -> Result<PriceQuote, CoreError> {
        let asin = ProductId::parse(raw_asin)?;
        let store = self.registry.resolve(raw_store)?;

        tracing::info!(asin = %asin, store = %store.id, "fetching single store price");
        let quote = self.client.fetch_one(&asin, store).await;
        log_outcome(&quote);
        Ok(quote)
    }
}
