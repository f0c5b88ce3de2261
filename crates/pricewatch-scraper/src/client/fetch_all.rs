//! Multi-store price comparison for `StoreClient`.

use std::time::Instant;

use chrono::Utc;

use pricewatch_core::{AggregateResult, ProductId, StoreDescriptor};

use crate::aggregate::collect_quotes;
use crate::error::ScraperError;

use super::StoreClient;

impl StoreClient {
    /// Queries every store in `stores`, one at a time, and returns the
    /// ranked batch.
    ///
    /// Stores are contacted strictly sequentially with the client's pacing
    /// between them. The result always holds one quote per store.
    pub async fn fetch_all(&self, asin: &ProductId, stores: &[StoreDescriptor]) -> AggregateResult {
        let started = Instant::now();
        tracing::info!(asin = %asin, stores = stores.len(), "starting price comparison");

        let quotes = collect_quotes(asin, stores, &self.pacing, |store| async move {
            Ok::<_, ScraperError>(self.fetch_one(asin, store).await)
        })
        .await;

        let result = AggregateResult::new(asin.clone(), Utc::now(), started.elapsed(), quotes);
        tracing::info!(
            asin = %asin,
            priced = result.priced_count(),
            total = result.results.len(),
            duration_secs = result.duration_seconds,
            "price comparison complete"
        );
        result
    }
}
