//! Sequential, paced walk over the store list.

use std::future::Future;

use pricewatch_core::{PriceQuote, ProductId, StoreDescriptor};

use crate::error::ScraperError;
use crate::pacing::Pacing;

/// Fetches one quote per store, in order, pausing between consecutive
/// stores and never after the last.
///
/// A failing store never aborts the batch: an `Err` from `fetch` is
/// downgraded to a failed quote, so the output always has exactly one entry
/// per store in `stores` order.
pub async fn collect_quotes<'s, F, Fut>(
    asin: &ProductId,
    stores: &'s [StoreDescriptor],
    pacing: &Pacing,
    mut fetch: F,
) -> Vec<PriceQuote>
where
    F: FnMut(&'s StoreDescriptor) -> Fut,
    Fut: Future<Output = Result<PriceQuote, ScraperError>>,
{
    let mut quotes = Vec::with_capacity(stores.len());

    for (idx, store) in stores.iter().enumerate() {
        if idx > 0 {
            pacing.wait().await;
        }

        tracing::info!(store = %store.id, domain = %store.domain, "checking store");
        let quote = match fetch(store).await {
            Ok(quote) => quote,
            Err(e) => e.to_quote(store, store.product_url(asin)),
        };
        log_outcome(&quote);
        quotes.push(quote);
    }

    quotes
}

pub(crate) fn log_outcome(quote: &PriceQuote) {
    match (&quote.price, &quote.error) {
        (Some(price), _) => tracing::info!(
            store = %quote.store_id,
            price = %format!("{price:.2}"),
            currency = %quote.currency_code,
            "store priced"
        ),
        (None, Some(error)) => tracing::warn!(
            store = %quote.store_id,
            error = %error,
            "store failed"
        ),
        (None, None) => tracing::info!(store = %quote.store_id, "store out of stock"),
    }
}
