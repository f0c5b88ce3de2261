//! Per-store price quotes and the ranked multi-store aggregate.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::product_id::ProductId;
use crate::stores::StoreDescriptor;

/// Machine-readable classification of a failed store fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NotFound,
    RateLimited,
    Timeout,
    Unreachable,
    PriceNotFound,
    FetchFailed,
}

impl FailureKind {
    #[must_use]
    pub fn default_message(self) -> &'static str {
        match self {
            FailureKind::NotFound => "Product not found",
            FailureKind::RateLimited => "Service unavailable (rate limited)",
            FailureKind::Timeout => "Request timeout",
            FailureKind::Unreachable => "Store not reachable",
            FailureKind::PriceNotFound => "Price not found",
            FailureKind::FetchFailed => "Failed to fetch",
        }
    }
}

/// One store's outcome for one product.
///
/// Only the constructors below build quotes, so `available` is always
/// `price.is_some() && error.is_none()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    #[serde(rename = "store")]
    pub store_id: String,
    pub store_name: String,
    pub domain: String,
    #[serde(rename = "currency")]
    pub currency_code: String,
    #[serde(rename = "symbol")]
    pub currency_symbol: String,
    /// Native-currency amount rounded to two decimals.
    pub price: Option<f64>,
    /// Raw text the price was parsed from.
    pub price_text: Option<String>,
    pub title: Option<String>,
    pub available: bool,
    pub error: Option<String>,
    pub error_kind: Option<FailureKind>,
    pub url: String,
}

impl PriceQuote {
    fn base(store: &StoreDescriptor, url: String) -> Self {
        Self {
            store_id: store.id.clone(),
            store_name: store.display_name.clone(),
            domain: store.domain.clone(),
            currency_code: store.currency_code.clone(),
            currency_symbol: store.currency_symbol.clone(),
            price: None,
            price_text: None,
            title: None,
            available: false,
            error: None,
            error_kind: None,
            url,
        }
    }

    /// A priced, available quote. A non-positive or non-finite `price`
    /// degrades to a `PriceNotFound` failure.
    #[must_use]
    pub fn priced(
        store: &StoreDescriptor,
        url: String,
        price: f64,
        price_text: String,
        title: Option<String>,
    ) -> Self {
        let price = round_cents(price);
        if !(price.is_finite() && price > 0.0) {
            return Self::failed(
                store,
                url,
                FailureKind::PriceNotFound,
                FailureKind::PriceNotFound.default_message(),
            )
            .with_title(title);
        }
        Self {
            price: Some(price),
            price_text: Some(price_text),
            title,
            available: true,
            ..Self::base(store, url)
        }
    }

    /// Out of stock: not an error, just no offer.
    #[must_use]
    pub fn unavailable(store: &StoreDescriptor, url: String, title: Option<String>) -> Self {
        Self {
            title,
            ..Self::base(store, url)
        }
    }

    #[must_use]
    pub fn failed(
        store: &StoreDescriptor,
        url: String,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: Some(message.into()),
            error_kind: Some(kind),
            ..Self::base(store, url)
        }
    }

    #[must_use]
    pub fn with_title(self, title: Option<String>) -> Self {
        Self { title, ..self }
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let priced_ok = self.available == (self.price.is_some() && self.error.is_none());
        let error_ok = self.error.is_none() || self.price.is_none();
        priced_ok && error_ok && self.error.is_some() == self.error_kind.is_some()
    }
}

/// Cheapest first; quotes without a price go last in fetch order.
///
/// `sort_by` is stable, which is what keeps the unpriced tail in fetch order.
/// Rounds to the two decimals a quote reports.
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn rank_quotes(quotes: &mut [PriceQuote]) {
    quotes.sort_by(|a, b| match (a.price, b.price) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub asin: ProductId,
    pub timestamp: DateTime<Utc>,
    pub duration_seconds: f64,
    pub results: Vec<PriceQuote>,
}

impl AggregateResult {
    /// Ranks `results` and stamps the batch.
    #[must_use]
    pub fn new(
        asin: ProductId,
        timestamp: DateTime<Utc>,
        elapsed: Duration,
        mut results: Vec<PriceQuote>,
    ) -> Self {
        rank_quotes(&mut results);
        Self {
            asin,
            timestamp,
            duration_seconds: (elapsed.as_secs_f64() * 1000.0).round() / 1000.0,
            results,
        }
    }

    #[must_use]
    pub fn cheapest(&self) -> Option<&PriceQuote> {
        self.results.iter().find(|q| q.price.is_some())
    }

    #[must_use]
    pub fn priced_count(&self) -> usize {
        self.results.iter().filter(|q| q.price.is_some()).count()
    }

    /// Ranked quotes grouped by currency code. Amounts are never converted.
    #[must_use]
    pub fn by_currency(&self) -> BTreeMap<&str, Vec<&PriceQuote>> {
        let mut groups: BTreeMap<&str, Vec<&PriceQuote>> = BTreeMap::new();
        for quote in &self.results {
            groups
                .entry(quote.currency_code.as_str())
                .or_default()
                .push(quote);
        }
        groups
    }
}
