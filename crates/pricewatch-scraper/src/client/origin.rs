//! Product-page URL building and host extraction for the store client.

use pricewatch_core::{ProductId, StoreDescriptor};

/// Canonical storefront URL, or `{origin}/dp/{asin}` when an origin
/// override points the client at a mirror.
pub(super) fn product_page_url(
    origin_override: Option<&str>,
    store: &StoreDescriptor,
    asin: &ProductId,
) -> String {
    match origin_override {
        Some(origin) => format!("{}/dp/{asin}", origin.trim_end_matches('/')),
        None => store.product_url(asin),
    }
}

/// Extracts the hostname from a URL for use in error messages.
///
/// Falls back to the full URL string if parsing fails.
pub(super) fn extract_domain(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}
