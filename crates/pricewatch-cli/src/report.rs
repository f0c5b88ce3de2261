//! Plain-text rendering of stores, quotes and comparison batches.

use pricewatch_core::{AggregateResult, PriceQuote, StoreDescriptor};

const TITLE_WIDTH: usize = 50;

pub(crate) fn print_stores(stores: &[StoreDescriptor]) {
    println!("{}", format_stores(stores));
}

pub(crate) fn print_quote(quote: &PriceQuote) {
    println!("{}", format_quote_header());
    println!("{}", format_quote_row(quote));
}

pub(crate) fn print_aggregate(result: &AggregateResult) {
    println!("{}", format_aggregate(result));
}

fn format_stores(stores: &[StoreDescriptor]) -> String {
    let mut lines = vec![format!(
        "{:<6}{:<16}{:<18}CURRENCY",
        "ID", "NAME", "DOMAIN"
    )];
    for store in stores {
        lines.push(format!(
            "{:<6}{:<16}{:<18}{} ({})",
            store.id, store.display_name, store.domain, store.currency_code, store.currency_symbol
        ));
    }
    lines.join("\n")
}

fn format_quote_header() -> String {
    format!("{:<6}{:<16}{:<16}STATUS", "STORE", "NAME", "PRICE")
}

fn format_quote_row(quote: &PriceQuote) -> String {
    let price = quote.price.map_or_else(
        || "-".to_owned(),
        |p| format!("{}{p:.2} {}", quote.currency_symbol, quote.currency_code),
    );
    format!(
        "{:<6}{:<16}{:<16}{}",
        quote.store_id,
        quote.store_name,
        price,
        status_label(quote)
    )
}

fn status_label(quote: &PriceQuote) -> String {
    match (&quote.error, quote.available) {
        (Some(error), _) => format!("error: {error}"),
        (None, true) => "available".to_owned(),
        (None, false) => "unavailable".to_owned(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width).collect::<String>())
    } else {
        text.to_owned()
    }
}

fn format_aggregate(result: &AggregateResult) -> String {
    let mut lines = Vec::new();
    lines.push(format!("ASIN: {}", result.asin));
    if let Some(title) = result.results.iter().find_map(|q| q.title.as_deref()) {
        lines.push(format!("Title: {}", truncate(title, TITLE_WIDTH)));
    }
    lines.push(format!(
        "Checked {} stores in {:.1}s, {} priced",
        result.results.len(),
        result.duration_seconds,
        result.priced_count()
    ));
    lines.push(String::new());

    lines.push(format_quote_header());
    for quote in &result.results {
        lines.push(format_quote_row(quote));
    }

    let cheapest: Vec<String> = result
        .by_currency()
        .into_iter()
        .filter_map(|(currency, quotes)| {
            let best = quotes.first().filter(|q| q.price.is_some())?;
            let price = best.price?;
            Some(format!(
                "  {currency}: {}{price:.2} at {} ({})",
                best.currency_symbol, best.store_name, best.store_id
            ))
        })
        .collect();

    if !cheapest.is_empty() {
        lines.push(String::new());
        lines.push("Cheapest per currency:".to_owned());
        lines.extend(cheapest);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use chrono::Utc;
    use pricewatch_core::{FailureKind, ProductId, StoreRegistry};

    fn quote(store_id: &str, price: Option<f64>, title: Option<&str>) -> PriceQuote {
        let registry = StoreRegistry::default();
        let store = registry.get(store_id).unwrap();
        let asin = ProductId::parse("B08N5WRWNW").unwrap();
        let url = store.product_url(&asin);
        let title = title.map(str::to_owned);
        match price {
            Some(p) => PriceQuote::priced(store, url, p, format!("{p}"), title),
            None => PriceQuote::unavailable(store, url, title),
        }
    }

    #[test]
    fn stores_table_lists_every_store() {
        let registry = StoreRegistry::default();
        let table = format_stores(registry.stores());
        assert_eq!(table.lines().count(), 10);
        assert!(table.contains("amazon.co.uk"));
        assert!(table.contains("PLN (zł)"));
    }

    #[test]
    fn quote_row_shows_price_with_symbol() {
        let row = format_quote_row(&quote("de", Some(24.99), None));
        assert!(row.starts_with("de"));
        assert!(row.contains("€24.99 EUR"));
        assert!(row.ends_with("available"));
    }

    #[test]
    fn quote_row_shows_error() {
        let registry = StoreRegistry::default();
        let store = registry.get("fr").unwrap();
        let failed = PriceQuote::failed(
            store,
            "u".to_owned(),
            FailureKind::Timeout,
            FailureKind::Timeout.default_message(),
        );
        let row = format_quote_row(&failed);
        assert!(row.contains(" - "));
        assert!(row.ends_with("error: Request timeout"));
    }

    #[test]
    fn truncate_long_titles() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 5), "abcde...");
    }

    #[test]
    fn aggregate_report_lists_cheapest_per_currency() {
        let result = AggregateResult::new(
            ProductId::parse("B08N5WRWNW").unwrap(),
            Utc::now(),
            Duration::from_millis(6_300),
            vec![
                quote("de", Some(29.99), Some("Echo Dot")),
                quote("fr", Some(24.99), None),
                quote("se", Some(299.0), None),
                quote("uk", None, None),
            ],
        );
        let report = format_aggregate(&result);

        assert!(report.contains("ASIN: B08N5WRWNW"));
        assert!(report.contains("Title: Echo Dot"));
        assert!(report.contains("Checked 4 stores in 6.3s, 3 priced"));
        assert!(report.contains("  EUR: €24.99 at France (fr)"));
        assert!(report.contains("  SEK: kr299.00 at Sweden (se)"));
        assert!(!report.contains("GBP:"));
    }
}
