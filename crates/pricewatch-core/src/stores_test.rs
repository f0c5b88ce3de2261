use super::*;

fn store(id: &str, domain: &str, currency: &str) -> StoreDescriptor {
    StoreDescriptor::new(id, "Test Store", domain, currency, "€")
}

#[test]
fn default_registry_has_nine_stores_in_fetch_order() {
    let registry = StoreRegistry::default();
    assert_eq!(
        registry.ids(),
        vec!["de", "fr", "it", "es", "nl", "be", "uk", "se", "pl"]
    );
}

#[test]
fn default_registry_passes_validation() {
    let stores = StoreRegistry::default().stores().to_vec();
    assert!(StoreRegistry::new(stores).is_ok());
}

#[test]
fn get_is_case_insensitive() {
    let registry = StoreRegistry::default();
    let uk = registry.get("UK").expect("uk store");
    assert_eq!(uk.domain, "amazon.co.uk");
    assert_eq!(uk.currency_code, "GBP");
}

#[test]
fn resolve_unknown_store_lists_valid_ids() {
    let registry = StoreRegistry::default();
    let err = registry.resolve("us").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid store ID. Valid options: de, fr, it, es, nl, be, uk, se, pl"
    );
}

#[test]
fn product_url_uses_www_host() {
    let registry = StoreRegistry::default();
    let asin = ProductId::parse("b08n5wrwnw").unwrap();
    let be = registry.get("be").unwrap();
    assert_eq!(
        be.product_url(&asin),
        "https://www.amazon.com.be/dp/B08N5WRWNW"
    );
}

#[test]
fn currency_tokens_are_deduplicated() {
    let tokens = StoreRegistry::default().currency_tokens();
    assert_eq!(tokens.iter().filter(|t| t.as_str() == "€").count(), 1);
    assert_eq!(tokens.iter().filter(|t| t.as_str() == "EUR").count(), 1);
    for expected in ["£", "GBP", "kr", "SEK", "zł", "PLN"] {
        assert!(tokens.iter().any(|t| t == expected), "missing {expected}");
    }
}

#[test]
fn new_lowercases_ids() {
    let registry = StoreRegistry::new(vec![store("DE", "amazon.de", "EUR")]).unwrap();
    assert_eq!(registry.ids(), vec!["de"]);
}

#[test]
fn validate_rejects_empty_registry() {
    let err = StoreRegistry::new(vec![]).unwrap_err();
    assert!(err.to_string().contains("at least one store"));
}

#[test]
fn validate_rejects_duplicate_ids_ignoring_case() {
    let err = StoreRegistry::new(vec![
        store("de", "amazon.de", "EUR"),
        store("DE", "amazon.at", "EUR"),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("duplicate store id"));
}

#[test]
fn validate_rejects_domain_with_scheme() {
    let err = StoreRegistry::new(vec![store("de", "https://amazon.de", "EUR")]).unwrap_err();
    assert!(err.to_string().contains("invalid domain"));
}

#[test]
fn validate_rejects_domain_with_www_prefix() {
    let err = StoreRegistry::new(vec![store("de", "www.amazon.de", "EUR")]).unwrap_err();
    assert!(err.to_string().contains("invalid domain"));
}

#[test]
fn validate_rejects_lowercase_currency_code() {
    let err = StoreRegistry::new(vec![store("de", "amazon.de", "eur")]).unwrap_err();
    assert!(err.to_string().contains("invalid currency code"));
}

#[test]
fn parse_stores_reads_yaml() {
    let yaml = r#"
stores:
  - id: de
    name: Germany
    domain: amazon.de
    currency: EUR
    symbol: "€"
  - id: ch
    name: Switzerland
    domain: amazon.ch
    currency: CHF
    symbol: CHF
"#;
    let registry = parse_stores(yaml).expect("parse");
    assert_eq!(registry.len(), 2);
    let ch = registry.get("ch").unwrap();
    assert_eq!(ch.display_name, "Switzerland");
    assert_eq!(ch.currency_symbol, "CHF");
}

#[test]
fn parse_stores_rejects_malformed_yaml() {
    let result = parse_stores("stores: [ {id: de");
    assert!(matches!(result, Err(ConfigError::StoresFileParse(_))));
}

#[test]
fn load_stores_missing_file_is_io_error() {
    let result = load_stores(Path::new("/nonexistent/pricewatch/stores.yaml"));
    assert!(matches!(result, Err(ConfigError::StoresFileIo { .. })));
}

#[test]
fn load_stores_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("stores.yaml");
    assert!(
        path.exists(),
        "stores.yaml missing at {path:?}"
    );
    let registry = load_stores(&path).expect("failed to load stores.yaml");
    assert_eq!(registry, StoreRegistry::default());
}

#[test]
fn store_descriptor_serializes_with_api_field_names() {
    let registry = StoreRegistry::default();
    let json = serde_json::to_value(registry.get("se").unwrap()).expect("serialize");
    assert_eq!(json["id"], "se");
    assert_eq!(json["name"], "Sweden");
    assert_eq!(json["domain"], "amazon.se");
    assert_eq!(json["currency"], "SEK");
    assert_eq!(json["symbol"], "kr");
}
