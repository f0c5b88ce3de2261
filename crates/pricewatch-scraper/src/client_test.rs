use super::*;

use std::net::SocketAddr;

fn app_config() -> AppConfig {
    AppConfig {
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        log_level: "info".to_owned(),
        stores_path: None,
        scraper_request_timeout_secs: 7,
        scraper_max_redirects: 2,
        scraper_pacing_min_ms: 100,
        scraper_pacing_max_ms: 200,
        scraper_user_agents: None,
        scraper_accept_language: "de-DE,de;q=0.9".to_owned(),
        rate_limit_max_requests: 30,
        rate_limit_window_secs: 60,
    }
}

fn client() -> StoreClient {
    StoreClient::new(
        ClientSettings::default(),
        ExtractionProfile::storefront().unwrap(),
        &StoreRegistry::default(),
    )
    .unwrap()
}

#[test]
fn settings_from_app_config_copy_limits() {
    let settings = ClientSettings::from_app_config(&app_config()).unwrap();
    assert_eq!(settings.request_timeout, Duration::from_secs(7));
    assert_eq!(settings.max_redirects, 2);
    assert_eq!(settings.pacing, Pacing::new(100, 200));
    assert_eq!(settings.identity.user_agents().len(), 5);
}

#[test]
fn settings_from_app_config_use_custom_agents() {
    let mut config = app_config();
    config.scraper_user_agents = Some(vec!["agent/1".to_owned(), "agent/2".to_owned()]);
    let settings = ClientSettings::from_app_config(&config).unwrap();
    assert_eq!(settings.identity.user_agents(), ["agent/1", "agent/2"]);
}

#[test]
fn settings_from_app_config_reject_bad_accept_language() {
    let mut config = app_config();
    config.scraper_accept_language = "en\r\nX-Injected: 1".to_owned();
    let result = ClientSettings::from_app_config(&config);
    assert!(matches!(result, Err(ScraperError::InvalidHeader { .. })));
}

#[test]
fn product_url_defaults_to_store_host() {
    let registry = StoreRegistry::default();
    let asin = ProductId::parse("B08N5WRWNW").unwrap();
    let url = client().product_url(registry.get("fr").unwrap(), &asin);
    assert_eq!(url, "https://www.amazon.fr/dp/B08N5WRWNW");
}

#[test]
fn product_url_honours_origin_override() {
    let registry = StoreRegistry::default();
    let asin = ProductId::parse("B08N5WRWNW").unwrap();
    let url = client()
        .with_origin("http://localhost:9000")
        .product_url(registry.get("fr").unwrap(), &asin);
    assert_eq!(url, "http://localhost:9000/dp/B08N5WRWNW");
}
