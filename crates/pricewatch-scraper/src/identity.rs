//! Browser-like client identity sent with every storefront request.
//!
//! The user-agent pool is an anti-bot heuristic whose usefulness depends on
//! the target and changes over time, so it is plain configuration.

use rand::seq::IndexedRandom;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL};

use pricewatch_core::config::DEFAULT_ACCEPT_LANGUAGE;

use crate::error::ScraperError;

pub const DEFAULT_USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";

/// Fixed navigation headers a desktop Chromium sends on a top-level load.
const NAVIGATION_HEADERS: [(&str, &str); 8] = [
    (
        "sec-ch-ua",
        "\"Not_A Brand\";v=\"8\", \"Chromium\";v=\"120\", \"Google Chrome\";v=\"120\"",
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Windows\""),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("sec-fetch-user", "?1"),
    ("upgrade-insecure-requests", "1"),
];

#[derive(Debug, Clone)]
pub struct ClientIdentity {
    user_agents: Vec<String>,
    accept_language: String,
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self {
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| (*s).to_owned()).collect(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_owned(),
        }
    }
}

impl ClientIdentity {
    /// # Errors
    ///
    /// Returns [`ScraperError::EmptyUserAgentPool`] for an empty pool and
    /// [`ScraperError::InvalidHeader`] if any value cannot be sent as a header.
    pub fn new(
        user_agents: Vec<String>,
        accept_language: impl Into<String>,
    ) -> Result<Self, ScraperError> {
        if user_agents.is_empty() {
            return Err(ScraperError::EmptyUserAgentPool);
        }
        for ua in &user_agents {
            header_value("user-agent", ua)?;
        }
        let accept_language = accept_language.into();
        header_value("accept-language", &accept_language)?;
        Ok(Self {
            user_agents,
            accept_language,
        })
    }

    #[must_use]
    pub fn user_agents(&self) -> &[String] {
        &self.user_agents
    }

    /// Uniform draw from the pool.
    #[must_use]
    pub fn pick_user_agent(&self) -> &str {
        self.user_agents
            .choose(&mut rand::rng())
            .map_or(DEFAULT_USER_AGENTS[0], String::as_str)
    }

    /// Every header except `User-Agent`, which is drawn per request.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidHeader`] if a value is not a valid header.
    pub fn base_headers(&self) -> Result<HeaderMap, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            header_value("accept-language", &self.accept_language)?,
        );
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
        for (name, value) in NAVIGATION_HEADERS {
            headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        }
        Ok(headers)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ScraperError> {
    HeaderValue::from_str(value).map_err(|e| ScraperError::InvalidHeader {
        name: name.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_has_five_desktop_agents() {
        let identity = ClientIdentity::default();
        assert_eq!(identity.user_agents().len(), 5);
        assert!(identity
            .user_agents()
            .iter()
            .all(|ua| ua.starts_with("Mozilla/5.0")));
    }

    #[test]
    fn pick_user_agent_draws_from_pool() {
        let identity = ClientIdentity::default();
        for _ in 0..20 {
            let ua = identity.pick_user_agent();
            assert!(identity.user_agents().iter().any(|candidate| candidate == ua));
        }
    }

    #[test]
    fn single_agent_pool_always_returns_it() {
        let identity = ClientIdentity::new(vec!["agent/1.0".to_owned()], "de-DE").unwrap();
        assert_eq!(identity.pick_user_agent(), "agent/1.0");
    }

    #[test]
    fn new_rejects_empty_pool() {
        let result = ClientIdentity::new(vec![], "en-US");
        assert!(matches!(result, Err(ScraperError::EmptyUserAgentPool)));
    }

    #[test]
    fn new_rejects_header_breaking_agent() {
        let result = ClientIdentity::new(vec!["bad\nagent".to_owned()], "en-US");
        assert!(matches!(result, Err(ScraperError::InvalidHeader { .. })));
    }

    #[test]
    fn base_headers_include_browser_navigation_set() {
        let headers = ClientIdentity::default().base_headers().unwrap();
        assert_eq!(headers[ACCEPT_LANGUAGE], DEFAULT_ACCEPT_LANGUAGE);
        assert_eq!(headers["sec-fetch-mode"], "navigate");
        assert_eq!(headers["upgrade-insecure-requests"], "1");
        assert!(headers[ACCEPT].to_str().unwrap().starts_with("text/html"));
        assert!(!headers.contains_key(reqwest::header::USER_AGENT));
    }
}
