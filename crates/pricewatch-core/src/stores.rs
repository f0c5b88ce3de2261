use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::product_id::ProductId;
use crate::{ConfigError, CoreError};

/// One regional storefront targeted for scraping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDescriptor {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    /// Bare storefront host without the `www.` prefix, e.g. `"amazon.de"`.
    pub domain: String,
    #[serde(rename = "currency")]
    pub currency_code: String,
    #[serde(rename = "symbol")]
    pub currency_symbol: String,
}

impl StoreDescriptor {
    fn new(id: &str, display_name: &str, domain: &str, currency: &str, symbol: &str) -> Self {
        Self {
            id: id.to_owned(),
            display_name: display_name.to_owned(),
            domain: domain.to_owned(),
            currency_code: currency.to_owned(),
            currency_symbol: symbol.to_owned(),
        }
    }

    /// Canonical product page, e.g. `https://www.amazon.de/dp/B08N5WRWNW`.
    #[must_use]
    pub fn product_url(&self, asin: &ProductId) -> String {
        format!("https://www.{}/dp/{asin}", self.domain)
    }
}

/// Read-only, ordered set of storefronts. Order is the fetch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRegistry {
    stores: Vec<StoreDescriptor>,
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self {
            stores: vec![
                StoreDescriptor::new("de", "Germany", "amazon.de", "EUR", "€"),
                StoreDescriptor::new("fr", "France", "amazon.fr", "EUR", "€"),
                StoreDescriptor::new("it", "Italy", "amazon.it", "EUR", "€"),
                StoreDescriptor::new("es", "Spain", "amazon.es", "EUR", "€"),
                StoreDescriptor::new("nl", "Netherlands", "amazon.nl", "EUR", "€"),
                StoreDescriptor::new("be", "Belgium", "amazon.com.be", "EUR", "€"),
                StoreDescriptor::new("uk", "United Kingdom", "amazon.co.uk", "GBP", "£"),
                StoreDescriptor::new("se", "Sweden", "amazon.se", "SEK", "kr"),
                StoreDescriptor::new("pl", "Poland", "amazon.pl", "PLN", "zł"),
            ],
        }
    }
}

impl StoreRegistry {
    /// Builds a registry from explicit descriptors after validating them.
    ///
    /// Store ids are lowercased so lookups stay case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for empty registries, duplicate ids,
    /// or malformed descriptor fields.
    pub fn new(stores: Vec<StoreDescriptor>) -> Result<Self, ConfigError> {
        let stores: Vec<StoreDescriptor> = stores
            .into_iter()
            .map(|mut s| {
                s.id = s.id.trim().to_lowercase();
                s
            })
            .collect();
        validate_stores(&stores)?;
        Ok(Self { stores })
    }

    #[must_use]
    pub fn stores(&self) -> &[StoreDescriptor] {
        &self.stores
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.stores.iter().map(|s| s.id.clone()).collect()
    }

    /// Case-insensitive lookup by store id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&StoreDescriptor> {
        let id = id.trim();
        self.stores.iter().find(|s| s.id.eq_ignore_ascii_case(id))
    }

    /// Like [`Self::get`] but reports the valid ids on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownStore`] when no store has this id.
    pub fn resolve(&self, id: &str) -> Result<&StoreDescriptor, CoreError> {
        self.get(id).ok_or_else(|| CoreError::UnknownStore {
            store_id: id.to_owned(),
            valid: self.ids(),
        })
    }

    /// Every currency symbol and code across the registry, deduplicated.
    #[must_use]
    pub fn currency_tokens(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.stores
            .iter()
            .flat_map(|s| [s.currency_symbol.clone(), s.currency_code.clone()])
            .filter(|t| seen.insert(t.to_lowercase()))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct StoresFile {
    pub stores: Vec<StoreDescriptor>,
}

/// Load and validate a store registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_stores(path: &Path) -> Result<StoreRegistry, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::StoresFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_stores(&content)
}

/// Parse and validate a YAML store registry held in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_stores(yaml: &str) -> Result<StoreRegistry, ConfigError> {
    let file: StoresFile = serde_yaml::from_str(yaml)?;
    StoreRegistry::new(file.stores)
}

fn validate_stores(stores: &[StoreDescriptor]) -> Result<(), ConfigError> {
    if stores.is_empty() {
        return Err(ConfigError::Validation(
            "at least one store must be configured".to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();
    for store in stores {
        if store.id.is_empty() || !store.id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Validation(format!(
                "store id '{}' must be non-empty and alphanumeric",
                store.id
            )));
        }

        if !seen_ids.insert(store.id.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store id: '{}'",
                store.id
            )));
        }

        if store.display_name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has an empty name",
                store.id
            )));
        }

        let domain = store.domain.trim();
        if domain.is_empty()
            || !domain.contains('.')
            || domain.starts_with("www.")
            || domain.contains("://")
            || domain.contains('/')
            || domain.chars().any(char::is_whitespace)
        {
            return Err(ConfigError::Validation(format!(
                "store '{}' has invalid domain '{}'; expected a bare host such as amazon.de",
                store.id, store.domain
            )));
        }

        if store.currency_code.len() != 3
            || !store.currency_code.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(ConfigError::Validation(format!(
                "store '{}' has invalid currency code '{}'; expected ISO 4217 such as EUR",
                store.id, store.currency_code
            )));
        }

        if store.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has an empty currency symbol",
                store.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "stores_test.rs"]
mod tests;
