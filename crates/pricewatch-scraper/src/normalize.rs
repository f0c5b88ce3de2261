//! Locale-tolerant conversion of displayed price text into a number.
//!
//! Storefronts render the same amount as `1.234,56 €`, `£1,234.56` or
//! `1 234,56 kr`. The rightmost separator decides which one is decimal;
//! parsing then stops at the first character that cannot extend the number.

use std::sync::LazyLock;

use regex::Regex;

use pricewatch_core::StoreRegistry;

static LEADING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+\.?\d*|\.\d+)").expect("valid regex"));

static DEFAULT_NORMALIZER: LazyLock<PriceNormalizer> =
    LazyLock::new(|| PriceNormalizer::for_registry(&StoreRegistry::default()));

/// Normalizes with the currency tokens of the built-in registry.
#[must_use]
pub fn normalize_price(raw: &str) -> Option<f64> {
    DEFAULT_NORMALIZER.normalize(raw)
}

#[derive(Debug, Clone)]
pub struct PriceNormalizer {
    currency_re: Regex,
}

impl PriceNormalizer {
    /// Strips every symbol and code the registry knows, plus `$`.
    #[must_use]
    pub fn for_registry(registry: &StoreRegistry) -> Self {
        Self::with_tokens(registry.currency_tokens())
    }

    #[must_use]
    pub fn with_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens: Vec<String> = tokens
            .into_iter()
            .map(Into::into)
            .filter(|t| !t.trim().is_empty())
            .collect();
        tokens.push("$".to_owned());
        // Longest first so `zł` wins over a shorter overlapping token.
        tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        tokens.dedup();

        let alternation = tokens
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let currency_re =
            Regex::new(&format!("(?i)(?:{alternation})")).expect("escaped tokens form a valid regex");
        Self { currency_re }
    }

    /// Returns `None` for empty, non-numeric, negative or non-finite input.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> Option<f64> {
        let stripped = self.currency_re.replace_all(raw, "");
        // `char::is_whitespace` also covers NBSP and the narrow NBSP
        // some locales use for digit grouping.
        let compact: String = stripped.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return None;
        }

        let canonical = canonicalize_separators(&compact);
        let number = LEADING_NUMBER_RE.find(&canonical)?;
        let value: f64 = number.as_str().parse().ok()?;
        (value.is_finite() && value >= 0.0).then_some(value)
    }
}

impl Default for PriceNormalizer {
    fn default() -> Self {
        DEFAULT_NORMALIZER.clone()
    }
}

/// Rewrites the string so the decimal mark is the first `.`.
fn canonicalize_separators(s: &str) -> String {
    match (s.rfind(','), s.rfind('.')) {
        // 1.234,56 and 12,99
        (Some(comma), period) if period.is_none_or(|p| comma > p) => {
            s.replace('.', "").replacen(',', ".", 1)
        }
        // 1,234.56 and 24.99
        (_, Some(_)) => s.replace(',', ""),
        _ => s.to_owned(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
