//! Data-driven extraction of price, title and stock state from a product page.
//!
//! Storefront markup drifts between layouts and A/B variants, so the
//! selectors live in an ordered [`ExtractionProfile`] instead of code.

use scraper::{ElementRef, Html, Selector};

use pricewatch_core::{round_cents, FailureKind, PriceQuote, StoreDescriptor};

use crate::error::ScraperError;
use crate::normalize::PriceNormalizer;

/// Price selectors tried in order. The first candidate yielding a positive
/// amount wins.
pub const DEFAULT_PRICE_SELECTORS: [&str; 13] = [
    "span.a-price span.a-offscreen",
    "#priceblock_ourprice",
    "#priceblock_dealprice",
    "#priceblock_saleprice",
    WHOLE_UNITS_SELECTOR,
    "#corePrice_feature_div span.a-offscreen",
    "#corePriceDisplay_desktop_feature_div span.a-offscreen",
    ".a-price .a-offscreen",
    "#price_inside_buybox",
    "#newBuyBoxPrice",
    "span[data-a-color=\"price\"] span.a-offscreen",
    "#apex_desktop span.a-offscreen",
    ".apexPriceToPay span.a-offscreen",
];

const WHOLE_UNITS_SELECTOR: &str = "span.a-price-whole";

pub const DEFAULT_TITLE_SELECTORS: [&str; 3] = ["#productTitle", "h1#title span", "h1.a-size-large"];

const DEFAULT_AVAILABILITY_TEXT_SELECTORS: [&str; 2] = ["#availability span", "#outOfStock span"];

const DEFAULT_OUT_OF_STOCK_MARKERS: [&str; 1] = ["#outOfStock"];

/// Lowercase phrases that mark a listing as out of stock, across the
/// languages the built-in storefronts render in.
pub const DEFAULT_UNAVAILABLE_PATTERNS: [&str; 14] = [
    "currently unavailable",
    "unavailable",
    "not available",
    "out of stock",
    "derzeit nicht verfügbar",
    "nicht verfügbar",
    "indisponible",
    "non disponibile",
    "no disponible",
    "niet beschikbaar",
    "niet leverbaar",
    "tillfälligt slut",
    "ej i lager",
    "niedostępny",
];

/// Transformation applied to a candidate's text before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    /// Keep ASCII digits only. For elements that render just the integer
    /// part, where any separator left in the text is grouping.
    WholeUnits,
}

impl PostFilter {
    fn apply(self, text: &str) -> Option<String> {
        match self {
            PostFilter::WholeUnits => {
                let digits: String = text.chars().filter(char::is_ascii_digit).collect();
                (!digits.is_empty()).then_some(digits)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionRule {
    source: String,
    selector: Selector,
    post_filter: Option<PostFilter>,
}

impl ExtractionRule {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if `selector` is not valid CSS.
    pub fn new(selector: &str) -> Result<Self, ScraperError> {
        Ok(Self {
            source: selector.to_owned(),
            selector: compile(selector)?,
            post_filter: None,
        })
    }

    #[must_use]
    pub fn with_post_filter(self, post_filter: PostFilter) -> Self {
        Self {
            post_filter: Some(post_filter),
            ..self
        }
    }

    #[must_use]
    pub fn selector(&self) -> &str {
        &self.source
    }

    fn candidate(&self, document: &Html) -> Option<(String, String)> {
        let element = document.select(&self.selector).next()?;
        let text = element_text(element);
        if text.is_empty() {
            return None;
        }
        let candidate = match self.post_filter {
            Some(filter) => filter.apply(&text)?,
            None => text.clone(),
        };
        Some((text, candidate))
    }
}

#[derive(Debug, Clone)]
pub struct AvailabilityRules {
    text_selectors: Vec<Selector>,
    marker_selectors: Vec<Selector>,
    patterns: Vec<String>,
}

impl AvailabilityRules {
    /// `patterns` are matched case-insensitively against the availability text.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] for any invalid selector.
    pub fn new(
        text_selectors: &[&str],
        marker_selectors: &[&str],
        patterns: &[&str],
    ) -> Result<Self, ScraperError> {
        Ok(Self {
            text_selectors: compile_all(text_selectors)?,
            marker_selectors: compile_all(marker_selectors)?,
            patterns: patterns.iter().map(|p| p.to_lowercase()).collect(),
        })
    }

    /// # Errors
    ///
    /// Only fails if a built-in selector stops parsing.
    pub fn storefront() -> Result<Self, ScraperError> {
        Self::new(
            &DEFAULT_AVAILABILITY_TEXT_SELECTORS,
            &DEFAULT_OUT_OF_STOCK_MARKERS,
            &DEFAULT_UNAVAILABLE_PATTERNS,
        )
    }

    fn out_of_stock(&self, document: &Html) -> bool {
        let text = joined_text(document, &self.text_selectors).to_lowercase();
        let by_text = !text.is_empty() && self.patterns.iter().any(|p| text.contains(p.as_str()));
        by_text
            || self
                .marker_selectors
                .iter()
                .any(|s| document.select(s).next().is_some())
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionProfile {
    price_rules: Vec<ExtractionRule>,
    title_selectors: Vec<Selector>,
    availability: AvailabilityRules,
}

impl ExtractionProfile {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] for any invalid title selector.
    pub fn new(
        price_rules: Vec<ExtractionRule>,
        title_selectors: &[&str],
        availability: AvailabilityRules,
    ) -> Result<Self, ScraperError> {
        Ok(Self {
            price_rules,
            title_selectors: compile_all(title_selectors)?,
            availability,
        })
    }

    /// The cascade used for the built-in storefronts.
    ///
    /// # Errors
    ///
    /// Only fails if a built-in selector stops parsing.
    pub fn storefront() -> Result<Self, ScraperError> {
        let price_rules = DEFAULT_PRICE_SELECTORS
            .iter()
            .map(|sel| {
                let rule = ExtractionRule::new(sel)?;
                Ok(if *sel == WHOLE_UNITS_SELECTOR {
                    rule.with_post_filter(PostFilter::WholeUnits)
                } else {
                    rule
                })
            })
            .collect::<Result<Vec<_>, ScraperError>>()?;
        Self::new(
            price_rules,
            &DEFAULT_TITLE_SELECTORS,
            AvailabilityRules::storefront()?,
        )
    }

    /// Adds a rule ahead of the existing cascade.
    #[must_use]
    pub fn with_leading_price_rule(mut self, rule: ExtractionRule) -> Self {
        self.price_rules.insert(0, rule);
        self
    }

    #[must_use]
    pub fn price_selectors(&self) -> Vec<&str> {
        self.price_rules.iter().map(ExtractionRule::selector).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPrice {
    pub value: f64,
    /// Element text before any post-filter, kept for auditing.
    pub text: String,
    /// Selector of the rule that produced the price.
    pub selector: String,
}

/// Everything read off one product page.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub price: Option<ExtractedPrice>,
    pub title: Option<String>,
    pub out_of_stock: bool,
}

impl Listing {
    /// A price always wins. Otherwise an out-of-stock page is a normal
    /// unavailable quote and anything else is `PriceNotFound`.
    #[must_use]
    pub fn into_quote(self, store: &StoreDescriptor, url: String) -> PriceQuote {
        match self.price {
            Some(price) => PriceQuote::priced(store, url, price.value, price.text, self.title),
            None if self.out_of_stock => PriceQuote::unavailable(store, url, self.title),
            None => PriceQuote::failed(
                store,
                url,
                FailureKind::PriceNotFound,
                FailureKind::PriceNotFound.default_message(),
            )
            .with_title(self.title),
        }
    }
}

/// Parses `html` and runs the profile against it.
///
/// Synchronous on purpose: [`Html`] is not `Send`, so it must never be held
/// across an `.await`.
#[must_use]
pub fn extract_listing(
    html: &str,
    profile: &ExtractionProfile,
    normalizer: &PriceNormalizer,
) -> Listing {
    let document = Html::parse_document(html);

    let price = profile.price_rules.iter().find_map(|rule| {
        let (text, candidate) = rule.candidate(&document)?;
        let value = normalizer.normalize(&candidate)?;
        (round_cents(value) > 0.0).then(|| ExtractedPrice {
            value,
            text,
            selector: rule.source.clone(),
        })
    });

    Listing {
        price,
        title: first_text(&document, &profile.title_selectors),
        out_of_stock: profile.availability.out_of_stock(&document),
    }
}

fn compile(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::InvalidSelector {
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}

fn compile_all(selectors: &[&str]) -> Result<Vec<Selector>, ScraperError> {
    selectors.iter().map(|s| compile(s)).collect()
}

/// Text of the first element matching any selector, tried in order.
fn first_text(document: &Html, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        let text = element_text(document.select(selector).next()?);
        (!text.is_empty()).then_some(text)
    })
}

/// Text of every element matching any selector, in document order per
/// selector. Blank wrappers contribute nothing.
fn joined_text(document: &Html, selectors: &[Selector]) -> String {
    selectors
        .iter()
        .flat_map(|selector| document.select(selector).map(element_text))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Descendant text with whitespace runs collapsed to single spaces.
fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
