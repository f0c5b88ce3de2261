pub mod aggregate;
pub mod client;
pub mod error;
pub mod extract;
pub mod identity;
pub mod normalize;
pub mod pacing;
pub mod query;

pub use aggregate::collect_quotes;
pub use client::{ClientSettings, StoreClient};
pub use error::ScraperError;
pub use extract::{
    extract_listing, AvailabilityRules, ExtractedPrice, ExtractionProfile, ExtractionRule,
    Listing, PostFilter,
};
pub use identity::ClientIdentity;
pub use normalize::{normalize_price, PriceNormalizer};
pub use pacing::Pacing;
pub use query::PriceService;
