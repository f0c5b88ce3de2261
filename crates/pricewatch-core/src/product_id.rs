use std::fmt;

use serde::Serialize;

use crate::CoreError;

/// A 10-character alphanumeric catalog key (ASIN), stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub const LEN: usize = 10;

    /// Validates and uppercases a raw identifier.
    ///
    /// No trimming is applied: surrounding whitespace makes the input invalid.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidProductId`] unless `raw` is exactly ten
    /// ASCII letters or digits.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.len() == Self::LEN && raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Ok(Self(raw.to_ascii_uppercase()))
        } else {
            Err(CoreError::InvalidProductId(raw.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
