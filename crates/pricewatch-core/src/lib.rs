pub mod app_config;
pub mod config;
pub mod product_id;
pub mod quotes;
pub mod stores;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use product_id::ProductId;
pub use quotes::{rank_quotes, round_cents, AggregateResult, FailureKind, PriceQuote};
pub use stores::{load_stores, StoreDescriptor, StoreRegistry};

use thiserror::Error;

/// Input-validation failures raised before any network I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid ASIN format. Must be 10 alphanumeric characters.")]
    InvalidProductId(String),

    #[error("Invalid store ID. Valid options: {}", .valid.join(", "))]
    UnknownStore {
        store_id: String,
        valid: Vec<String>,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read stores file {path}: {source}")]
    StoresFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse stores file: {0}")]
    StoresFileParse(#[from] serde_yaml::Error),

    #[error("stores validation failed: {0}")]
    Validation(String),
}
