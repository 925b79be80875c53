//! Shared domain types and configuration for kwlens.

pub mod app_config;
pub mod config;
pub mod keywords;
pub mod seeds;
pub mod trend;

pub use app_config::{AppConfig, DocumentVertical, Environment, NaverCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use keywords::{competition_ratio, ClickMetrics, CompetitionLevel, KeywordRecord, SearchCount};
pub use seeds::{load_seed_file, parse_seed_keywords, SeedFile};
pub use trend::{TimeUnit, TrendPoint, TrendQuery};

use thiserror::Error;

/// Configuration failures. Any of these is fatal and is raised before the
/// first network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read seed file {path}: {source}")]
    SeedFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file: {0}")]
    SeedFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
