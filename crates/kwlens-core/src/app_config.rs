use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which OpenAPI search vertical supplies the document counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DocumentVertical {
    /// `webkr`: web documents.
    #[default]
    Web,
    /// `blog`: blog posts.
    Blog,
}

impl DocumentVertical {
    /// Path segment used by the search endpoint, e.g. `webkr`.
    #[must_use]
    pub fn as_path(self) -> &'static str {
        match self {
            DocumentVertical::Web => "webkr",
            DocumentVertical::Blog => "blog",
        }
    }
}

impl std::fmt::Display for DocumentVertical {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_path())
    }
}

impl FromStr for DocumentVertical {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "webkr" | "web" => Ok(DocumentVertical::Web),
            "blog" => Ok(DocumentVertical::Blog),
            other => Err(ConfigError::InvalidEnvVar {
                var: "KWLENS_DOCUMENT_VERTICAL".to_string(),
                reason: format!("unknown vertical '{other}'; expected webkr or blog"),
            }),
        }
    }
}

/// Credentials for both Naver APIs.
///
/// The Search-Ad keyword tool signs every call with `secret_key`; the
/// OpenAPI search and `DataLab` endpoints authenticate with the client pair.
#[derive(Clone)]
pub struct NaverCredentials {
    pub customer_id: String,
    pub api_key: String,
    pub secret_key: String,
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for NaverCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NaverCredentials")
            .field("customer_id", &self.customer_id)
            .field("api_key", &"[redacted]")
            .field("secret_key", &"[redacted]")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub credentials: NaverCredentials,
    pub searchad_base_url: String,
    pub openapi_base_url: String,
    pub user_agent: String,
    pub min_monthly_volume: u64,
    pub request_timeout_secs: u64,
    pub seed_delay_ms: u64,
    pub max_concurrent_lookups: usize,
    pub document_vertical: DocumentVertical,
    pub cache_ttl_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("credentials", &self.credentials)
            .field("searchad_base_url", &self.searchad_base_url)
            .field("openapi_base_url", &self.openapi_base_url)
            .field("user_agent", &self.user_agent)
            .field("min_monthly_volume", &self.min_monthly_volume)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("seed_delay_ms", &self.seed_delay_ms)
            .field("max_concurrent_lookups", &self.max_concurrent_lookups)
            .field("document_vertical", &self.document_vertical)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .finish()
    }
}
