use crate::app_config::{AppConfig, DocumentVertical, Environment, NaverCredentials};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Credentials are required and must be non-blank; every other setting has a
/// default. Nothing here touches the network.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let credentials = NaverCredentials {
        customer_id: require("NAVER_AD_CUSTOMER_ID")?,
        api_key: require("NAVER_AD_API_KEY")?,
        secret_key: require("NAVER_AD_SECRET_KEY")?,
        client_id: require("NAVER_CLIENT_ID")?,
        client_secret: require("NAVER_CLIENT_SECRET")?,
    };

    let env = parse_environment(&or_default("KWLENS_ENV", "development"))?;
    let log_level = or_default("KWLENS_LOG_LEVEL", "info");

    let searchad_base_url = or_default("KWLENS_SEARCHAD_BASE_URL", "https://api.naver.com");
    let openapi_base_url = or_default("KWLENS_OPENAPI_BASE_URL", "https://openapi.naver.com");
    let user_agent = or_default("KWLENS_USER_AGENT", "kwlens/0.1 (keyword-research)");

    let min_monthly_volume = parse_u64("KWLENS_MIN_MONTHLY_VOLUME", "50")?;
    let request_timeout_secs = parse_u64("KWLENS_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "KWLENS_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let seed_delay_ms = parse_u64("KWLENS_SEED_DELAY_MS", "1000")?;
    let max_concurrent_lookups = parse_usize("KWLENS_MAX_CONCURRENT_LOOKUPS", "8")?.max(1);
    let document_vertical: DocumentVertical =
        or_default("KWLENS_DOCUMENT_VERTICAL", "webkr").parse()?;
    let cache_ttl_secs = parse_u64("KWLENS_CACHE_TTL_SECS", "3600")?;

    Ok(AppConfig {
        env,
        log_level,
        credentials,
        searchad_base_url,
        openapi_base_url,
        user_agent,
        min_monthly_volume,
        request_timeout_secs,
        seed_delay_ms,
        max_concurrent_lookups,
        document_vertical,
        cache_ttl_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "KWLENS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}
