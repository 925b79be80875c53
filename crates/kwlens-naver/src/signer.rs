//! Request signing for the Search-Ad API.
//!
//! Every keyword-tool call carries an `X-Signature` header: the base64
//! HMAC-SHA256 of `"{timestamp}.{method}.{uri}"` keyed by the account's
//! secret key, next to the timestamp, API key, and customer id headers.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use sha2::Sha256;

use kwlens_core::NaverCredentials;

use crate::error::NaverError;

type HmacSha256 = Hmac<Sha256>;

/// Signs one request.
///
/// # Errors
///
/// Returns [`NaverError::Config`] if `secret_key` is empty or blank.
pub fn sign(
    timestamp_ms: i64,
    method: &str,
    uri_path: &str,
    secret_key: &str,
) -> Result<String, NaverError> {
    if secret_key.trim().is_empty() {
        return Err(NaverError::Config(
            "Search-Ad secret key is empty; refusing to sign request".to_string(),
        ));
    }
    let message = format!("{timestamp_ms}.{method}.{uri_path}");
    hmac_base64(secret_key.as_bytes(), message.as_bytes())
}

fn hmac_base64(key: &[u8], message: &[u8]) -> Result<String, NaverError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| NaverError::Config(format!("invalid secret key: {e}")))?;
    mac.update(message);
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// The five headers the keyword tool expects on every call.
#[derive(Debug, Clone)]
pub struct SignedHeaders {
    pub timestamp: String,
    pub api_key: String,
    pub customer_id: String,
    pub signature: String,
}

impl SignedHeaders {
    /// # Errors
    ///
    /// Returns [`NaverError::Config`] if the credentials cannot sign the
    /// request (blank secret, API key, or customer id).
    pub fn new(
        credentials: &NaverCredentials,
        method: &str,
        uri_path: &str,
        timestamp_ms: i64,
    ) -> Result<Self, NaverError> {
        if credentials.api_key.trim().is_empty() || credentials.customer_id.trim().is_empty() {
            return Err(NaverError::Config(
                "Search-Ad API key and customer id are required".to_string(),
            ));
        }
        let signature = sign(timestamp_ms, method, uri_path, &credentials.secret_key)?;
        Ok(Self {
            timestamp: timestamp_ms.to_string(),
            api_key: credentials.api_key.clone(),
            customer_id: credentials.customer_id.clone(),
            signature,
        })
    }

    /// # Errors
    ///
    /// Returns [`NaverError::Config`] if a credential contains bytes that are
    /// not valid in an HTTP header.
    pub fn to_header_map(&self) -> Result<HeaderMap, NaverError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=UTF-8"),
        );
        for (name, value) in [
            ("x-timestamp", &self.timestamp),
            ("x-api-key", &self.api_key),
            ("x-customer", &self.customer_id),
            ("x-signature", &self.signature),
        ] {
            let value = HeaderValue::from_str(value)
                .map_err(|e| NaverError::Config(format!("invalid value for {name}: {e}")))?;
            headers.insert(HeaderName::from_static(name), value);
        }
        Ok(headers)
    }
}
