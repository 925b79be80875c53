//! HTTP client for the Search-Ad keyword tool (`/keywordstool`).

use std::time::Duration;

use reqwest::{Client, Url};

use kwlens_core::{KeywordRecord, NaverCredentials};

use crate::error::NaverError;
use crate::normalize::{filter_min_volume, normalize_keyword_list, sort_by_total_search};
use crate::signer::SignedHeaders;
use crate::types::KeywordToolResponse;

const DEFAULT_BASE_URL: &str = "https://api.naver.com";
const KEYWORD_TOOL_PATH: &str = "/keywordstool";
const ENDPOINT: &str = "keywordstool";

/// Related keywords for one seed, after filtering and sorting.
#[derive(Debug, Default)]
pub struct RelatedKeywords {
    pub records: Vec<KeywordRecord>,
    /// Upstream entries dropped because their shape was unusable.
    pub skipped: Vec<NaverError>,
}

/// Client for the signed Search-Ad keyword tool.
///
/// Use [`SearchAdClient::new`] for production or
/// [`SearchAdClient::with_base_url`] to point at a mock server in tests.
pub struct SearchAdClient {
    client: Client,
    credentials: NaverCredentials,
    base_url: Url,
}

impl SearchAdClient {
    /// # Errors
    ///
    /// Returns [`NaverError::Config`] if the credentials are incomplete, or
    /// [`NaverError::Http`] if the `reqwest::Client` cannot be constructed.
    pub fn new(
        credentials: NaverCredentials,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, NaverError> {
        Self::with_base_url(credentials, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`NaverError::Config`] if the credentials are incomplete or
    /// `base_url` is not a valid URL, or [`NaverError::Http`] if the
    /// `reqwest::Client` cannot be constructed.
    pub fn with_base_url(
        credentials: NaverCredentials,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, NaverError> {
        for (name, value) in [
            ("customer id", &credentials.customer_id),
            ("API key", &credentials.api_key),
            ("secret key", &credentials.secret_key),
        ] {
            if value.trim().is_empty() {
                return Err(NaverError::Config(format!("Search-Ad {name} is empty")));
            }
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let trimmed = base_url.trim_end_matches('/');
        let base_url = Url::parse(&format!("{trimmed}{KEYWORD_TOOL_PATH}"))
            .map_err(|e| NaverError::Config(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            credentials,
            base_url,
        })
    }

    /// Fetches related keywords for `seed`.
    ///
    /// Entries are renamed to canonical fields, censored volumes are parsed
    /// to flagged lower bounds, entries below `min_volume` on either PC or
    /// mobile are dropped, and the rest are sorted by total volume
    /// descending. Called exactly once per seed; nothing is retried.
    ///
    /// # Errors
    ///
    /// - [`NaverError::DataShape`] if `seed` is blank or `keywordList` is missing.
    /// - [`NaverError::Config`] if the request cannot be signed.
    /// - [`NaverError::UpstreamStatus`] on a non-2xx response.
    /// - [`NaverError::Http`] on network failure or timeout.
    /// - [`NaverError::Deserialize`] if the body is not JSON.
    pub async fn related_keywords(
        &self,
        seed: &str,
        min_volume: u64,
    ) -> Result<RelatedKeywords, NaverError> {
        let seed = seed.trim();
        if seed.is_empty() {
            return Err(NaverError::shape(ENDPOINT, "seed keyword is empty"));
        }

        let url = self.build_url(seed);
        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        let headers = SignedHeaders::new(&self.credentials, "GET", KEYWORD_TOOL_PATH, timestamp_ms)?
            .to_header_map()?;

        let response = self.client.get(url).headers(headers).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NaverError::UpstreamStatus {
                endpoint: ENDPOINT.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: KeywordToolResponse =
            serde_json::from_str(&body).map_err(|e| NaverError::Deserialize {
                context: format!("{ENDPOINT}(hintKeywords={seed})"),
                source: e,
            })?;
        let entries = parsed.keyword_list.ok_or_else(|| {
            NaverError::shape(
                format!("{ENDPOINT}(hintKeywords={seed})"),
                "response has no keywordList",
            )
        })?;

        let total = entries.len();
        let batch = normalize_keyword_list(seed, entries);
        let mut records = filter_min_volume(batch.records, min_volume);
        sort_by_total_search(&mut records);

        tracing::debug!(
            seed,
            upstream = total,
            kept = records.len(),
            skipped = batch.skipped.len(),
            min_volume,
            "normalized related keywords"
        );

        Ok(RelatedKeywords {
            records,
            skipped: batch.skipped,
        })
    }

    /// Builds `/keywordstool?hintKeywords={seed}&showDetail=1`.
    fn build_url(&self, seed: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("hintKeywords", seed)
            .append_pair("showDetail", "1");
        url
    }
}

#[cfg(test)]
#[path = "searchad_test.rs"]
mod tests;
