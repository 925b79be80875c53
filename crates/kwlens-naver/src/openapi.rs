//! HTTP client for the Naver OpenAPI: web/blog search totals and `DataLab`
//! search trends.

use std::time::Duration;

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;

use kwlens_core::{DocumentVertical, NaverCredentials, TrendPoint, TrendQuery};

use crate::error::NaverError;
use crate::types::{DatalabRequest, DatalabResponse, KeywordGroup, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://openapi.naver.com";
const CLIENT_ID_HEADER: &str = "X-Naver-Client-Id";
const CLIENT_SECRET_HEADER: &str = "X-Naver-Client-Secret";

/// Client for the OpenAPI search and `DataLab` endpoints.
///
/// Every call is bounded by the per-request timeout given at construction.
pub struct OpenApiClient {
    client: Client,
    client_id: String,
    client_secret: String,
    base_url: String,
}

impl OpenApiClient {
    /// # Errors
    ///
    /// Returns [`NaverError::Config`] if the client id or secret is blank, or
    /// [`NaverError::Http`] if the `reqwest::Client` cannot be constructed.
    pub fn new(
        credentials: &NaverCredentials,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, NaverError> {
        Self::with_base_url(credentials, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Same as [`OpenApiClient::new`].
    pub fn with_base_url(
        credentials: &NaverCredentials,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, NaverError> {
        if credentials.client_id.trim().is_empty() || credentials.client_secret.trim().is_empty()
        {
            return Err(NaverError::Config(
                "OpenAPI client id and client secret are required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            client_id: credentials.client_id.clone(),
            client_secret: credentials.client_secret.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the `total` result count a search vertical reports for `keyword`.
    ///
    /// # Errors
    ///
    /// - [`NaverError::UpstreamStatus`] on a non-2xx response.
    /// - [`NaverError::Http`] on network failure or timeout.
    /// - [`NaverError::Deserialize`] if the body is not JSON.
    /// - [`NaverError::DataShape`] if `total` is missing or negative.
    pub async fn document_count(
        &self,
        keyword: &str,
        vertical: DocumentVertical,
    ) -> Result<u64, NaverError> {
        let url = self.search_url(keyword, vertical);
        let endpoint = format!("search/{}", vertical.as_path());

        let response = self
            .client
            .get(&url)
            .header(CLIENT_ID_HEADER, &self.client_id)
            .header(CLIENT_SECRET_HEADER, &self.client_secret)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NaverError::UpstreamStatus {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| NaverError::Deserialize {
                context: format!("{endpoint}(query={keyword})"),
                source: e,
            })?;

        let total = parsed.total.ok_or_else(|| {
            NaverError::shape(format!("{endpoint}(query={keyword})"), "missing total")
        })?;
        u64::try_from(total).map_err(|_| {
            NaverError::shape(
                format!("{endpoint}(query={keyword})"),
                format!("negative total {total}"),
            )
        })
    }

    /// Fetches the relative search-volume series for one keyword.
    ///
    /// Points are returned in the order the API sends them.
    ///
    /// # Errors
    ///
    /// - [`NaverError::UpstreamStatus`] on a non-2xx response.
    /// - [`NaverError::Http`] on network failure or timeout.
    /// - [`NaverError::Deserialize`] if the body is not JSON.
    /// - [`NaverError::DataShape`] if `results` or a result's `data` is
    ///   missing, or a period is not a `YYYY-MM-DD` date.
    pub async fn search_trend(&self, query: &TrendQuery) -> Result<Vec<TrendPoint>, NaverError> {
        let url = format!("{}/v1/datalab/search", self.base_url);
        let body = trend_request_body(query);

        let response = self
            .client
            .post(&url)
            .header(CLIENT_ID_HEADER, &self.client_id)
            .header(CLIENT_SECRET_HEADER, &self.client_secret)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NaverError::UpstreamStatus {
                endpoint: "datalab/search".to_string(),
                status: status.as_u16(),
            });
        }

        let context = format!("datalab/search(keyword={})", query.keyword);
        let text = response.text().await?;
        let parsed: DatalabResponse =
            serde_json::from_str(&text).map_err(|e| NaverError::Deserialize {
                context: context.clone(),
                source: e,
            })?;

        let results = parsed
            .results
            .ok_or_else(|| NaverError::shape(context.clone(), "missing results"))?;
        let Some(first) = results.into_iter().next() else {
            return Ok(Vec::new());
        };
        let data = first
            .data
            .ok_or_else(|| NaverError::shape(context.clone(), "result has no data"))?;

        data.into_iter()
            .map(|point| {
                let period = NaiveDate::parse_from_str(&point.period, "%Y-%m-%d").map_err(|e| {
                    NaverError::shape(
                        context.clone(),
                        format!("bad period '{}': {e}", point.period),
                    )
                })?;
                Ok(TrendPoint {
                    period,
                    ratio: point.ratio,
                })
            })
            .collect()
    }

    fn search_url(&self, keyword: &str, vertical: DocumentVertical) -> String {
        let encoded = utf8_percent_encode(keyword, NON_ALPHANUMERIC);
        format!(
            "{}/v1/search/{}.json?query={encoded}",
            self.base_url,
            vertical.as_path()
        )
    }
}

fn trend_request_body(query: &TrendQuery) -> DatalabRequest {
    DatalabRequest {
        start_date: query.start.format("%Y-%m-%d").to_string(),
        end_date: query.end.format("%Y-%m-%d").to_string(),
        time_unit: query.unit.as_str().to_string(),
        keyword_groups: vec![KeywordGroup {
            group_name: query.keyword.clone(),
            keywords: vec![query.keyword.clone()],
        }],
    }
}
