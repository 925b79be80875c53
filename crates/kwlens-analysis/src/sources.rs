//! Fetcher seams used by the pipeline.
//!
//! The Naver clients implement these directly; tests substitute in-process
//! fakes with scripted latency and failures.

use std::future::Future;

use kwlens_core::{DocumentVertical, TrendPoint, TrendQuery};
use kwlens_naver::{NaverError, OpenApiClient, RelatedKeywords, SearchAdClient};

/// Related-keyword metrics for one seed.
pub trait KeywordSource {
    fn related_keywords(
        &self,
        seed: &str,
        min_volume: u64,
    ) -> impl Future<Output = Result<RelatedKeywords, NaverError>>;
}

/// Total document count for one keyword.
pub trait DocumentCountSource {
    fn document_count(
        &self,
        keyword: &str,
        vertical: DocumentVertical,
    ) -> impl Future<Output = Result<u64, NaverError>>;
}

/// Relative search-volume series for one keyword.
pub trait TrendSource {
    fn search_trend(
        &self,
        query: &TrendQuery,
    ) -> impl Future<Output = Result<Vec<TrendPoint>, NaverError>>;
}

impl KeywordSource for SearchAdClient {
    fn related_keywords(
        &self,
        seed: &str,
        min_volume: u64,
    ) -> impl Future<Output = Result<RelatedKeywords, NaverError>> {
        SearchAdClient::related_keywords(self, seed, min_volume)
    }
}

impl DocumentCountSource for OpenApiClient {
    fn document_count(
        &self,
        keyword: &str,
        vertical: DocumentVertical,
    ) -> impl Future<Output = Result<u64, NaverError>> {
        OpenApiClient::document_count(self, keyword, vertical)
    }
}

impl TrendSource for OpenApiClient {
    fn search_trend(
        &self,
        query: &TrendQuery,
    ) -> impl Future<Output = Result<Vec<TrendPoint>, NaverError>> {
        OpenApiClient::search_trend(self, query)
    }
}
