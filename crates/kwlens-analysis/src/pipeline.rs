//! Analysis run orchestration.
//!
//! 1. Fetch related keywords for each seed, one call at a time.
//! 2. Fan document-count lookups out over a bounded pool.
//! 3. Write counts back by index so row order never depends on completion order.
//!
//! Every external call is attempted once. Failures are recorded as
//! [`RunWarning`]s and the run continues.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::stream::{self, StreamExt};

use kwlens_core::{AppConfig, DocumentVertical, KeywordRecord};
use kwlens_naver::NaverError;

use crate::cache::{CacheKey, FetchCache};
use crate::error::AnalysisError;
use crate::session::AnalysisSession;
use crate::sources::{DocumentCountSource, KeywordSource};
use crate::warnings::RunWarning;

const PROGRESS_EVERY: usize = 10;

/// Tunables for one run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Both PC and mobile monthly volume must reach this to keep a row.
    pub min_volume: u64,
    /// Pause between consecutive keyword-tool calls.
    pub seed_delay: Duration,
    /// Upper bound on in-flight document-count lookups.
    pub max_concurrent: usize,
    pub vertical: DocumentVertical,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            min_volume: 50,
            seed_delay: Duration::from_millis(1000),
            max_concurrent: 8,
            vertical: DocumentVertical::Web,
        }
    }
}

impl AnalysisOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            min_volume: config.min_monthly_volume,
            seed_delay: Duration::from_millis(config.seed_delay_ms),
            max_concurrent: config.max_concurrent_lookups.max(1),
            vertical: config.document_vertical,
        }
    }
}

/// Runs one full analysis.
///
/// Seeds are trimmed and blanks dropped. A seed whose keyword-tool call
/// fails is skipped with a warning. If every seed fails, or nothing
/// survives filtering, the returned session has an empty table and
/// [`AnalysisSession::has_results`] is `false`.
///
/// # Errors
///
/// Returns [`AnalysisError::NoSeeds`] if no non-blank seed was given.
pub async fn run_analysis<K, D>(
    keywords: &K,
    documents: &D,
    cache: &FetchCache,
    seeds: &[String],
    options: &AnalysisOptions,
) -> Result<AnalysisSession, AnalysisError>
where
    K: KeywordSource,
    D: DocumentCountSource,
{
    let seeds: Vec<String> = seeds
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if seeds.is_empty() {
        return Err(AnalysisError::NoSeeds);
    }

    let mut session = AnalysisSession::start(seeds.clone());
    tracing::info!(session = %session.id, seeds = seeds.len(), "starting keyword analysis");

    collect_related_keywords(keywords, cache, &seeds, options, &mut session).await;

    if session.all_seeds_failed() {
        tracing::warn!(
            session = %session.id,
            attempted = seeds.len(),
            "every seed keyword failed; no results"
        );
    }

    if session.has_results() {
        tracing::info!(
            session = %session.id,
            related = session.full_table().len(),
            "related keywords collected"
        );
        let warnings = enrich_document_counts(
            documents,
            cache,
            session.table_mut(),
            options.vertical,
            options.max_concurrent,
        )
        .await;
        for warning in warnings {
            session.warn(warning);
        }
        if session.all_document_counts_failed() {
            tracing::warn!(
                session = %session.id,
                rows = session.full_table().len(),
                "every document count lookup failed"
            );
        }
    }

    session.finish();
    Ok(session)
}

/// Sequential keyword-tool stage.
async fn collect_related_keywords<K: KeywordSource>(
    source: &K,
    cache: &FetchCache,
    seeds: &[String],
    options: &AnalysisOptions,
    session: &mut AnalysisSession,
) {
    let min_volume = options.min_volume.to_string();
    let mut called_upstream = false;

    for seed in seeds {
        let key = CacheKey::case_sensitive("keywordstool", &[seed, &min_volume]);
        if let Some(records) = cache.keywords.get(&key).await {
            tracing::debug!(seed = %seed, rows = records.len(), "keyword cache hit");
            session.extend_table(records);
            continue;
        }

        if called_upstream && !options.seed_delay.is_zero() {
            tokio::time::sleep(options.seed_delay).await;
        }
        called_upstream = true;

        match source.related_keywords(seed, options.min_volume).await {
            Ok(related) => {
                for skipped in &related.skipped {
                    session.warn(RunWarning::MalformedKeyword {
                        seed: seed.clone(),
                        message: skipped.to_string(),
                    });
                }
                tracing::debug!(seed = %seed, rows = related.records.len(), "related keywords fetched");
                cache.keywords.insert(key, related.records.clone()).await;
                session.extend_table(related.records);
            }
            Err(e) => {
                tracing::warn!(seed = %seed, kind = %e.kind(), error = %e, "seed keyword failed; skipping");
                session.record_seed_failure(RunWarning::seed_failed(seed, &e));
            }
        }
    }
}

/// Looks up a document count for every record concurrently and assigns the
/// results by index.
///
/// At most `max_concurrent` lookups are in flight. A failed lookup sets the
/// record's count to `0` and yields a [`RunWarning::DocumentCountFailed`];
/// the rest of the batch is unaffected. Returns once every lookup has
/// finished or timed out.
pub async fn enrich_document_counts<D: DocumentCountSource>(
    source: &D,
    cache: &FetchCache,
    records: &mut [KeywordRecord],
    vertical: DocumentVertical,
    max_concurrent: usize,
) -> Vec<RunWarning> {
    let total = records.len();
    let keywords: Vec<String> = records.iter().map(|r| r.keyword.clone()).collect();
    let completed = AtomicUsize::new(0);
    let completed = &completed;

    let results: Vec<(usize, Result<u64, NaverError>)> = stream::iter(keywords.iter().enumerate())
        .map(|(index, keyword)| async move {
            let result = lookup_document_count(source, cache, keyword, vertical).await;
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if done % PROGRESS_EVERY == 0 || done == total {
                tracing::info!(done, total, "document count lookups");
            }
            (index, result)
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    let mut slots: Vec<u64> = vec![0; total];
    let mut warnings = Vec::new();
    for (index, result) in results {
        match result {
            Ok(count) => slots[index] = count,
            Err(e) => {
                tracing::warn!(
                    keyword = %keywords[index],
                    kind = %e.kind(),
                    error = %e,
                    "document count lookup failed; using 0"
                );
                warnings.push(RunWarning::document_count_failed(&keywords[index], &e));
            }
        }
    }

    for (record, count) in records.iter_mut().zip(slots) {
        record.set_total_document_count(count);
    }

    warnings
}

async fn lookup_document_count<D: DocumentCountSource>(
    source: &D,
    cache: &FetchCache,
    keyword: &str,
    vertical: DocumentVertical,
) -> Result<u64, NaverError> {
    let key = CacheKey::new(endpoint_for(vertical), &[keyword]);
    if let Some(count) = cache.documents.get(&key).await {
        return Ok(count);
    }
    let count = source.document_count(keyword, vertical).await?;
    cache.documents.insert(key, count).await;
    Ok(count)
}

fn endpoint_for(vertical: DocumentVertical) -> &'static str {
    match vertical {
        DocumentVertical::Web => "search/webkr",
        DocumentVertical::Blog => "search/blog",
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
