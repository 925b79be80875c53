use kwlens_core::{TrendPoint, TrendQuery};

use crate::cache::{CacheKey, FetchCache};
use crate::sources::TrendSource;
use crate::warnings::RunWarning;

/// Result of a trend lookup. A failed lookup yields no points and a warning.
#[derive(Debug, Clone, Default)]
pub struct TrendOutcome {
    pub points: Vec<TrendPoint>,
    pub warning: Option<RunWarning>,
}

/// Fetches the relative search-volume series for `query`.
///
/// Never fails: upstream errors become [`RunWarning::TrendFailed`].
pub async fn fetch_trend<T: TrendSource>(
    source: &T,
    cache: &FetchCache,
    query: &TrendQuery,
) -> TrendOutcome {
    let start = query.start.to_string();
    let end = query.end.to_string();
    let key = CacheKey::new(
        "datalab/search",
        &[&query.keyword, &start, &end, query.unit.as_str()],
    );

    if let Some(points) = cache.trends.get(&key).await {
        tracing::debug!(keyword = %query.keyword, "trend cache hit");
        return TrendOutcome {
            points,
            warning: None,
        };
    }

    match source.search_trend(query).await {
        Ok(points) => {
            tracing::info!(keyword = %query.keyword, points = points.len(), "trend fetched");
            cache.trends.insert(key, points.clone()).await;
            TrendOutcome {
                points,
                warning: None,
            }
        }
        Err(e) => {
            tracing::warn!(keyword = %query.keyword, kind = %e.kind(), error = %e, "trend lookup failed");
            TrendOutcome {
                points: Vec::new(),
                warning: Some(RunWarning::trend_failed(&query.keyword, &e)),
            }
        }
    }
}
