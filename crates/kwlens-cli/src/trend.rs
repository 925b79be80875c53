use std::time::Duration;

use chrono::NaiveDate;
use kwlens_analysis::{fetch_trend, FetchCache};
use kwlens_core::{AppConfig, TimeUnit, TrendQuery};
use kwlens_naver::OpenApiClient;

/// Prints one `period ratio` line per point, or the warning if the lookup
/// failed. A failed lookup is not a command failure.
pub(crate) async fn run_trend(
    config: &AppConfig,
    keyword: &str,
    start: NaiveDate,
    end: NaiveDate,
    unit: TimeUnit,
) -> anyhow::Result<()> {
    let query = TrendQuery::new(keyword, start, end, unit)?;
    let client = OpenApiClient::with_base_url(
        &config.credentials,
        config.request_timeout_secs,
        &config.user_agent,
        &config.openapi_base_url,
    )?;
    let cache = FetchCache::new(Duration::from_secs(config.cache_ttl_secs));

    let outcome = fetch_trend(&client, &cache, &query).await;
    if let Some(warning) = outcome.warning {
        println!("warning: {warning}");
        return Ok(());
    }
    if outcome.points.is_empty() {
        println!("no trend data for '{}' between {start} and {end}", query.keyword);
        return Ok(());
    }

    println!("{} ({}, {start}..{end})", query.keyword, unit.as_str());
    for point in &outcome.points {
        println!("{} {:.2}", point.period.format("%Y-%m-%d"), point.ratio);
    }
    Ok(())
}
