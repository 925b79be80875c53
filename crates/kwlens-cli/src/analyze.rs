//! `analyze` command handler.
//!
//! Per-seed and per-keyword failures are printed as warnings; the command
//! only fails when configuration is unusable, the CSV cannot be written, or
//! the run produced nothing to show.

use std::path::Path;
use std::time::Duration;

use kwlens_analysis::{
    export_csv_file, informational, recommended, run_analysis, AnalysisOptions, FetchCache,
};
use kwlens_core::{AppConfig, DocumentVertical, KeywordRecord};
use kwlens_naver::{OpenApiClient, SearchAdClient};

const DEFAULT_SEED: &str = "chatgpt";

/// Command-line flags take precedence over environment settings.
pub(crate) fn apply_overrides(
    config: &mut AppConfig,
    min_volume: Option<u64>,
    vertical: Option<DocumentVertical>,
    concurrency: Option<usize>,
) {
    if let Some(min) = min_volume {
        config.min_monthly_volume = min;
    }
    if let Some(v) = vertical {
        config.document_vertical = v;
    }
    if let Some(n) = concurrency {
        config.max_concurrent_lookups = n.max(1);
    }
}

/// Seeds come from the seed file when given, otherwise from `--keywords`,
/// otherwise the default seed.
pub(crate) fn resolve_seeds(
    keywords: Option<&str>,
    seed_file: Option<&Path>,
) -> anyhow::Result<Vec<String>> {
    if let Some(path) = seed_file {
        return Ok(kwlens_core::load_seed_file(path)?);
    }
    let seeds = kwlens_core::parse_seed_keywords(keywords.unwrap_or(DEFAULT_SEED));
    if seeds.is_empty() {
        anyhow::bail!("no seed keywords given; pass --keywords \"a, b\" or --seed-file");
    }
    Ok(seeds)
}

pub(crate) async fn run_analyze(
    config: &AppConfig,
    seeds: &[String],
    output: &Path,
    top: usize,
) -> anyhow::Result<()> {
    let keyword_client = SearchAdClient::with_base_url(
        config.credentials.clone(),
        config.request_timeout_secs,
        &config.user_agent,
        &config.searchad_base_url,
    )?;
    let document_client = OpenApiClient::with_base_url(
        &config.credentials,
        config.request_timeout_secs,
        &config.user_agent,
        &config.openapi_base_url,
    )?;
    let cache = FetchCache::new(Duration::from_secs(config.cache_ttl_secs));
    let options = AnalysisOptions::from_config(config);

    println!("Analyzing {} seed keyword(s): {}", seeds.len(), seeds.join(", "));
    let session = run_analysis(&keyword_client, &document_client, &cache, seeds, &options).await?;

    for warning in session.warnings() {
        println!("warning: {warning}");
    }

    if !session.has_results() {
        if session.all_seeds_failed() {
            anyhow::bail!("no results: every seed keyword failed");
        }
        anyhow::bail!(
            "no results: no related keyword reached {} monthly searches on both PC and mobile",
            options.min_volume
        );
    }

    let table = session.full_table();
    println!("\n{} related keywords", table.len());
    if session.all_document_counts_failed() {
        println!(
            "warning: every document count lookup failed; document counts and ratios below are placeholders"
        );
    }

    println!("\nRecommended (low competition, high mobile volume):");
    print_view(&recommended(table, top));

    println!("\nInformational (questions and comparisons):");
    let info = informational(table, top);
    if info.is_empty() {
        println!("  (none)");
    } else {
        print_view(&info);
    }

    export_csv_file(output, table)?;
    println!("\nCSV written to {}", output.display());
    tracing::info!(session = %session.id, rows = table.len(), "analysis complete");

    Ok(())
}

fn print_view(rows: &[&KeywordRecord]) {
    println!(
        "  {:<30} {:>8} {:>8} {:>9} {:<6} {:>12} {:>10}",
        "keyword", "pc", "mobile", "total", "comp", "documents", "ratio"
    );
    for row in rows {
        println!("  {}", format_row(row));
    }
}

pub(crate) fn format_row(r: &KeywordRecord) -> String {
    let docs = r
        .total_document_count()
        .map_or_else(|| "n/a".to_string(), |d| d.to_string());
    format!(
        "{:<30} {:>8} {:>8} {:>9} {:<6} {:>12} {:>10}",
        r.keyword,
        r.monthly_search_count_pc.to_string(),
        r.monthly_search_count_mobile.to_string(),
        r.total_search_count(),
        r.competition_index,
        docs,
        fmt_ratio(r.competition_ratio()),
    )
}

fn fmt_ratio(ratio: Option<f64>) -> String {
    ratio.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}
