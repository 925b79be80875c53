//! Keyword-tool payload normalization.
//!
//! Turns raw `keywordList` entries into [`KeywordRecord`]s with canonical
//! field names, interprets censored volumes, and applies the minimum-volume
//! filter and the volume ordering.

use kwlens_core::{ClickMetrics, KeywordRecord, SearchCount};
use serde_json::Value;

use crate::error::NaverError;
use crate::types::RawKeyword;

/// Records that normalized cleanly plus one error per entry that did not.
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    pub records: Vec<KeywordRecord>,
    pub skipped: Vec<NaverError>,
}

/// Normalizes every entry of a `keywordList` array for `seed`.
///
/// Malformed entries are collected in [`NormalizedBatch::skipped`] rather
/// than failing the whole list.
#[must_use]
pub fn normalize_keyword_list(seed: &str, entries: Vec<Value>) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    for (index, entry) in entries.into_iter().enumerate() {
        let label = entry
            .get("relKeyword")
            .and_then(Value::as_str)
            .map_or_else(|| format!("entry #{index}"), str::to_string);

        let raw = match serde_json::from_value::<RawKeyword>(entry) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(seed, keyword = %label, error = %e, "skipping malformed keyword entry");
                batch.skipped.push(NaverError::Deserialize {
                    context: format!("keywordList[{label}] for seed '{seed}'"),
                    source: e,
                });
                continue;
            }
        };

        match normalize_keyword(seed, raw) {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                tracing::warn!(seed, keyword = %label, error = %e, "skipping keyword with unusable counts");
                batch.skipped.push(e);
            }
        }
    }
    batch
}

/// Converts one raw entry into a [`KeywordRecord`].
///
/// # Errors
///
/// Returns [`NaverError::DataShape`] if the keyword is blank or a monthly
/// volume is neither a non-negative integer nor a `"<N"` string.
pub fn normalize_keyword(seed: &str, raw: RawKeyword) -> Result<KeywordRecord, NaverError> {
    let keyword = raw.rel_keyword.trim();
    if keyword.is_empty() {
        return Err(NaverError::shape(
            format!("keywordList for seed '{seed}'"),
            "relKeyword is empty",
        ));
    }

    let pc = parse_count(&raw.monthly_pc_qc_cnt).ok_or_else(|| {
        NaverError::shape(
            format!("keyword '{keyword}'"),
            format!("unusable monthlyPcQcCnt {}", raw.monthly_pc_qc_cnt),
        )
    })?;
    let mobile = parse_count(&raw.monthly_mobile_qc_cnt).ok_or_else(|| {
        NaverError::shape(
            format!("keyword '{keyword}'"),
            format!("unusable monthlyMobileQcCnt {}", raw.monthly_mobile_qc_cnt),
        )
    })?;

    let clicks = ClickMetrics {
        monthly_avg_pc_clicks: parse_metric(raw.monthly_ave_pc_clk_cnt.as_ref()),
        monthly_avg_mobile_clicks: parse_metric(raw.monthly_ave_mobile_clk_cnt.as_ref()),
        monthly_avg_pc_ctr: parse_metric(raw.monthly_ave_pc_ctr.as_ref()),
        monthly_avg_mobile_ctr: parse_metric(raw.monthly_ave_mobile_ctr.as_ref()),
        ad_depth: parse_metric(raw.pl_avg_depth.as_ref()),
    };

    Ok(KeywordRecord::new(
        seed,
        keyword,
        pc,
        mobile,
        raw.comp_idx.unwrap_or_default(),
    )
    .with_clicks(clicks))
}

/// Interprets a volume that may be a JSON integer or a (possibly censored)
/// string.
fn parse_count(value: &Value) -> Option<SearchCount> {
    match value {
        Value::Number(n) => n.as_u64().map(SearchCount::exact),
        Value::String(s) => SearchCount::parse(s),
        _ => None,
    }
}

/// Lenient parse for the pass-through click/CTR columns.
fn parse_metric(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_start_matches('<').trim().parse().ok(),
        _ => None,
    }
}

/// Keeps records whose PC **and** mobile volumes both reach `min_volume`.
///
/// Lowering `min_volume` never drops a record that a higher value kept.
#[must_use]
pub fn filter_min_volume(records: Vec<KeywordRecord>, min_volume: u64) -> Vec<KeywordRecord> {
    records
        .into_iter()
        .filter(|r| {
            r.monthly_search_count_pc.value >= min_volume
                && r.monthly_search_count_mobile.value >= min_volume
        })
        .collect()
}

/// Sorts by total monthly volume, highest first. Ties keep upstream order.
pub fn sort_by_total_search(records: &mut [KeywordRecord]) {
    records.sort_by(|a, b| b.total_search_count().cmp(&a.total_search_count()));
}
