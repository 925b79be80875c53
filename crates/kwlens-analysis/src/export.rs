//! CSV export of the full keyword table.
//!
//! UTF-8 without a BOM. The header row is always written, even for an
//! empty table. Undefined values (no document count, zero-volume ratio,
//! missing click metrics) are empty cells.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use kwlens_core::KeywordRecord;

use crate::error::AnalysisError;

pub const CSV_HEADERS: [&str; 15] = [
    "seed_keyword",
    "keyword",
    "monthly_search_count_pc",
    "monthly_search_count_pc_censored",
    "monthly_search_count_mobile",
    "monthly_search_count_mobile_censored",
    "competition_index",
    "total_search_count",
    "total_document_count",
    "competition_ratio",
    "monthly_avg_pc_clicks",
    "monthly_avg_mobile_clicks",
    "monthly_avg_pc_ctr",
    "monthly_avg_mobile_ctr",
    "ad_depth",
];

#[derive(Serialize)]
struct CsvRow<'a> {
    seed_keyword: &'a str,
    keyword: &'a str,
    monthly_search_count_pc: u64,
    monthly_search_count_pc_censored: bool,
    monthly_search_count_mobile: u64,
    monthly_search_count_mobile_censored: bool,
    competition_index: &'a str,
    total_search_count: u64,
    total_document_count: Option<u64>,
    competition_ratio: Option<f64>,
    monthly_avg_pc_clicks: Option<f64>,
    monthly_avg_mobile_clicks: Option<f64>,
    monthly_avg_pc_ctr: Option<f64>,
    monthly_avg_mobile_ctr: Option<f64>,
    ad_depth: Option<f64>,
}

impl<'a> From<&'a KeywordRecord> for CsvRow<'a> {
    fn from(r: &'a KeywordRecord) -> Self {
        Self {
            seed_keyword: &r.seed_keyword,
            keyword: &r.keyword,
            monthly_search_count_pc: r.monthly_search_count_pc.value,
            monthly_search_count_pc_censored: r.monthly_search_count_pc.censored,
            monthly_search_count_mobile: r.monthly_search_count_mobile.value,
            monthly_search_count_mobile_censored: r.monthly_search_count_mobile.censored,
            competition_index: &r.competition_index,
            total_search_count: r.total_search_count(),
            total_document_count: r.total_document_count(),
            competition_ratio: r.competition_ratio(),
            monthly_avg_pc_clicks: r.clicks.monthly_avg_pc_clicks,
            monthly_avg_mobile_clicks: r.clicks.monthly_avg_mobile_clicks,
            monthly_avg_pc_ctr: r.clicks.monthly_avg_pc_ctr,
            monthly_avg_mobile_ctr: r.clicks.monthly_avg_mobile_ctr,
            ad_depth: r.clicks.ad_depth,
        }
    }
}

/// Writes `records` as CSV to `out`, header first, rows in table order.
///
/// # Errors
///
/// Returns [`AnalysisError::Csv`] if serialization or the underlying writer fails.
pub fn write_csv<W: Write>(out: W, records: &[KeywordRecord]) -> Result<(), AnalysisError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(CSV_HEADERS)?;
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// # Errors
///
/// Returns [`AnalysisError::Csv`] if serialization fails.
pub fn to_csv_bytes(records: &[KeywordRecord]) -> Result<Vec<u8>, AnalysisError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, records)?;
    Ok(buf)
}

/// Writes the table to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`AnalysisError::Io`] if the file cannot be created, or
/// [`AnalysisError::Csv`] if writing fails.
pub fn export_csv_file(path: &Path, records: &[KeywordRecord]) -> Result<(), AnalysisError> {
    let file = File::create(path).map_err(|source| AnalysisError::Io {
        path: path.display().to_string(),
        source,
    })?;
    write_csv(file, records)?;
    tracing::info!(path = %path.display(), rows = records.len(), "exported keyword table");
    Ok(())
}
