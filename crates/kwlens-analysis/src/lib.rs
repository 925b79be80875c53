//! Keyword-metrics aggregation for kwlens.
//!
//! Fetches related keywords for each seed, enriches every row with a
//! document count through a bounded worker pool, derives the competition
//! ratio, and exposes read-only ranked views plus CSV export. Per-unit
//! failures become [`RunWarning`]s on the [`AnalysisSession`]; only a run
//! with no seeds at all is an error.

pub mod cache;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod session;
pub mod sources;
pub mod trend;
pub mod views;
pub mod warnings;

pub use cache::{CacheKey, FetchCache, TtlCache};
pub use error::AnalysisError;
pub use export::{export_csv_file, to_csv_bytes, write_csv, CSV_HEADERS};
pub use pipeline::{enrich_document_counts, run_analysis, AnalysisOptions};
pub use session::AnalysisSession;
pub use sources::{DocumentCountSource, KeywordSource, TrendSource};
pub use trend::{fetch_trend, TrendOutcome};
pub use views::{informational, is_informational, recommended, INFORMATIONAL_MARKERS};
pub use warnings::RunWarning;
