use chrono::{DateTime, Utc};
use uuid::Uuid;

use kwlens_core::KeywordRecord;

use crate::views;
use crate::warnings::RunWarning;

/// Number of rows shown in each ranked view.
pub const VIEW_LIMIT: usize = 10;

/// Everything one analysis run produced. Owned by the caller for as long as
/// it wants to show or export the results; the next run builds a new one.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub seeds: Vec<String>,
    table: Vec<KeywordRecord>,
    warnings: Vec<RunWarning>,
    failed_seeds: usize,
}

impl AnalysisSession {
    pub(crate) fn start(seeds: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            seeds,
            table: Vec::new(),
            warnings: Vec::new(),
            failed_seeds: 0,
        }
    }

    pub(crate) fn extend_table(&mut self, records: impl IntoIterator<Item = KeywordRecord>) {
        self.table.extend(records);
    }

    pub(crate) fn table_mut(&mut self) -> &mut [KeywordRecord] {
        &mut self.table
    }

    pub(crate) fn warn(&mut self, warning: RunWarning) {
        self.warnings.push(warning);
    }

    pub(crate) fn record_seed_failure(&mut self, warning: RunWarning) {
        self.failed_seeds += 1;
        self.warnings.push(warning);
    }

    pub(crate) fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// The table in pipeline order: seeds in input order, each seed's rows
    /// by total volume descending.
    #[must_use]
    pub fn full_table(&self) -> &[KeywordRecord] {
        &self.table
    }

    #[must_use]
    pub fn recommended(&self) -> Vec<&KeywordRecord> {
        views::recommended(&self.table, VIEW_LIMIT)
    }

    #[must_use]
    pub fn informational(&self) -> Vec<&KeywordRecord> {
        views::informational(&self.table, VIEW_LIMIT)
    }

    #[must_use]
    pub fn warnings(&self) -> &[RunWarning] {
        &self.warnings
    }

    /// `false` when there is nothing to show: every seed failed or no row
    /// survived filtering.
    #[must_use]
    pub fn has_results(&self) -> bool {
        !self.table.is_empty()
    }

    /// `true` when every seed's keyword-tool call failed.
    #[must_use]
    pub fn all_seeds_failed(&self) -> bool {
        !self.seeds.is_empty() && self.failed_seeds == self.seeds.len()
    }

    /// `true` when the table has rows and not one document-count lookup
    /// succeeded, so every count and ratio shown is a placeholder.
    #[must_use]
    pub fn all_document_counts_failed(&self) -> bool {
        let failed = self
            .warnings
            .iter()
            .filter(|w| matches!(w, RunWarning::DocumentCountFailed { .. }))
            .count();
        !self.table.is_empty() && failed == self.table.len()
    }

    #[must_use]
    pub fn failed_seed_count(&self) -> usize {
        self.failed_seeds
    }
}
