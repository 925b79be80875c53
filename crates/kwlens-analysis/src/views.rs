//! Read-only ranked views over a keyword table.

use kwlens_core::KeywordRecord;

/// Substrings that mark a keyword as a question or comparison query:
/// method, how, why, meaning, difference, comparison.
pub const INFORMATIONAL_MARKERS: &[&str] = &[
    "방법",
    "어떻게",
    "왜",
    "뜻",
    "의미",
    "차이",
    "비교",
    "how",
    "why",
    "meaning",
    "difference",
    "versus",
    "compare",
];

/// `true` if `keyword` contains any informational marker (ASCII
/// case-insensitive).
#[must_use]
pub fn is_informational(keyword: &str) -> bool {
    let lowered = keyword.to_lowercase();
    INFORMATIONAL_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// Lowest competition first, then highest mobile volume; top `limit`.
#[must_use]
pub fn recommended(records: &[KeywordRecord], limit: usize) -> Vec<&KeywordRecord> {
    let mut view: Vec<&KeywordRecord> = records.iter().collect();
    view.sort_by(|a, b| a.cmp_recommended(b));
    view.truncate(limit);
    view
}

/// Informational keywords only, lowest competition first, then highest
/// total volume; top `limit`.
#[must_use]
pub fn informational(records: &[KeywordRecord], limit: usize) -> Vec<&KeywordRecord> {
    let mut view: Vec<&KeywordRecord> = records
        .iter()
        .filter(|r| is_informational(&r.keyword))
        .collect();
    view.sort_by(|a, b| a.cmp_informational(b));
    view.truncate(limit);
    view
}
