use std::cmp::Ordering;

/// A monthly query count as reported by the keyword tool.
///
/// Small volumes come back censored (`"< 10"`); those parse to the bound
/// itself with `censored` set, so `value` is a lower bound rather than an
/// exact figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchCount {
    pub value: u64,
    pub censored: bool,
}

impl SearchCount {
    #[must_use]
    pub fn exact(value: u64) -> Self {
        Self {
            value,
            censored: false,
        }
    }

    #[must_use]
    pub fn at_least(value: u64) -> Self {
        Self {
            value,
            censored: true,
        }
    }

    /// Parses `"1234"`, `"<10"`, or `"< 10"`. Thousands separators are
    /// tolerated. Returns `None` for anything else.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let (digits, censored) = match trimmed.strip_prefix('<') {
            Some(rest) => (rest.trim(), true),
            None => (trimmed, false),
        };
        let cleaned: String = digits.chars().filter(|c| *c != ',').collect();
        if cleaned.is_empty() {
            return None;
        }
        let value = cleaned.parse::<u64>().ok()?;
        Some(Self { value, censored })
    }
}

impl std::fmt::Display for SearchCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.censored {
            write!(f, "<{}", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// Ranked interpretation of the upstream `compIdx` label.
///
/// Only used for ordering; the raw label stays on the record untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
    Other,
}

impl CompetitionLevel {
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "낮음" | "low" => CompetitionLevel::Low,
            "중간" | "medium" | "mid" => CompetitionLevel::Medium,
            "높음" | "high" => CompetitionLevel::High,
            _ => CompetitionLevel::Other,
        }
    }
}

/// Optional click and ad-depth columns the keyword tool returns alongside
/// the volumes. Carried through to the export, never used for ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClickMetrics {
    pub monthly_avg_pc_clicks: Option<f64>,
    pub monthly_avg_mobile_clicks: Option<f64>,
    pub monthly_avg_pc_ctr: Option<f64>,
    pub monthly_avg_mobile_ctr: Option<f64>,
    pub ad_depth: Option<f64>,
}

/// One related keyword returned for a seed keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordRecord {
    /// The seed keyword whose lookup produced this row.
    pub seed_keyword: String,
    pub keyword: String,
    pub monthly_search_count_pc: SearchCount,
    pub monthly_search_count_mobile: SearchCount,
    /// Upstream `compIdx`, unmodified.
    pub competition_index: String,
    pub clicks: ClickMetrics,
    total_document_count: Option<u64>,
}

impl KeywordRecord {
    #[must_use]
    pub fn new(
        seed_keyword: impl Into<String>,
        keyword: impl Into<String>,
        pc: SearchCount,
        mobile: SearchCount,
        competition_index: impl Into<String>,
    ) -> Self {
        Self {
            seed_keyword: seed_keyword.into(),
            keyword: keyword.into(),
            monthly_search_count_pc: pc,
            monthly_search_count_mobile: mobile,
            competition_index: competition_index.into(),
            clicks: ClickMetrics::default(),
            total_document_count: None,
        }
    }

    #[must_use]
    pub fn with_clicks(mut self, clicks: ClickMetrics) -> Self {
        self.clicks = clicks;
        self
    }

    /// PC plus mobile monthly volume. Always derived, never read from upstream.
    #[must_use]
    pub fn total_search_count(&self) -> u64 {
        self.monthly_search_count_pc
            .value
            .saturating_add(self.monthly_search_count_mobile.value)
    }

    /// `true` when either monthly volume is a censored lower bound.
    #[must_use]
    pub fn is_approximate(&self) -> bool {
        self.monthly_search_count_pc.censored || self.monthly_search_count_mobile.censored
    }

    #[must_use]
    pub fn competition_level(&self) -> CompetitionLevel {
        CompetitionLevel::from_label(&self.competition_index)
    }

    /// `None` until the document-count stage has run for this record.
    #[must_use]
    pub fn total_document_count(&self) -> Option<u64> {
        self.total_document_count
    }

    pub fn set_total_document_count(&mut self, count: u64) {
        self.total_document_count = Some(count);
    }

    /// Documents per monthly search. `None` is the undefined value: either
    /// the document count is unknown or the record has no search volume.
    #[must_use]
    pub fn competition_ratio(&self) -> Option<f64> {
        self.total_document_count
            .and_then(|docs| competition_ratio(docs, self.total_search_count()))
    }

    /// Ordering used by the "recommended" view: competition ascending, then
    /// mobile volume descending.
    #[must_use]
    pub fn cmp_recommended(&self, other: &Self) -> Ordering {
        self.competition_level()
            .cmp(&other.competition_level())
            .then_with(|| {
                other
                    .monthly_search_count_mobile
                    .value
                    .cmp(&self.monthly_search_count_mobile.value)
            })
    }

    /// Ordering used by the "informational" view: competition ascending,
    /// then total volume descending.
    #[must_use]
    pub fn cmp_informational(&self, other: &Self) -> Ordering {
        self.competition_level()
            .cmp(&other.competition_level())
            .then_with(|| other.total_search_count().cmp(&self.total_search_count()))
    }
}

/// `documents / searches`, or `None` when `searches` is zero.
#[must_use]
pub fn competition_ratio(documents: u64, searches: u64) -> Option<f64> {
    if searches == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = documents as f64 / searches as f64;
    Some(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(keyword: &str, pc: u64, mobile: u64, comp: &str) -> KeywordRecord {
        KeywordRecord::new(
            "seed",
            keyword,
            SearchCount::exact(pc),
            SearchCount::exact(mobile),
            comp,
        )
    }

    #[test]
    fn censored_count_parses_to_lower_bound() {
        assert_eq!(SearchCount::parse("<10"), Some(SearchCount::at_least(10)));
        assert_eq!(SearchCount::parse("< 10"), Some(SearchCount::at_least(10)));
    }

    #[test]
    fn exact_count_is_not_flagged() {
        assert_eq!(SearchCount::parse("1234"), Some(SearchCount::exact(1234)));
        assert_eq!(
            SearchCount::parse(" 1,234 "),
            Some(SearchCount::exact(1234))
        );
    }

    #[test]
    fn garbage_count_is_rejected() {
        assert_eq!(SearchCount::parse(""), None);
        assert_eq!(SearchCount::parse("<"), None);
        assert_eq!(SearchCount::parse("many"), None);
        assert_eq!(SearchCount::parse("-5"), None);
    }

    #[test]
    fn display_keeps_censor_marker() {
        assert_eq!(SearchCount::at_least(10).to_string(), "<10");
        assert_eq!(SearchCount::exact(42).to_string(), "42");
    }

    #[test]
    fn total_is_sum_of_pc_and_mobile() {
        let r = record("coffee shop", 60, 60, "낮음");
        assert_eq!(r.total_search_count(), 120);
    }

    #[test]
    fn ratio_undefined_until_enriched() {
        let r = record("coffee", 10, 10, "낮음");
        assert_eq!(r.total_document_count(), None);
        assert_eq!(r.competition_ratio(), None);
    }

    #[test]
    fn ratio_undefined_for_zero_volume() {
        let mut r = record("nothing", 0, 0, "낮음");
        r.set_total_document_count(500);
        assert_eq!(r.competition_ratio(), None);
    }

    #[test]
    fn ratio_divides_documents_by_volume() {
        let mut r = record("coffee", 100, 300, "높음");
        r.set_total_document_count(1000);
        assert_eq!(r.competition_ratio(), Some(2.5));
    }

    #[test]
    fn zero_documents_is_a_defined_ratio() {
        let mut r = record("coffee", 100, 300, "높음");
        r.set_total_document_count(0);
        assert_eq!(r.competition_ratio(), Some(0.0));
    }

    #[test]
    fn competition_labels_rank_low_to_high() {
        assert!(CompetitionLevel::from_label("낮음") < CompetitionLevel::from_label("중간"));
        assert!(CompetitionLevel::from_label("중간") < CompetitionLevel::from_label("높음"));
        assert!(CompetitionLevel::from_label("높음") < CompetitionLevel::from_label("???"));
        assert_eq!(CompetitionLevel::from_label("LOW"), CompetitionLevel::Low);
    }

    #[test]
    fn recommended_order_prefers_low_competition() {
        let a = record("a", 100, 100, "낮음");
        let b = record("b", 100, 100, "높음");
        assert_eq!(a.cmp_recommended(&b), Ordering::Less);
    }

    #[test]
    fn recommended_order_breaks_ties_by_mobile_volume() {
        let a = record("a", 100, 900, "중간");
        let b = record("b", 5000, 100, "중간");
        assert_eq!(a.cmp_recommended(&b), Ordering::Less);
        assert_eq!(b.cmp_recommended(&a), Ordering::Greater);
    }

    #[test]
    fn informational_order_breaks_ties_by_total_volume() {
        let a = record("a", 100, 900, "중간");
        let b = record("b", 5000, 100, "중간");
        assert_eq!(b.cmp_informational(&a), Ordering::Less);
    }

    #[test]
    fn approximate_when_either_count_censored() {
        let r = KeywordRecord::new(
            "seed",
            "kw",
            SearchCount::at_least(10),
            SearchCount::exact(80),
            "낮음",
        );
        assert!(r.is_approximate());
        assert!(!record("kw", 1, 1, "낮음").is_approximate());
    }
}
