use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Bucket size for a `DataLab` search-trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Date,
    Week,
    #[default]
    Month,
}

impl TimeUnit {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Date => "date",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" | "day" => Ok(TimeUnit::Date),
            "week" => Ok(TimeUnit::Week),
            "month" => Ok(TimeUnit::Month),
            other => Err(ConfigError::Validation(format!(
                "unknown time unit '{other}'; expected date, week, or month"
            ))),
        }
    }
}

/// One point of a relative search-volume series. `ratio` is on the
/// upstream's 0–100 relative scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: NaiveDate,
    pub ratio: f64,
}

/// A single-keyword trend request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendQuery {
    pub keyword: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub unit: TimeUnit,
}

impl TrendQuery {
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for a blank keyword or when
    /// `start` is after `end`.
    pub fn new(
        keyword: &str,
        start: NaiveDate,
        end: NaiveDate,
        unit: TimeUnit,
    ) -> Result<Self, ConfigError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(ConfigError::Validation(
                "trend keyword must be non-empty".to_string(),
            ));
        }
        if start > end {
            return Err(ConfigError::Validation(format!(
                "trend start {start} is after end {end}"
            )));
        }
        Ok(Self {
            keyword: keyword.to_string(),
            start,
            end,
            unit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn query_trims_keyword() {
        let q = TrendQuery::new("  coffee ", date(2024, 1, 1), date(2024, 6, 30), TimeUnit::Month)
            .unwrap();
        assert_eq!(q.keyword, "coffee");
    }

    #[test]
    fn query_rejects_blank_keyword() {
        let err = TrendQuery::new(" ", date(2024, 1, 1), date(2024, 1, 2), TimeUnit::Date)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn query_rejects_inverted_range() {
        let err = TrendQuery::new("coffee", date(2024, 2, 1), date(2024, 1, 1), TimeUnit::Date)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn time_unit_accepts_day_alias() {
        assert_eq!("day".parse::<TimeUnit>().unwrap(), TimeUnit::Date);
        assert_eq!("Month".parse::<TimeUnit>().unwrap(), TimeUnit::Month);
        assert!("year".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn time_unit_serializes_lowercase() {
        let json = serde_json::to_string(&TimeUnit::Week).unwrap();
        assert_eq!(json, "\"week\"");
    }
}
