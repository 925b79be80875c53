use kwlens_naver::{ErrorKind, NaverError};

/// A failure local to one unit of work. Recorded on the session and shown
/// to the user; never aborts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunWarning {
    /// The keyword-tool call for a seed failed; the seed contributes no rows.
    SeedFailed {
        seed: String,
        kind: ErrorKind,
        message: String,
    },
    /// One upstream row for a seed was unusable and was dropped.
    MalformedKeyword { seed: String, message: String },
    /// The document-count lookup failed; the row's count was set to 0.
    DocumentCountFailed {
        keyword: String,
        kind: ErrorKind,
        message: String,
    },
    /// The trend lookup failed; no points are shown.
    TrendFailed {
        keyword: String,
        kind: ErrorKind,
        message: String,
    },
}

impl RunWarning {
    pub(crate) fn seed_failed(seed: &str, err: &NaverError) -> Self {
        RunWarning::SeedFailed {
            seed: seed.to_string(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub(crate) fn document_count_failed(keyword: &str, err: &NaverError) -> Self {
        RunWarning::DocumentCountFailed {
            keyword: keyword.to_string(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub(crate) fn trend_failed(keyword: &str, err: &NaverError) -> Self {
        RunWarning::TrendFailed {
            keyword: keyword.to_string(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for RunWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunWarning::SeedFailed {
                seed,
                kind,
                message,
            } => write!(f, "seed '{seed}' skipped ({kind}): {message}"),
            RunWarning::MalformedKeyword { seed, message } => {
                write!(f, "dropped a row for seed '{seed}': {message}")
            }
            RunWarning::DocumentCountFailed {
                keyword,
                kind,
                message,
            } => write!(
                f,
                "document count for '{keyword}' set to 0 ({kind}): {message}"
            ),
            RunWarning::TrendFailed {
                keyword,
                kind,
                message,
            } => write!(f, "trend for '{keyword}' unavailable ({kind}): {message}"),
        }
    }
}
