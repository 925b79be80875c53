use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Every seed was blank after trimming.
    #[error("no seed keywords to analyze")]
    NoSeeds,

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
