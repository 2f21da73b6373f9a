/// Failures while turning a corpus into an [`Index`](crate::Index).
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("corpus is empty")]
    EmptyCorpus,

    #[error("vectorization failed: {0}")]
    Vectorization(#[from] VectorizationError),

    #[error("invalid build options: {0}")]
    InvalidOptions(String),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum VectorizationError {
    #[error("empty vocabulary; every overview reduced to stop-words or nothing")]
    EmptyVocabulary,
}

/// Failures of a recommendation lookup.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("movie not found: {0}")]
    NotFound(String),

    #[error("index is not built yet")]
    NotReady,
}

/// Failures while reading the movie dataset.
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required columns: {0:?}")]
    MissingColumns(Vec<String>),

    #[error("no valid movies found after cleaning data")]
    NoValidRecords,
}
