use thiserror::Error;

/// Errors reported by run construction and point ingestion.
#[derive(Debug, Error)]
pub enum KMeansError {
    #[error("input point set is empty")]
    EmptyInput,
    #[error("points must have at least one coordinate")]
    ZeroDimension,
    #[error("dimensionality mismatch: expected {expected} coordinates, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("invalid k = {k} for {n} points; k must be in 1..={n}")]
    InvalidK { k: usize, n: usize },
    #[error("point {index} contains a non-finite coordinate")]
    NonFinite { index: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, KMeansError>;
