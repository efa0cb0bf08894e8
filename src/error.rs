use thiserror::Error;

/// Error types for the lloyd-kmeans library
#[derive(Error, Debug)]
pub enum KMeansError {
    /// The number of clusters k is invalid
    #[error("Invalid k value: {0}")]
    InvalidK(String),

    /// Not enough data points for the requested number of clusters
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Dimension mismatch between points, centroids or the declared dimension
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// A point or initial centroid holds NaN or an infinity
    #[error("Non-finite value: {0}")]
    NonFinite(String),

    /// The iteration cap is outside its accepted bounds
    #[error("Invalid max_iters value: {0}")]
    InvalidMaxIters(String),

    /// The convergence threshold is negative or not a number
    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(String),

    /// The point source produced no records
    #[error("No input provided")]
    EmptyInput,

    /// A record could not be parsed into numbers
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Model has not been fitted yet
    #[error("Model has not been fitted. Call fit() first.")]
    NotFitted,

    /// The delimiter cannot be used to split records
    #[error("Invalid delimiter {0:?}: must be a single ASCII character")]
    InvalidDelimiter(char),

    /// The delimited-record reader failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A working buffer could not be allocated
    #[error("Memory allocation failed: {0}")]
    Allocation(String),
}

/// Coarse classification of a [`KMeansError`].
///
/// Neither class is retried: clustering is deterministic, so running it again
/// on the same inputs fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller handed over something the engine cannot work with.
    Input,
    /// Memory for working buffers could not be acquired.
    Allocation,
}

impl KMeansError {
    /// Which class of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            KMeansError::Allocation(_) => ErrorKind::Allocation,
            _ => ErrorKind::Input,
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        KMeansError::Parse {
            line,
            message: message.into(),
        }
    }
}
