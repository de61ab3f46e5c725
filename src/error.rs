use thiserror::Error;

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Every failure is terminal for the current invocation: nothing is retried
/// and no output artifact is valid unless the full pass completed.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Malformed or semantically invalid source spec.
    #[error("invalid source spec: {message}")]
    Config {
        /// Which check failed
        message: String,
    },

    /// The catalogue entry has no resource of the expected format.
    #[error("no {format} resource found in catalogue entry {url}")]
    ResourceNotFound { format: String, url: String },

    /// Header rows yielded mismatched or empty fragments, or the body is
    /// not the expected delimited dialect.
    #[error("malformed table: {message}")]
    Structural {
        /// Which check failed, including row/column indices where known
        message: String,
    },

    /// The data window resolved to no rows. Kept distinct from `Config`:
    /// the spec can look valid and still collapse after the end-relative
    /// offset is applied against the actual row count.
    #[error("data window resolves to no rows (first {first}, last {last})")]
    EmptyWindow { first: usize, last: i64 },

    /// External fetch failure, surfaced verbatim.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Delimited-text read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScrapeError {
    pub fn config(message: impl Into<String>) -> Self {
        ScrapeError::Config {
            message: message.into(),
        }
    }

    pub fn structural(message: impl Into<String>) -> Self {
        ScrapeError::Structural {
            message: message.into(),
        }
    }
}
