use thiserror::Error;

/// Errors raised while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    /// The address was rejected before any request was sent
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The remote host could not be reached
    #[error("failed to connect to {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No response arrived within the allowed time
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout {
        url: String,
        timeout: std::time::Duration,
    },

    /// The server answered with a non-success status
    #[error("{status} returned by {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Any other transport or decoding failure
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// HTTP status code carried by a `Status` error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(status.as_u16()),
            _ => None,
        }
    }
}

/// Errors raised by the table accumulator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The row carries keys that are not columns of the table
    #[error("These keys are not columns of the table: {}.", .0.join(", "))]
    KeysNotColumns(Vec<String>),

    /// The table has columns the row does not provide
    #[error("These columns are not row keys: {}.", .0.join(", "))]
    ColumnsNotKeys(Vec<String>),

    /// An argument did not have the expected shape
    #[error("{argument} must be {expected}")]
    TypeMismatch {
        argument: &'static str,
        expected: &'static str,
    },
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid listing URL '{0}'")]
    ListingUrl(String),

    #[error("invalid description selector '{0}'")]
    Selector(String),

    #[error("invalid link pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors that abort a scrape run
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Table(#[from] TableError),
}
