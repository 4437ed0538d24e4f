use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Upstream Errors
    #[error("Reference source unavailable: {0}")]
    ReferenceUnavailable(String),

    #[error("Economic data unavailable: {0}")]
    EconomicDataUnavailable(String),

    // System Errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // IO Errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a single source produced no usable quote. Recovered locally by the
/// aggregation pass; only the reference source escalates it into
/// `Error::ReferenceUnavailable`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed quote payload: {0}")]
    MalformedBody(String),

    #[error("missing numeric ask/bid fields")]
    IncompleteQuote,
}
