//! Error taxonomy for resolving, normalizing and archiving contract sources.
//!
//! Every failure propagates straight to the caller; nothing here is retried.

use std::path::PathBuf;

use thiserror::Error;

/// Why a single explorer request did not yield a usable response.
#[derive(Debug, Error)]
pub enum FetchFailure {
    /// Explorer answered but its `message` was not the success marker.
    #[error("explorer reported: {0}")]
    Upstream(String),
    /// Connect or total request timeout expired.
    #[error("request timed out: {0}")]
    Timeout(#[source] curl::Error),
    /// Curl reported a non-timeout transport error (DNS, connect, TLS, ...).
    #[error("transport error: {0}")]
    Transport(#[source] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Body was not a decodable explorer response.
    #[error("undecodable response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl FetchFailure {
    /// Map a curl error to `Timeout` or `Transport`.
    pub fn from_curl(e: curl::Error) -> Self {
        if e.is_operation_timedout() {
            FetchFailure::Timeout(e)
        } else {
            FetchFailure::Transport(e)
        }
    }
}

#[derive(Debug, Error)]
pub enum ScdError {
    #[error("failed to fetch {address}: {cause}")]
    FetchFailed {
        address: String,
        #[source]
        cause: FetchFailure,
    },

    #[error("unexpected result for {address}: expected exactly 1 entry, got {count}")]
    UnexpectedResultShape { address: String, count: usize },

    #[error("contract {address} is not verified")]
    NotVerified { address: String },

    #[error("proxy chain starting at {start} exceeded {limit} hops (last implementation {last})")]
    ProxyLoopLimitExceeded {
        start: String,
        last: String,
        limit: usize,
    },

    #[error("malformed standard JSON input ({reason}) - {text}")]
    MalformedStandardJsonInput { reason: String, text: String },

    #[error("failed to write archive {path:?}: {source}")]
    ArchiveWriteFailed {
        path: PathBuf,
        #[source]
        source: ArchiveWriteError,
    },
}

/// Underlying cause of an archive write failure.
#[derive(Debug, Error)]
pub enum ArchiveWriteError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, ScdError>;
