// Error types shared by the workflow, the HTTP client and the host adapter.
// The binary wraps these in `anyhow` for reporting; the library keeps them
// typed so callers can tell a network failure from a malformed response.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse failure classes reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection refused, timeout, or a non-success status.
    NetworkFailure,
    /// The create-post response carried no usable `id`.
    MissingIdentifier,
    /// Reading or writing the local document or its media failed.
    LocalIoFailure,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded {status}: {text}")]
    Status { status: StatusCode, text: String },

    #[error("no post id returned: {body}")]
    MissingIdentifier { body: String },

    #[error("{context} ({}): {source}", .path.display())]
    LocalIo {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid front-matter in {}: {message}", .path.display())]
    Frontmatter { path: PathBuf, message: String },

    #[error("settings file {}: {message}", .path.display())]
    Settings { path: PathBuf, message: String },
}

impl Error {
    pub fn local_io(
        context: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Error::LocalIo {
            context,
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) | Error::Status { .. } => ErrorKind::NetworkFailure,
            Error::MissingIdentifier { .. } => ErrorKind::MissingIdentifier,
            Error::LocalIo { .. } | Error::Frontmatter { .. } | Error::Settings { .. } => {
                ErrorKind::LocalIoFailure
            }
        }
    }
}
