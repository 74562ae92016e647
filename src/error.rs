//! Error types for sentiment-rs.
//!
//! Every variant here is raised while loading the encoder's inputs. Once an
//! [`crate::SequenceEncoder`] exists, encoding cannot fail.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration violates an encoder invariant.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Vocabulary has negative or duplicate ranks.
    #[error("malformed vocabulary: {0}")]
    MalformedVocabulary(String),

    /// An asset file could not be read.
    #[error("reading {}: {source}", path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON error.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// Candle tensor error.
    #[error("candle: {0}")]
    Candle(#[from] candle_core::Error),
}

impl Error {
    pub(crate) fn asset(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Asset {
            path: path.into(),
            source,
        }
    }
}
