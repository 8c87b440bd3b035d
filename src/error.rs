use std::path::PathBuf;

/// Failures the extraction pipeline surfaces to callers.
///
/// Malformed markup and undecodable bytes are absorbed by the loader and never show up here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown encoding label {0:?}")]
    UnknownEncoding(String),

    #[error("heading level {0} is outside 1..=6")]
    InvalidHeadingLevel(u8),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
