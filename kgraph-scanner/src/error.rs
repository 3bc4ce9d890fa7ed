use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to read collection {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Collection contains no articles")]
    Empty,
}

pub type Result<T> = std::result::Result<T, ScanError>;
