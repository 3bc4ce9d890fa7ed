use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Invalid popularity {value} for article {url}: must be finite and non-negative")]
    InvalidPopularity { url: String, value: f64 },

    #[error("Invalid size range: min {min} must not exceed max {max}")]
    InvalidSizeRange { min: f64, max: f64 },

    #[error("Invalid external node sizing: {0}")]
    InvalidExternalSize(String),

    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
