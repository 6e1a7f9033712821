use thiserror::Error;

pub type TrendResult<T> = Result<T, TrendError>;

#[derive(Debug, Error)]
pub enum TrendError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid timestamp: `{input}`")]
    InvalidTimestamp { input: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("view state storage failed: {0}")]
    Storage(String),
}
