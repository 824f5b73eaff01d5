use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentimentError {
    // Construction
    /// Weights, tokenizer, config, or the requested device could not be
    /// acquired. Only produced while building a classifier.
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// The checkpoint's own label metadata disagrees with the pinned
    /// index -> label table.
    #[error("Incompatible label mapping: expected {expected}, checkpoint declares {found}")]
    IncompatibleLabels { expected: String, found: String },

    // Per call
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Inference failed: {0}")]
    InferenceFailure(String),
}

pub type Result<T> = std::result::Result<T, SentimentError>;

impl SentimentError {
    pub(crate) fn resource(msg: impl Into<String>) -> Self {
        SentimentError::ResourceUnavailable(msg.into())
    }

    pub(crate) fn inference(msg: impl Into<String>) -> Self {
        SentimentError::InferenceFailure(msg.into())
    }
}

impl From<candle_core::Error> for SentimentError {
    fn from(value: candle_core::Error) -> Self {
        SentimentError::InferenceFailure(value.to_string())
    }
}

impl From<hf_hub::api::sync::ApiError> for SentimentError {
    fn from(value: hf_hub::api::sync::ApiError) -> Self {
        SentimentError::ResourceUnavailable(value.to_string())
    }
}

impl From<std::io::Error> for SentimentError {
    fn from(value: std::io::Error) -> Self {
        SentimentError::ResourceUnavailable(value.to_string())
    }
}

impl From<serde_json::Error> for SentimentError {
    fn from(value: serde_json::Error) -> Self {
        SentimentError::ResourceUnavailable(value.to_string())
    }
}
