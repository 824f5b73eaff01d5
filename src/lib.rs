pub mod core;
pub mod loaders;
pub mod models;
pub mod pipelines;

// Re-export the types a front end needs
pub use crate::core::{ClassificationResult, Label, LabelMapping, Result, SentimentError};
pub use pipelines::sentiment_analysis_pipeline::{
    SentimentAnalyzer, SentimentClassifier, SentimentClassifierBuilder,
};
pub use pipelines::utils::DeviceSelectable;
