//! Sentiment analysis pipeline for binary (positive / negative) classification.
//!
//! ## Main Types
//!
//! - [`SentimentClassifier`] - Labels texts with a calibrated confidence, one forward pass per call
//! - [`SentimentAnalyzer`] - Formats classifier output as display strings
//! - [`SentimentClassifierBuilder`] - Builder pattern for checkpoint and device configuration
//! - [`SentimentAnalysisModel`] - Trait a pretrained checkpoint implements to plug in
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use sentiment_classification::pipelines::sentiment_analysis_pipeline::*;
//!
//! # fn run() -> sentiment_classification::core::Result<()> {
//! let classifier = SentimentClassifierBuilder::distilbert().build()?;
//! let analyzer = SentimentAnalyzer::new(classifier);
//!
//! for line in analyzer.analyze_batch(&["I love this!", "This is terrible."])? {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod builder;
pub mod model;
pub mod pipeline;

pub use analyzer::SentimentAnalyzer;
pub use builder::SentimentClassifierBuilder;
pub use model::SentimentAnalysisModel;
pub use pipeline::{decode_scores, SentimentClassifier};

pub use crate::core::{ClassificationResult, Label, LabelMapping, Result, SentimentError};
pub use crate::models::{DistilBertOptions, DistilBertSentimentModel, EncodedBatch};
pub use crate::pipelines::utils::{DeviceRequest, DeviceSelectable};
