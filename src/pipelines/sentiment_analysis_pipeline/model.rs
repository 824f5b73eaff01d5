use crate::core::Result;
use crate::models::EncodedBatch;
use candle_core::{Device, Tensor};
use std::collections::HashMap;

/// Capability a pretrained sequence-classification checkpoint provides to
/// the classifier: turn texts into one padded numeric batch, and turn that
/// batch into a raw `(batch, num_labels)` score matrix.
///
/// Implementations own their weights and tokenizer. Inference must not
/// record a differentiation graph.
pub trait SentimentAnalysisModel {
    type Options: std::fmt::Debug + Clone;

    /// Loads the checkpoint onto `device`. Failures are
    /// [`SentimentError::ResourceUnavailable`](crate::core::SentimentError).
    fn new(options: Self::Options, device: Device) -> Result<Self>
    where
        Self: Sized;

    /// Tokenizes all texts in one call with truncation and batch-longest
    /// padding.
    fn tokenize(&self, texts: &[&str]) -> Result<EncodedBatch>;

    /// One forward pass over the whole batch, returning unnormalised scores.
    fn infer(&self, batch: &EncodedBatch) -> Result<Tensor>;

    /// The checkpoint's own `id2label` metadata, if it ships any.
    fn id2label(&self) -> Option<&HashMap<String, String>>;

    fn device(&self) -> &Device;
}
