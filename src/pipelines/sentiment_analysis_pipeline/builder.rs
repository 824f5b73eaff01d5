use super::model::SentimentAnalysisModel;
use super::pipeline::SentimentClassifier;
use crate::core::Result;
use crate::models::implementations::distilbert::{DistilBertOptions, DistilBertSentimentModel};
use crate::pipelines::utils::{DeviceRequest, DeviceSelectable};
use std::path::PathBuf;

/// Builder for a [`SentimentClassifier`].
///
/// Start from [`SentimentClassifierBuilder::distilbert`] (or `new` with any
/// model's options), chain optional settings, then call `.build()`:
/// - `.model_id(String)`: Override the Hugging Face model repository ID.
/// - `.revision(String)`: Specify a git revision (branch, tag, commit hash).
/// - `.tokenizer_file(PathBuf)`: Provide a local path to `tokenizer.json`.
/// - `.vocab_file(PathBuf)`: Provide a local WordPiece `vocab.txt` instead of a `tokenizer.json`.
/// - `.config_file(PathBuf)`: Provide a local path to `config.json`.
/// - `.weight_files(PathBuf)`: Provide a local path to model weights (`.safetensors` or `.bin`).
/// - `.max_length(usize)`: Truncate inputs to fewer tokens than the model maximum.
/// - `.cpu()` / `.cuda_device(i)` / `.device(d)`: Device selection (see [`DeviceSelectable`]).
pub struct SentimentClassifierBuilder<M: SentimentAnalysisModel> {
    options: M::Options,
    device_request: DeviceRequest,
}

impl<M: SentimentAnalysisModel> SentimentClassifierBuilder<M> {
    pub fn new(options: M::Options) -> Self {
        Self {
            options,
            device_request: DeviceRequest::Default,
        }
    }

    /// Resolves the device, loads the model, and validates its labels.
    ///
    /// Fails without returning a classifier if any resource is missing.
    pub fn build(self) -> Result<SentimentClassifier<M>> {
        let device = self.device_request.resolve()?;
        tracing::info!(device = ?device.location(), options = ?self.options, "building sentiment classifier");
        let model = M::new(self.options, device)?;
        SentimentClassifier::from_model(model)
    }
}

impl<M: SentimentAnalysisModel> DeviceSelectable for SentimentClassifierBuilder<M> {
    fn device_request_mut(&mut self) -> &mut DeviceRequest {
        &mut self.device_request
    }
}

impl SentimentClassifierBuilder<DistilBertSentimentModel> {
    /// DistilBERT fine-tuned on SST-2, the default checkpoint.
    pub fn distilbert() -> Self {
        Self::new(DistilBertOptions::default())
    }

    pub fn model_id(mut self, id: impl Into<String>) -> Self {
        self.options.model_id = id.into();
        self
    }

    pub fn revision(mut self, rev: impl Into<String>) -> Self {
        self.options.revision = rev.into();
        self
    }

    pub fn tokenizer_file(mut self, p: impl Into<PathBuf>) -> Self {
        self.options.tokenizer_file = Some(p.into());
        self
    }

    pub fn vocab_file(mut self, p: impl Into<PathBuf>) -> Self {
        self.options.vocab_file = Some(p.into());
        self
    }

    pub fn config_file(mut self, p: impl Into<PathBuf>) -> Self {
        self.options.config_file = Some(p.into());
        self
    }

    pub fn weight_files(mut self, p: impl Into<PathBuf>) -> Self {
        self.options.weight_files = Some(p.into());
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.options.max_length = Some(max_length);
        self
    }
}
