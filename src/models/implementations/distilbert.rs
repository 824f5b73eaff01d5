//! DistilBERT sequence classification.
//!
//! The encoder comes from `candle-transformers`; the classification head
//! mirrors Hugging Face's `DistilBertForSequenceClassification`:
//! `[CLS] hidden state -> pre_classifier -> ReLU -> classifier`.
//!
//! The default checkpoint, `distilbert-base-uncased-finetuned-sst-2-english`,
//! orders its classes `0 -> NEGATIVE, 1 -> POSITIVE`.

use crate::core::{Result, SentimentError};
use crate::loaders::{FileSource, TokenizerLoader, WeightsLoader};
use crate::models::encoding::{configure_tokenizer, encode_batch, EncodedBatch};
use crate::pipelines::sentiment_analysis_pipeline::model::SentimentAnalysisModel;
use candle_core::{DType, Device, IndexOp, Module, Tensor};
use candle_nn::{linear, Linear, VarBuilder};
use candle_transformers::models::distilbert::{Config, DistilBertModel};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tokenizers::Tokenizer;

pub const DEFAULT_MODEL_ID: &str = "distilbert-base-uncased-finetuned-sst-2-english";

/// Where to load a DistilBERT sentiment checkpoint from.
///
/// Local file overrides take precedence over the Hub repository.
#[derive(Debug, Clone)]
pub struct DistilBertOptions {
    pub model_id: String,
    pub revision: String,
    pub tokenizer_file: Option<PathBuf>,
    /// WordPiece vocabulary, used when no `tokenizer_file` is given.
    pub vocab_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub weight_files: Option<PathBuf>,
    /// Truncation length; defaults to the checkpoint's
    /// `max_position_embeddings`.
    pub max_length: Option<usize>,
}

impl Default for DistilBertOptions {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            revision: "main".to_string(),
            tokenizer_file: None,
            vocab_file: None,
            config_file: None,
            weight_files: None,
            max_length: None,
        }
    }
}

// Fields candle's `Config` keeps private, plus the label metadata.
#[derive(Deserialize)]
struct ClassificationHeadConfig {
    dim: usize,
    max_position_embeddings: usize,
    #[serde(default)]
    id2label: Option<HashMap<String, String>>,
}

pub struct DistilBertSentimentModel {
    encoder: DistilBertModel,
    pre_classifier: Linear,
    classifier: Linear,
    tokenizer: Tokenizer,
    id2label: Option<HashMap<String, String>>,
    device: Device,
    span: tracing::Span,
}

impl DistilBertSentimentModel {
    pub fn load(options: DistilBertOptions, device: Device) -> Result<Self> {
        let repo = options.model_id.as_str();
        let revision = options.revision.as_str();
        tracing::info!(model = repo, revision, device = ?device.location(), "loading DistilBERT checkpoint");

        let config_path =
            FileSource::new(repo, revision, "config.json", options.config_file.as_deref())
                .resolve()?;
        let config_content = std::fs::read_to_string(&config_path).map_err(|e| {
            SentimentError::resource(format!(
                "failed to read config file {}: {e}",
                config_path.display()
            ))
        })?;
        let config: Config = serde_json::from_str(&config_content).map_err(|e| {
            SentimentError::resource(format!("failed to parse DistilBERT config: {e}"))
        })?;
        let head: ClassificationHeadConfig = serde_json::from_str(&config_content)
            .map_err(|e| SentimentError::resource(format!("failed to parse classifier config: {e}")))?;

        // Older checkpoints, the default SST-2 one among them, ship only `vocab.txt`.
        let tokenizer_loader = match (&options.tokenizer_file, &options.vocab_file) {
            (Some(path), _) => TokenizerLoader::new(FileSource::Local(path.clone())),
            (None, Some(path)) => TokenizerLoader::wordpiece(FileSource::Local(path.clone())),
            (None, None) => {
                TokenizerLoader::new(FileSource::new(repo, revision, "tokenizer.json", None))
                    .with_vocab_fallback(FileSource::new(repo, revision, "vocab.txt", None))
            }
        };
        let mut tokenizer = tokenizer_loader.load()?;
        let max_length = options
            .max_length
            .unwrap_or(head.max_position_embeddings)
            .min(head.max_position_embeddings);
        configure_tokenizer(&mut tokenizer, max_length)?;

        let weights_path = WeightsLoader::new(repo, revision, options.weight_files.as_deref()).load()?;
        let vb = load_var_builder(weights_path, &device)?;

        let model = Self::from_var_builder(vb, &config, head, tokenizer, device)?;
        tracing::info!(model = repo, max_length, "DistilBERT checkpoint ready");
        Ok(model)
    }

    fn from_var_builder(
        vb: VarBuilder,
        config: &Config,
        head: ClassificationHeadConfig,
        tokenizer: Tokenizer,
        device: Device,
    ) -> Result<Self> {
        let num_labels = head.id2label.as_ref().map_or(2, HashMap::len);
        let encoder = DistilBertModel::load(vb.pp("distilbert"), config)
            .map_err(|e| SentimentError::resource(format!("failed to load DistilBERT encoder: {e}")))?;
        let pre_classifier = linear(head.dim, head.dim, vb.pp("pre_classifier"))
            .map_err(|e| SentimentError::resource(format!("failed to load pre_classifier: {e}")))?;
        let classifier = linear(head.dim, num_labels, vb.pp("classifier"))
            .map_err(|e| SentimentError::resource(format!("failed to load classifier head: {e}")))?;
        tracing::debug!(num_labels, "classification head loaded");

        Ok(Self {
            encoder,
            pre_classifier,
            classifier,
            tokenizer,
            id2label: head.id2label,
            device,
            span: tracing::span!(tracing::Level::TRACE, "distilbert-classify"),
        })
    }
}

fn load_var_builder(weights_path: PathBuf, device: &Device) -> Result<VarBuilder<'static>> {
    // Plain tensors, not `Var`s: nothing downstream records gradients.
    let dtype = DType::F32;
    let vb = if weights_path
        .extension()
        .is_some_and(|ext| ext == "safetensors")
    {
        unsafe { VarBuilder::from_mmaped_safetensors(&[&weights_path], dtype, device) }
    } else if weights_path.extension().is_some_and(|ext| ext == "bin") {
        VarBuilder::from_pth(&weights_path, dtype, device)
    } else {
        return Err(SentimentError::resource(format!(
            "unsupported weight file format: {}",
            weights_path.display()
        )));
    };
    vb.map_err(|e| {
        SentimentError::resource(format!(
            "failed to load weights {}: {e}",
            weights_path.display()
        ))
    })
}

impl SentimentAnalysisModel for DistilBertSentimentModel {
    type Options = DistilBertOptions;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        DistilBertSentimentModel::load(options, device)
    }

    fn tokenize(&self, texts: &[&str]) -> Result<EncodedBatch> {
        encode_batch(&self.tokenizer, texts, &self.device)
    }

    fn infer(&self, batch: &EncodedBatch) -> Result<Tensor> {
        let _enter = self.span.enter();
        let (batch_size, seq_len) = batch.input_ids.dims2()?;

        // candle's DistilBERT masks positions where the mask is non-zero,
        // the inverse of the tokenizer's attention mask.
        let padding_mask = batch
            .attention_mask
            .eq(0u32)?
            .reshape((batch_size, 1, 1, seq_len))?;

        let hidden_states = self.encoder.forward(&batch.input_ids, &padding_mask)?;
        let cls = hidden_states.i((.., 0))?;
        let pooled = self.pre_classifier.forward(&cls)?.relu()?;
        let logits = self.classifier.forward(&pooled)?;

        Ok(logits.detach())
    }

    fn id2label(&self) -> Option<&HashMap<String, String>> {
        self.id2label.as_ref()
    }

    fn device(&self) -> &Device {
        &self.device
    }
}
