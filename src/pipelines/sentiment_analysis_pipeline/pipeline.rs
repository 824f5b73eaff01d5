use super::model::SentimentAnalysisModel;
use crate::core::{ClassificationResult, LabelMapping, Result, SentimentError};
use candle_core::{DType, Device, Tensor, D};
use std::sync::{Mutex, PoisonError};

/// Turns texts into [`ClassificationResult`]s with one forward pass per call.
///
/// Inference is serialized: the model sits behind a mutex, so a classifier
/// can be shared across threads (e.g. through `Arc`) and concurrent calls
/// simply queue. For parallel throughput build one classifier per worker.
///
/// The device is fixed when the classifier is built and cannot change
/// afterwards.
pub struct SentimentClassifier<M: SentimentAnalysisModel> {
    model: Mutex<M>,
    device: Device,
    labels: LabelMapping,
}

impl<M: SentimentAnalysisModel> SentimentClassifier<M> {
    /// Wraps a loaded model, checking its label metadata against the pinned
    /// `0 -> Negative, 1 -> Positive` table.
    pub fn from_model(model: M) -> Result<Self> {
        let labels = LabelMapping::binary();
        match model.id2label() {
            Some(id2label) => labels.validate(id2label)?,
            None => tracing::warn!(
                "checkpoint ships no id2label metadata; assuming {labels}"
            ),
        }

        Ok(Self {
            device: model.device().clone(),
            model: Mutex::new(model),
            labels,
        })
    }

    /// Classifies a single text as a batch of one.
    pub fn classify_one(&self, text: &str) -> Result<ClassificationResult> {
        self.classify_many(&[text])?
            .pop()
            .ok_or_else(|| SentimentError::inference("model returned no scores"))
    }

    /// Classifies every text with a single forward pass.
    ///
    /// Results come back in input order. An empty input never reaches the
    /// model.
    pub fn classify_many<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<ClassificationResult>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let inputs: Vec<&str> = texts.iter().map(AsRef::as_ref).collect();

        let logits = {
            // The model is only used through `&self`; a panicked call leaves nothing half-updated.
            let model = self.model.lock().unwrap_or_else(|poisoned| {
                tracing::warn!("a previous classification call panicked; recovering inference lock");
                self.model.clear_poison();
                PoisonError::into_inner(poisoned)
            });
            let batch = model.tokenize(&inputs)?;
            tracing::debug!(batch_size = batch.len(), seq_len = batch.seq_len(), "running forward pass");
            model.infer(&batch)?
        };

        let results = decode_scores(&logits, &self.labels)?;
        if results.len() != inputs.len() {
            return Err(SentimentError::inference(format!(
                "model returned {} score rows for {} inputs",
                results.len(),
                inputs.len()
            )));
        }
        Ok(results)
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn labels(&self) -> &LabelMapping {
        &self.labels
    }

    /// Releases the model, tokenizer, and device context.
    pub fn shutdown(self) {
        tracing::info!(device = ?self.device.location(), "releasing sentiment classifier");
        drop(self.model);
    }
}

/// Softmax over each row of a `(batch, num_labels)` score matrix, then
/// argmax through `labels`.
pub fn decode_scores(logits: &Tensor, labels: &LabelMapping) -> Result<Vec<ClassificationResult>> {
    let (_, num_labels) = logits.dims2()?;
    if num_labels != labels.len() {
        return Err(SentimentError::inference(format!(
            "expected {} class scores per row, got {num_labels}",
            labels.len()
        )));
    }

    let probabilities = candle_nn::ops::softmax(&logits.to_dtype(DType::F32)?, D::Minus1)?;
    probabilities
        .to_vec2::<f32>()?
        .iter()
        .map(|row| ClassificationResult::from_probabilities(row, labels))
        .collect()
}
