//! Batch tokenization shared by sequence-classification models.
//!
//! Single texts and batches go through the same path: a length-1 batch is
//! just the degenerate case, so the padded shape of a lone input is its own
//! length.

use crate::core::{Result, SentimentError};
use candle_core::{Device, Tensor};
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

/// Fixed-shape numeric input for one forward pass.
///
/// Both tensors are `(batch, seq_len)` `u32`, where `seq_len` is the longest
/// item in the batch after truncation. `attention_mask` is 1 for real tokens
/// and 0 for padding.
#[derive(Debug, Clone)]
pub struct EncodedBatch {
    pub input_ids: Tensor,
    pub attention_mask: Tensor,
}

impl EncodedBatch {
    pub fn new(input_ids: Tensor, attention_mask: Tensor) -> Result<Self> {
        if input_ids.dims() != attention_mask.dims() || input_ids.rank() != 2 {
            return Err(SentimentError::InvalidInput(format!(
                "input ids {:?} and attention mask {:?} must share a (batch, seq_len) shape",
                input_ids.dims(),
                attention_mask.dims()
            )));
        }
        Ok(Self {
            input_ids,
            attention_mask,
        })
    }

    /// Number of texts in the batch.
    pub fn len(&self) -> usize {
        self.input_ids.dims().first().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Padded sequence length shared by every row.
    pub fn seq_len(&self) -> usize {
        self.input_ids.dims().get(1).copied().unwrap_or(0)
    }
}

/// Enables batch-longest padding and right-side truncation at `max_length`.
pub fn configure_tokenizer(tokenizer: &mut Tokenizer, max_length: usize) -> Result<()> {
    let pad_id = tokenizer
        .get_padding()
        .map(|p| p.pad_id)
        .or_else(|| tokenizer.token_to_id("[PAD]"))
        .unwrap_or(0);
    let pad_token = tokenizer
        .id_to_token(pad_id)
        .unwrap_or_else(|| "[PAD]".to_string());

    tokenizer.with_padding(Some(PaddingParams {
        strategy: PaddingStrategy::BatchLongest,
        pad_id,
        pad_token,
        ..Default::default()
    }));
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            ..Default::default()
        }))
        .map_err(|e| SentimentError::resource(format!("invalid truncation settings: {e}")))?;

    Ok(())
}

/// Tokenizes every text in one call so all rows share one padded shape.
pub fn encode_batch(tokenizer: &Tokenizer, texts: &[&str], device: &Device) -> Result<EncodedBatch> {
    let encodings = tokenizer
        .encode_batch(texts.to_vec(), true)
        .map_err(|e| SentimentError::InvalidInput(format!("tokenization failed: {e}")))?;

    let batch_size = encodings.len();
    let seq_len = encodings.iter().map(|e| e.len()).max().unwrap_or(0);

    let mut ids: Vec<u32> = Vec::with_capacity(batch_size * seq_len);
    let mut mask: Vec<u32> = Vec::with_capacity(batch_size * seq_len);
    for encoding in &encodings {
        // BatchLongest padding already equalises lengths; this only guards
        // tokenizers loaded without padding support.
        let missing = seq_len - encoding.len();
        ids.extend_from_slice(encoding.get_ids());
        ids.extend(std::iter::repeat(0).take(missing));
        mask.extend_from_slice(encoding.get_attention_mask());
        mask.extend(std::iter::repeat(0).take(missing));
    }

    let input_ids = Tensor::from_vec(ids, (batch_size, seq_len), device)?;
    let attention_mask = Tensor::from_vec(mask, (batch_size, seq_len), device)?;
    EncodedBatch::new(input_ids, attention_mask)
}
