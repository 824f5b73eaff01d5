use candle_core::{DType, Device, Tensor};
use sentiment_classification::pipelines::sentiment_analysis_pipeline::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub const LOVE: &str = "I love this!";
pub const TERRIBLE: &str = "This is terrible.";
pub const OKAY: &str = "It's okay, I guess.";

/// Raw scores per known text; any other text is rejected at tokenization.
#[derive(Debug, Clone)]
pub struct FixedScores {
    pub scores: Vec<(String, [f32; 2])>,
    pub id2label: Option<HashMap<String, String>>,
    pub forward_passes: Arc<AtomicUsize>,
    pub crash_pending: Arc<AtomicBool>,
}

impl FixedScores {
    pub fn sentiment() -> Self {
        Self {
            scores: vec![
                (LOVE.to_string(), [-4.2, 4.6]),
                (TERRIBLE.to_string(), [4.4, -3.9]),
                (OKAY.to_string(), [0.3, 0.1]),
                (String::new(), [0.2, -0.1]),
            ],
            id2label: Some(id2label(&[("0", "NEGATIVE"), ("1", "POSITIVE")])),
            forward_passes: Arc::new(AtomicUsize::new(0)),
            crash_pending: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_id2label(mut self, entries: &[(&str, &str)]) -> Self {
        self.id2label = Some(id2label(entries));
        self
    }

    pub fn without_id2label(mut self) -> Self {
        self.id2label = None;
        self
    }

    /// Makes the next forward pass panic; later passes run normally.
    pub fn crash_next_pass(&self) {
        self.crash_pending.store(true, Ordering::SeqCst);
    }

    pub fn forward_passes(&self) -> usize {
        self.forward_passes.load(Ordering::SeqCst)
    }
}

fn id2label(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub struct FixedScoresModel {
    options: FixedScores,
    device: Device,
}

impl SentimentAnalysisModel for FixedScoresModel {
    type Options = FixedScores;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        Ok(Self { options, device })
    }

    // One token per text: its row in the score table.
    fn tokenize(&self, texts: &[&str]) -> Result<EncodedBatch> {
        let ids = texts
            .iter()
            .map(|text| {
                self.options
                    .scores
                    .iter()
                    .position(|(known, _)| known == text)
                    .map(|row| row as u32)
                    .ok_or_else(|| SentimentError::InvalidInput(format!("unknown text {text:?}")))
            })
            .collect::<Result<Vec<u32>>>()?;

        let batch_size = ids.len();
        let input_ids = Tensor::from_vec(ids, (batch_size, 1), &self.device)?;
        let attention_mask = Tensor::ones((batch_size, 1), DType::U32, &self.device)?;
        EncodedBatch::new(input_ids, attention_mask)
    }

    fn infer(&self, batch: &EncodedBatch) -> Result<Tensor> {
        self.options.forward_passes.fetch_add(1, Ordering::SeqCst);
        if self.options.crash_pending.swap(false, Ordering::SeqCst) {
            panic!("forward pass crashed");
        }
        let rows = batch.input_ids.to_vec2::<u32>()?;
        let scores: Vec<f32> = rows
            .iter()
            .flat_map(|row| self.options.scores[row[0] as usize].1)
            .collect();
        Ok(Tensor::from_vec(scores, (rows.len(), 2), &self.device)?)
    }

    fn id2label(&self) -> Option<&HashMap<String, String>> {
        self.options.id2label.as_ref()
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

pub fn build_classifier(scores: FixedScores) -> Result<SentimentClassifier<FixedScoresModel>> {
    SentimentClassifierBuilder::<FixedScoresModel>::new(scores)
        .cpu()
        .build()
}

/// Splits `Sentiment: <label>, with confidence <x.xxxx>` into its parts,
/// panicking when the line does not follow the template.
pub fn parse_formatted(line: &str) -> (Label, f32) {
    let rest = line
        .strip_prefix("Sentiment: ")
        .unwrap_or_else(|| panic!("missing prefix in {line:?}"));
    let (label, confidence) = rest
        .split_once(", with confidence ")
        .unwrap_or_else(|| panic!("missing confidence in {line:?}"));

    let label = match label {
        "Positive" => Label::Positive,
        "Negative" => Label::Negative,
        other => panic!("unexpected label {other:?}"),
    };
    let decimals = confidence
        .split_once('.')
        .map(|(_, frac)| frac.len())
        .unwrap_or(0);
    assert_eq!(decimals, 4, "confidence {confidence:?} is not 4 decimal places");

    (label, confidence.parse().expect("confidence is a float"))
}
