use super::error::{Result, SentimentError};
use super::label::{Label, LabelMapping};

/// Label and confidence for one input text.
///
/// `confidence` is the softmax probability of the winning class; the full
/// two-way distribution is kept in `probabilities` (indexed like the
/// [`LabelMapping`] it was decoded with) and sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassificationResult {
    label: Label,
    confidence: f32,
    probabilities: [f32; 2],
}

impl ClassificationResult {
    /// Decodes one row of class probabilities.
    ///
    /// The winning index is the first maximum, so an exact tie resolves to
    /// class 0.
    pub fn from_probabilities(probabilities: &[f32], mapping: &LabelMapping) -> Result<Self> {
        let row: [f32; 2] = probabilities.try_into().map_err(|_| {
            SentimentError::inference(format!(
                "expected {} class scores per row, got {}",
                mapping.len(),
                probabilities.len()
            ))
        })?;
        if !row.iter().all(|p| p.is_finite()) {
            return Err(SentimentError::inference(format!(
                "model produced non-finite class scores {row:?}"
            )));
        }

        let index = if row[1] > row[0] { 1 } else { 0 };
        let label = mapping
            .label(index)
            .ok_or_else(|| SentimentError::inference(format!("class index {index} has no label")))?;

        Ok(Self {
            label,
            confidence: row[index],
            probabilities: row,
        })
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn probabilities(&self) -> [f32; 2] {
        self.probabilities
    }
}

impl std::fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sentiment: {}, with confidence {:.4}",
            self.label, self.confidence
        )
    }
}
