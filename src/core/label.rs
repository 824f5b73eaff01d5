use super::error::{Result, SentimentError};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Discrete sentiment category produced by the classifier.
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    /// Returns the display name of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Negative => "Negative",
            Label::Positive => "Positive",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed `class index -> label` table.
///
/// The table has to match the class-index convention the checkpoint was
/// trained with. For `distilbert-base-uncased-finetuned-sst-2-english` that is
/// `0 -> Negative, 1 -> Positive`, which is what [`LabelMapping::binary`]
/// returns. Nothing in the score matrix itself can reveal a mismatch, so
/// [`LabelMapping::validate`] checks the table against the `id2label` metadata
/// shipped in the checkpoint's `config.json` whenever it is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMapping {
    labels: [Label; 2],
}

impl LabelMapping {
    /// `0 -> Negative, 1 -> Positive`.
    pub const fn binary() -> Self {
        Self {
            labels: [Label::Negative, Label::Positive],
        }
    }

    /// Label for a class index, `None` when the index is out of range.
    pub fn label(&self, index: usize) -> Option<Label> {
        self.labels.get(index).copied()
    }

    /// Number of classes the table covers.
    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }

    /// Checks the table against a checkpoint's `id2label` map.
    ///
    /// Keys are class indices rendered as strings (`"0"`, `"1"`), matching the
    /// Hugging Face config layout. Label names are compared case-insensitively
    /// since checkpoints commonly use `NEGATIVE` / `POSITIVE`.
    pub fn validate(&self, id2label: &HashMap<String, String>) -> Result<()> {
        let consistent = id2label.len() == self.labels.len()
            && self.labels.iter().enumerate().all(|(index, label)| {
                id2label
                    .get(&index.to_string())
                    .is_some_and(|declared| declared.eq_ignore_ascii_case(label.as_str()))
            });

        if consistent {
            Ok(())
        } else {
            Err(SentimentError::IncompatibleLabels {
                expected: self.to_string(),
                found: describe_id2label(id2label),
            })
        }
    }
}

impl Default for LabelMapping {
    fn default() -> Self {
        Self::binary()
    }
}

impl std::fmt::Display for LabelMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries: Vec<String> = self
            .labels
            .iter()
            .enumerate()
            .map(|(index, label)| format!("{index} -> {label}"))
            .collect();
        write!(f, "{{{}}}", entries.join(", "))
    }
}

fn describe_id2label(id2label: &HashMap<String, String>) -> String {
    let mut entries: Vec<(&String, &String)> = id2label.iter().collect();
    entries.sort_by(|a, b| {
        match (a.0.parse::<usize>(), b.0.parse::<usize>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => a.0.cmp(b.0),
        }
    });
    let entries: Vec<String> = entries
        .into_iter()
        .map(|(index, label)| format!("{index} -> {label}"))
        .collect();
    format!("{{{}}}", entries.join(", "))
}
