use super::model::SentimentAnalysisModel;
use super::pipeline::SentimentClassifier;
use crate::core::Result;

/// Formats classifier output for display.
///
/// Every result renders as `Sentiment: <label>, with confidence <x.xxxx>`.
/// Errors from the classifier are passed through untouched.
pub struct SentimentAnalyzer<M: SentimentAnalysisModel> {
    classifier: SentimentClassifier<M>,
}

impl<M: SentimentAnalysisModel> SentimentAnalyzer<M> {
    pub fn new(classifier: SentimentClassifier<M>) -> Self {
        Self { classifier }
    }

    pub fn analyze_text(&self, text: &str) -> Result<String> {
        Ok(self.classifier.classify_one(text)?.to_string())
    }

    /// One forward pass for the whole batch; output order matches input order.
    pub fn analyze_batch<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<String>> {
        Ok(self
            .classifier
            .classify_many(texts)?
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    pub fn classifier(&self) -> &SentimentClassifier<M> {
        &self.classifier
    }

    pub fn into_classifier(self) -> SentimentClassifier<M> {
        self.classifier
    }
}
