pub mod error;
pub mod label;
pub mod result;

pub use error::{Result, SentimentError};
pub use label::{Label, LabelMapping};
pub use result::ClassificationResult;
