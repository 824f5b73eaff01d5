pub mod distilbert;

pub use distilbert::{DistilBertOptions, DistilBertSentimentModel, DEFAULT_MODEL_ID};
