pub mod encoding;
pub mod implementations;

pub use encoding::{configure_tokenizer, encode_batch, EncodedBatch};
pub use implementations::{DistilBertOptions, DistilBertSentimentModel};
