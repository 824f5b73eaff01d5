//! File resolution for pretrained checkpoints.
//!
//! Every file a model needs is either fetched from the Hugging Face Hub (and
//! cached locally by `hf-hub`) or read from a path supplied by the caller:
//!
//! - [`HfLoader`] - downloads one file from a Hub repository at a revision
//! - [`FileSource`] - a Hub file or a local override
//! - [`TokenizerLoader`] - loads a `tokenizer.json`, or builds a WordPiece
//!   tokenizer from `vocab.txt` for checkpoints that ship no `tokenizer.json`
//! - [`WeightsLoader`] - locates `model.safetensors`, falling back to
//!   `pytorch_model.bin`
//!
//! Any failure here surfaces as [`SentimentError::ResourceUnavailable`].

use crate::core::{Result, SentimentError};
use hf_hub::api::sync::Api as HfApi;
use hf_hub::{Repo, RepoType};
use std::path::{Path, PathBuf};
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::normalizers::BertNormalizer;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::processors::bert::BertProcessing;
use tokenizers::Tokenizer;

const MAX_LOCK_RETRIES: u32 = 3;

#[derive(Debug, Clone)]
pub struct HfLoader {
    pub repo: String,
    pub revision: String,
    pub filename: String,
}

impl HfLoader {
    pub fn new(repo: &str, revision: &str, filename: &str) -> Self {
        Self {
            repo: repo.into(),
            revision: revision.into(),
            filename: filename.into(),
        }
    }

    pub fn load(&self) -> Result<PathBuf> {
        let hf_api = HfApi::new()?;
        let hf_repo = hf_api.repo(Repo::with_revision(
            self.repo.clone(),
            RepoType::Model,
            self.revision.clone(),
        ));

        // Concurrent downloads of the same file contend on the cache lock
        let mut attempt = 0;
        loop {
            match hf_repo.get(self.filename.as_str()) {
                Ok(path) => return Ok(path),
                Err(e) => {
                    let error_msg = e.to_string();
                    if error_msg.contains("Lock acquisition failed") && attempt + 1 < MAX_LOCK_RETRIES
                    {
                        let wait_time = std::time::Duration::from_millis(100 * (1 << attempt));
                        tracing::debug!(
                            repo = %self.repo,
                            file = %self.filename,
                            "hub cache locked, retrying in {:?}",
                            wait_time
                        );
                        std::thread::sleep(wait_time);
                        attempt += 1;
                        continue;
                    }
                    return Err(SentimentError::resource(format!(
                        "failed to fetch `{}` from `{}@{}`: {error_msg}",
                        self.filename, self.repo, self.revision
                    )));
                }
            }
        }
    }
}

/// Where a single checkpoint file comes from.
#[derive(Debug, Clone)]
pub enum FileSource {
    Hub(HfLoader),
    Local(PathBuf),
}

impl FileSource {
    /// Local override when given, otherwise the Hub file.
    pub fn new(repo: &str, revision: &str, filename: &str, local: Option<&Path>) -> Self {
        match local {
            Some(path) => FileSource::Local(path.to_path_buf()),
            None => FileSource::Hub(HfLoader::new(repo, revision, filename)),
        }
    }

    pub fn resolve(&self) -> Result<PathBuf> {
        match self {
            FileSource::Hub(loader) => loader.load(),
            FileSource::Local(path) => {
                if path.is_file() {
                    Ok(path.clone())
                } else {
                    Err(SentimentError::resource(format!(
                        "local file {} does not exist",
                        path.display()
                    )))
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenizerLoader {
    pub tokenizer_file: Option<FileSource>,
    pub vocab_file: Option<FileSource>,
}

impl TokenizerLoader {
    /// Loads a serialized `tokenizer.json`.
    pub fn new(tokenizer_file: FileSource) -> Self {
        Self {
            tokenizer_file: Some(tokenizer_file),
            vocab_file: None,
        }
    }

    /// Builds a BERT-style WordPiece tokenizer from a `vocab.txt`.
    pub fn wordpiece(vocab_file: FileSource) -> Self {
        Self {
            tokenizer_file: None,
            vocab_file: Some(vocab_file),
        }
    }

    /// Falls back to `vocab_file` when the `tokenizer.json` cannot be found.
    pub fn with_vocab_fallback(mut self, vocab_file: FileSource) -> Self {
        self.vocab_file = Some(vocab_file);
        self
    }

    pub fn load(&self) -> Result<Tokenizer> {
        let missing = match &self.tokenizer_file {
            Some(source) => match source.resolve() {
                Ok(tokenizer_file_path) => {
                    return Tokenizer::from_file(&tokenizer_file_path).map_err(|e| {
                        SentimentError::resource(format!(
                            "failed to load tokenizer {}: {e}",
                            tokenizer_file_path.display()
                        ))
                    })
                }
                Err(e) => e,
            },
            None => SentimentError::resource("no tokenizer source configured"),
        };

        match &self.vocab_file {
            Some(vocab_file) => {
                tracing::debug!("{missing}; building tokenizer from vocab.txt");
                wordpiece_tokenizer(&vocab_file.resolve()?)
            }
            None => Err(missing),
        }
    }
}

/// WordPiece with BERT normalization (lowercasing) and `[CLS] ... [SEP]`
/// wrapping, the ids of both taken from the vocabulary.
pub fn wordpiece_tokenizer(vocab_path: &Path) -> Result<Tokenizer> {
    let wordpiece = WordPiece::from_file(&vocab_path.to_string_lossy())
        .unk_token("[UNK]".to_string())
        .build()
        .map_err(|e| {
            SentimentError::resource(format!(
                "failed to build WordPiece model from {}: {e}",
                vocab_path.display()
            ))
        })?;

    let mut tokenizer = Tokenizer::new(wordpiece);
    let special_id = |token: &str| {
        tokenizer.token_to_id(token).ok_or_else(|| {
            SentimentError::resource(format!(
                "vocabulary {} has no `{token}` token",
                vocab_path.display()
            ))
        })
    };
    let sep = ("[SEP]".to_string(), special_id("[SEP]")?);
    let cls = ("[CLS]".to_string(), special_id("[CLS]")?);

    tokenizer.with_normalizer(Some(BertNormalizer::default()));
    tokenizer.with_pre_tokenizer(Some(BertPreTokenizer));
    tokenizer.with_post_processor(Some(BertProcessing::new(sep, cls)));
    Ok(tokenizer)
}

#[derive(Debug, Clone)]
pub enum WeightsLoader {
    Hub { repo: String, revision: String },
    Local(PathBuf),
}

impl WeightsLoader {
    pub fn new(repo: &str, revision: &str, local: Option<&Path>) -> Self {
        match local {
            Some(path) => WeightsLoader::Local(path.to_path_buf()),
            None => WeightsLoader::Hub {
                repo: repo.into(),
                revision: revision.into(),
            },
        }
    }

    pub fn load(&self) -> Result<PathBuf> {
        match self {
            WeightsLoader::Local(path) => FileSource::Local(path.clone()).resolve(),
            WeightsLoader::Hub { repo, revision } => {
                match HfLoader::new(repo, revision, "model.safetensors").load() {
                    Ok(path) => Ok(path),
                    Err(safetensors_err) => {
                        tracing::debug!("{safetensors_err}; trying pytorch_model.bin");
                        HfLoader::new(repo, revision, "pytorch_model.bin")
                            .load()
                            .map_err(|e| {
                                SentimentError::resource(format!(
                                    "model weights not found in `{repo}`, expected `model.safetensors` or `pytorch_model.bin`: {e}"
                                ))
                            })
                    }
                }
            }
        }
    }
}
