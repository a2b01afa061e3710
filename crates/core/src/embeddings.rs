use crate::error::{IngestError, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::PathBuf;
use tracing::info;

pub trait Embedder {
    fn dimensions(&self) -> usize;
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Pre-trained sentence models available to [`SentenceEmbedder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentenceModel {
    #[default]
    AllMiniLmL6V2,
    ParaphraseMultilingualMiniLmL12V2,
}

impl SentenceModel {
    fn fastembed_model(self) -> EmbeddingModel {
        match self {
            Self::AllMiniLmL6V2 => EmbeddingModel::AllMiniLML6V2,
            Self::ParaphraseMultilingualMiniLmL12V2 => EmbeddingModel::ParaphraseMLMiniLML12V2,
        }
    }

    pub fn dimensions(self) -> usize {
        match self {
            Self::AllMiniLmL6V2 | Self::ParaphraseMultilingualMiniLmL12V2 => 384,
        }
    }
}

/// Sentence embeddings from a pre-trained model, loaded once and reused.
///
/// Inputs longer than the model's token window are truncated by the model.
pub struct SentenceEmbedder {
    model: TextEmbedding,
    kind: SentenceModel,
}

impl SentenceEmbedder {
    pub fn try_new(kind: SentenceModel, cache_dir: Option<PathBuf>) -> Result<Self> {
        let mut options = InitOptions::new(kind.fastembed_model()).with_show_download_progress(true);
        if let Some(cache_dir) = cache_dir {
            options = options.with_cache_dir(cache_dir);
        }

        let model =
            TextEmbedding::try_new(options).map_err(|error| IngestError::Embedding(error.to_string()))?;
        info!(model = ?kind, dimensions = kind.dimensions(), "sentence model loaded");

        Ok(Self { model, kind })
    }
}

impl Embedder for SentenceEmbedder {
    fn dimensions(&self) -> usize {
        self.kind.dimensions()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self
            .model
            .embed(vec![text], None)
            .map_err(|error| IngestError::Embedding(error.to_string()))?;

        embeddings
            .pop()
            .ok_or_else(|| IngestError::Embedding("model returned no embedding".to_string()))
    }
}
