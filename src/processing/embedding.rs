use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::domain::model::ModelName;
use crate::errors::{ScoreError, ScoreResult};
use crate::models::config::AppConfig;

/// A fixed-length vector produced by an embedding model.
pub type Embedding = Vec<f32>;

/// Anything that turns texts into embeddings.
///
/// Implementations return exactly one vector per input text, in input order.
pub trait Embedder: Send + Sync {
    fn embed(&self, texts: &[&str]) -> ScoreResult<Vec<Embedding>>;
}

/// Creates an [`Embedder`] for a named model.
///
/// Loading is expected to be expensive (weights download, session set-up), so
/// callers go through [`crate::processing::provider::ModelProvider`], which
/// loads at most once.
pub trait ModelLoader: Send + Sync {
    fn load(&self, model: ModelName) -> ScoreResult<Box<dyn Embedder>>;
}

fn fastembed_model(model: ModelName) -> EmbeddingModel {
    match model {
        ModelName::AllMiniLmL6V2 => EmbeddingModel::AllMiniLML6V2,
        ModelName::AllMiniLmL12V2 => EmbeddingModel::AllMiniLML12V2,
        ModelName::BgeSmallEnV15 => EmbeddingModel::BGESmallENV15,
        ModelName::BgeBaseEnV15 => EmbeddingModel::BGEBaseENV15,
        ModelName::ParaphraseMultilingualMiniLmL12V2 => EmbeddingModel::ParaphraseMLMiniLML12V2,
        ModelName::MultilingualE5Small => EmbeddingModel::MultilingualE5Small,
        ModelName::MultilingualE5Large => EmbeddingModel::MultilingualE5Large,
    }
}

/// Loads ONNX sentence embedding models through `fastembed`.
#[derive(Clone, Debug, Default)]
pub struct FastEmbedLoader {
    cache_dir: Option<PathBuf>,
    show_download_progress: bool,
}

impl FastEmbedLoader {
    pub fn new(cache_dir: Option<PathBuf>, show_download_progress: bool) -> Self {
        Self {
            cache_dir,
            show_download_progress,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.cache_dir.clone(), config.show_download_progress)
    }
}

impl ModelLoader for FastEmbedLoader {
    fn load(&self, model: ModelName) -> ScoreResult<Box<dyn Embedder>> {
        let mut options = InitOptions::new(fastembed_model(model))
            .with_show_download_progress(self.show_download_progress);
        if let Some(cache_dir) = &self.cache_dir {
            options = options.with_cache_dir(cache_dir.clone());
        }

        let embedding = TextEmbedding::try_new(options).map_err(|error| ScoreError::ModelLoad {
            model: model.to_string(),
            reason: format!("{error:?}"),
        })?;

        Ok(Box::new(FastEmbedder {
            model: Mutex::new(embedding),
        }))
    }
}

/// A loaded `fastembed` session.
///
/// `TextEmbedding::embed` takes `&mut self`, so concurrent callers are
/// serialized on the mutex.
pub struct FastEmbedder {
    model: Mutex<TextEmbedding>,
}

impl Embedder for FastEmbedder {
    fn embed(&self, texts: &[&str]) -> ScoreResult<Vec<Embedding>> {
        let mut model = self.model.lock().unwrap_or_else(PoisonError::into_inner);
        model
            .embed(texts.to_vec(), None)
            .map_err(|error| ScoreError::Encoding(format!("{error:?}")))
    }
}
