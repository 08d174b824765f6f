//! Lazily loaded, process-wide embedding model.
//!
//! A [`ModelProvider`] is built once at start-up and shared by reference (or
//! `Arc`) with every scorer. The first [`ModelProvider::get_model`] call loads
//! the model under a lock, so concurrent first calls still load it only once.
//! The slot holds a single model for the provider's lifetime.

use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::model::ModelName;
use crate::errors::{ScoreError, ScoreResult};
use crate::processing::embedding::{Embedder, Embedding, ModelLoader};

/// A loaded embedding model, cheap to share.
pub struct ModelHandle {
    name: ModelName,
    embedder: Box<dyn Embedder>,
}

impl ModelHandle {
    pub fn name(&self) -> ModelName {
        self.name
    }

    pub fn embed(&self, texts: &[&str]) -> ScoreResult<Vec<Embedding>> {
        self.embedder.embed(texts)
    }
}

pub struct ModelProvider {
    loader: Box<dyn ModelLoader>,
    default_model: ModelName,
    slot: Mutex<Option<Arc<ModelHandle>>>,
}

impl ModelProvider {
    pub fn new<L>(loader: L) -> Self
    where
        L: ModelLoader + 'static,
    {
        Self {
            loader: Box::new(loader),
            default_model: ModelName::default(),
            slot: Mutex::new(None),
        }
    }

    /// Model used by the scorer's `*_default` entry points.
    pub fn with_default_model(mut self, model: ModelName) -> Self {
        self.default_model = model;
        self
    }

    pub fn default_model(&self) -> ModelName {
        self.default_model
    }

    /// Name of the model currently held, without triggering a load.
    pub fn loaded_model(&self) -> Option<ModelName> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|handle| handle.name())
    }

    /// Return the loaded model, loading `name` on the first call.
    ///
    /// Once a model is loaded, asking for a different one fails with
    /// [`ScoreError::ModelMismatch`] rather than handing back the loaded model
    /// under the wrong name; the provider never reloads. A failed load leaves
    /// the slot empty and is not retried here.
    pub fn get_model(&self, name: &str) -> ScoreResult<Arc<ModelHandle>> {
        let requested: ModelName = name.parse()?;

        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(handle) = slot.as_ref() {
            if handle.name() != requested {
                log::warn!(
                    "Embedding model {} requested but {} is already loaded",
                    requested,
                    handle.name()
                );
                return Err(ScoreError::ModelMismatch {
                    loaded: handle.name().to_string(),
                    requested: requested.to_string(),
                });
            }
            return Ok(Arc::clone(handle));
        }

        log::info!("Loading embedding model {requested}");
        let embedder = self.loader.load(requested).inspect_err(|error| {
            log::error!("Failed to load embedding model {requested}: {error}");
        })?;
        log::info!("Embedding model {requested} loaded");

        let handle = Arc::new(ModelHandle {
            name: requested,
            embedder,
        });
        *slot = Some(Arc::clone(&handle));

        Ok(handle)
    }
}
