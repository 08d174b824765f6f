//! Helpers for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cv_match::domain::model::ModelName;
use cv_match::errors::{ScoreError, ScoreResult};
use cv_match::processing::embedding::{Embedder, Embedding, ModelLoader};
use cv_match::processing::provider::ModelProvider;
use cv_match::processing::scorer::Scorer;
use tempfile::TempDir;

const DIMENSIONS: usize = 256;

fn bucket(token: &str) -> usize {
    // FNV-1a
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in token.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    (hash % DIMENSIONS as u64) as usize
}

/// Deterministic bag-of-words embedder: shared words mean similar vectors.
pub struct BagOfWordsEmbedder {
    embed_calls: Arc<AtomicUsize>,
}

impl Embedder for BagOfWordsEmbedder {
    fn embed(&self, texts: &[&str]) -> ScoreResult<Vec<Embedding>> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|text| {
                let mut vector = vec![0.0_f32; DIMENSIONS];
                text.split(|c: char| !c.is_alphanumeric())
                    .filter(|token| !token.is_empty())
                    .for_each(|token| vector[bucket(&token.to_lowercase())] += 1.0);
                vector
            })
            .collect())
    }
}

/// Loader with call-count instrumentation.
#[derive(Clone, Default)]
pub struct FakeLoader {
    pub loads: Arc<AtomicUsize>,
    pub embed_calls: Arc<AtomicUsize>,
    pub fail: bool,
}

impl FakeLoader {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }
}

impl ModelLoader for FakeLoader {
    fn load(&self, model: ModelName) -> ScoreResult<Box<dyn Embedder>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ScoreError::ModelLoad {
                model: model.to_string(),
                reason: "model files unavailable".to_string(),
            });
        }
        Ok(Box::new(BagOfWordsEmbedder {
            embed_calls: Arc::clone(&self.embed_calls),
        }))
    }
}

/// A scorer over the bag-of-words embedder plus its loader for inspection.
pub fn fake_scorer() -> (Scorer, FakeLoader) {
    let loader = FakeLoader::default();
    let scorer = Scorer::new(Arc::new(ModelProvider::new(loader.clone())));
    (scorer, loader)
}

/// Temporary directory of documents used in integration tests.
pub struct TestCorpus {
    dir: TempDir,
}

impl TestCorpus {
    pub fn new() -> Self {
        TestCorpus {
            dir: TempDir::new().expect("Failed to create temp dir."),
        }
    }

    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create corpus subdir.");
        }
        std::fs::write(&path, contents).expect("Failed to write corpus file.");
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
