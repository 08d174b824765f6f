pub mod cli;
pub mod domain;
pub mod errors;
pub mod models;
pub mod processing;
pub mod repository;

pub use domain::model::ModelName;
pub use errors::{ScoreError, ScoreResult};
pub use processing::embedding::{Embedder, Embedding, FastEmbedLoader, ModelLoader};
pub use processing::provider::{ModelHandle, ModelProvider};
pub use processing::scorer::Scorer;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

/// Scores at or above this value are labelled as a match.
pub const DEFAULT_THRESHOLD: f32 = 0.5;
