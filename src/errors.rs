//! Error type shared by the scoring library and the command-line front end.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("unknown embedding model: {0}")]
    UnknownModel(String),

    /// The backing model could not be located or initialized.
    #[error("failed to load embedding model {model}: {reason}")]
    ModelLoad { model: String, reason: String },

    /// A provider only ever holds one model; asking for another one is
    /// reported instead of silently reusing the loaded model.
    #[error("embedding model {loaded} is already loaded, cannot switch to {requested}")]
    ModelMismatch { loaded: String, requested: String },

    #[error("failed to encode texts: {0}")]
    Encoding(String),

    #[error("embedding dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("got {scores} scores for {documents} documents")]
    LengthMismatch { documents: usize, scores: usize },

    #[error("threshold must lie within [0, 1], got {0}")]
    InvalidThreshold(f32),

    #[error("no CV documents to score")]
    NoDocuments,

    #[error("no job offer text was provided")]
    MissingOffer,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type ScoreResult<T> = Result<T, ScoreError>;
