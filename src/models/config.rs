//! Configuration model loaded from external sources.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! `CV_MATCH_*` environment variables. Command-line flags are applied on top
//! by the binary.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::errors::{ScoreError, ScoreResult};
use crate::{DEFAULT_MODEL, DEFAULT_THRESHOLD};

pub const ENV_PREFIX: &str = "CV_MATCH";

#[derive(Clone, Debug, Deserialize, PartialEq)]
/// Settings for the embedding backend and match labelling.
pub struct AppConfig {
    pub model_name: String,
    pub threshold: f32,
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    #[serde(default)]
    pub show_download_progress: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL.to_string(),
            threshold: DEFAULT_THRESHOLD,
            cache_dir: None,
            show_download_progress: false,
        }
    }
}

impl AppConfig {
    /// Load configuration, reading `path` as YAML when given.
    pub fn load(path: Option<&Path>) -> ScoreResult<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> ScoreResult<Self> {
        let mut builder = Config::builder()
            .set_default("model_name", DEFAULT_MODEL)?
            .set_default("threshold", f64::from(DEFAULT_THRESHOLD))?
            .set_default("show_download_progress", false)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Yaml).required(true));
        }

        let config: AppConfig = builder.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides and re-check the result.
    pub fn with_overrides(
        mut self,
        model_name: Option<String>,
        threshold: Option<f32>,
    ) -> ScoreResult<Self> {
        if let Some(model_name) = model_name {
            self.model_name = model_name;
        }
        if let Some(threshold) = threshold {
            self.threshold = threshold;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> ScoreResult<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ScoreError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}
