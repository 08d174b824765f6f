//! Command-line front end: read CVs and the offer, score them, print and
//! export the results.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::domain::document::ScoredDocument;
use crate::domain::model::ModelName;
use crate::errors::{ScoreError, ScoreResult};
use crate::models::config::AppConfig;
use crate::processing::embedding::FastEmbedLoader;
use crate::processing::provider::ModelProvider;
use crate::processing::report::{DEFAULT_CSV_FILENAME, classify, render_report, to_csv};
use crate::processing::scorer::Scorer;
use crate::repository::{DocumentReader, resolve_offer_text};

/// Score CVs against a job offer using sentence embeddings.
#[derive(Parser, Debug)]
#[command(name = "cv-match", version)]
pub struct Cli {
    /// YAML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Embedding model, e.g. all-MiniLM-L6-v2.
    #[arg(long)]
    pub model: Option<String>,

    /// Scores at or above this value are a MATCH.
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Offer text; takes priority over --offer-file when not blank.
    #[arg(long)]
    pub offer: Option<String>,

    #[arg(long)]
    pub offer_file: Option<PathBuf>,

    /// Write results as CSV (`--csv=FILE`). Without a value writes
    /// cv_matching_results.csv.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = DEFAULT_CSV_FILENAME)]
    pub csv: Option<PathBuf>,

    /// Print results as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// How many best and worst CVs to list.
    #[arg(long, default_value_t = 3)]
    pub top: usize,

    /// CV text files or directories of .txt files.
    #[arg(required = true)]
    pub cvs: Vec<PathBuf>,
}

impl Cli {
    /// Configuration file and environment, with this invocation's flags on top.
    pub fn load_config(&self) -> ScoreResult<AppConfig> {
        AppConfig::load(self.config.as_deref())?
            .with_overrides(self.model.clone(), self.threshold)
    }
}

/// Scorer backed by the fastembed model named in `config`.
pub fn build_scorer(config: &AppConfig) -> ScoreResult<Scorer> {
    let model: ModelName = config.model_name.parse()?;
    let provider =
        ModelProvider::new(FastEmbedLoader::from_config(config)).with_default_model(model);
    Ok(Scorer::new(Arc::new(provider)))
}

/// Read the CVs and the offer named on the command line, score every CV and
/// label it against `threshold`. Results keep the CV input order.
pub fn score_documents<R>(
    cli: &Cli,
    reader: &R,
    scorer: &Scorer,
    threshold: f32,
) -> ScoreResult<Vec<ScoredDocument>>
where
    R: DocumentReader,
{
    let cvs = reader.read_documents(&cli.cvs)?;
    if cvs.is_empty() {
        return Err(ScoreError::NoDocuments);
    }
    let offer = resolve_offer_text(cli.offer.as_deref(), cli.offer_file.as_deref(), reader)?
        .ok_or(ScoreError::MissingOffer)?;

    log::info!(
        "Scoring {} CV(s) with {}",
        cvs.len(),
        scorer.provider().default_model()
    );
    let texts: Vec<&str> = cvs.iter().map(|cv| cv.text.as_str()).collect();
    let scores = scorer.score_batch_default(&texts, &offer)?;

    classify(&cvs, &scores, threshold)
}

/// Score, print the report (or JSON) to `out` and write the CSV if asked.
pub fn run<R, W>(
    cli: &Cli,
    config: &AppConfig,
    reader: &R,
    scorer: &Scorer,
    out: &mut W,
) -> ScoreResult<Vec<ScoredDocument>>
where
    R: DocumentReader,
    W: Write,
{
    let results = score_documents(cli, reader, scorer, config.threshold)?;

    let rendered = if cli.json {
        format!("{}\n", serde_json::to_string_pretty(&results)?)
    } else {
        render_report(&results, config.threshold, cli.top)
    };
    out.write_all(rendered.as_bytes())
        .map_err(|source| ScoreError::Io {
            path: "<output>".to_string(),
            source,
        })?;

    if let Some(path) = &cli.csv {
        fs::write(path, to_csv(&results)).map_err(|source| ScoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Results written to {}", path.display());
    }

    Ok(results)
}
