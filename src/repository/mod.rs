use std::path::{Path, PathBuf};

use crate::domain::document::CvDocument;
use crate::errors::ScoreResult;

pub mod document;

pub use document::{FsDocumentRepository, resolve_offer_text};

pub trait DocumentReader {
    /// Read and decode a single document.
    fn read_document(&self, path: &Path) -> ScoreResult<CvDocument>;

    /// Read every document named by `paths`, expanding directories.
    fn read_documents(&self, paths: &[PathBuf]) -> ScoreResult<Vec<CvDocument>>;
}
