use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::document::CvDocument;
use crate::errors::{ScoreError, ScoreResult};
use crate::repository::DocumentReader;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Decode raw bytes as UTF-8, dropping invalid byte sequences, and collapse
/// runs of whitespace into single spaces.
pub fn sanitize_text(raw: &[u8]) -> String {
    let decoded: String = raw.utf8_chunks().map(|chunk| chunk.valid()).collect();
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn io_error(path: &Path, source: std::io::Error) -> ScoreError {
    ScoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Reads documents from the local filesystem.
///
/// Directories contribute the files with the configured extension, sorted by
/// name; explicitly listed files are read whatever their extension. A listed
/// path that does not exist is an error. A file that exists but cannot be read
/// is kept with empty text and a warning.
#[derive(Clone, Debug)]
pub struct FsDocumentRepository {
    extension: String,
}

impl Default for FsDocumentRepository {
    fn default() -> Self {
        Self::new("txt")
    }
}

impl FsDocumentRepository {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    fn directory_entries(&self, dir: &Path) -> ScoreResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
            let path = entry.map_err(|e| io_error(dir, e))?.path();
            let matches_extension = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension));
            if !path.is_dir() && matches_extension {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn read_or_empty(&self, path: &Path) -> CvDocument {
        self.read_document(path).unwrap_or_else(|error| {
            log::warn!("Scoring {} as empty text: {error}", path.display());
            CvDocument::new(display_name(path), "")
        })
    }
}

impl DocumentReader for FsDocumentRepository {
    fn read_document(&self, path: &Path) -> ScoreResult<CvDocument> {
        let raw = fs::read(path).map_err(|e| io_error(path, e))?;

        Ok(CvDocument::new(display_name(path), sanitize_text(&raw)))
    }

    fn read_documents(&self, paths: &[PathBuf]) -> ScoreResult<Vec<CvDocument>> {
        let mut documents = Vec::new();
        for path in paths {
            if path.is_dir() {
                let entries = self.directory_entries(path)?;
                if entries.is_empty() {
                    log::warn!(
                        "No .{} files found in {}",
                        self.extension,
                        path.display()
                    );
                }
                documents.extend(entries.iter().map(|entry| self.read_or_empty(entry)));
            } else {
                fs::metadata(path).map_err(|e| io_error(path, e))?;
                documents.push(self.read_or_empty(path));
            }
        }
        log::debug!("Read {} document(s)", documents.len());
        Ok(documents)
    }
}

/// Pick the offer text: non-blank inline text wins, otherwise the offer file
/// is read. `None` when neither yields any text.
pub fn resolve_offer_text<R>(
    inline: Option<&str>,
    file: Option<&Path>,
    reader: &R,
) -> ScoreResult<Option<String>>
where
    R: DocumentReader,
{
    if let Some(text) = inline.map(str::trim).filter(|text| !text.is_empty()) {
        return Ok(Some(text.to_string()));
    }

    match file {
        Some(path) => {
            let document = reader.read_document(path)?;
            Ok(Some(document.text).filter(|text| !text.is_empty()))
        }
        None => Ok(None),
    }
}
