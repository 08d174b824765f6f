//! Turns raw scores into labelled, ordered results for display and export.

use std::fmt::Write;

use crate::domain::document::{CvDocument, ScoredDocument, Verdict};
use crate::errors::{ScoreError, ScoreResult};

pub const DEFAULT_CSV_FILENAME: &str = "cv_matching_results.csv";
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;
const HISTOGRAM_BAR_WIDTH: usize = 40;

/// Pair each document with its score and label it against `threshold`.
pub fn classify(
    documents: &[CvDocument],
    scores: &[f32],
    threshold: f32,
) -> ScoreResult<Vec<ScoredDocument>> {
    if documents.len() != scores.len() {
        return Err(ScoreError::LengthMismatch {
            documents: documents.len(),
            scores: scores.len(),
        });
    }

    Ok(documents
        .iter()
        .zip(scores)
        .map(|(document, &score)| ScoredDocument {
            filename: document.filename.clone(),
            score,
            verdict: Verdict::from_score(score, threshold),
        })
        .collect())
}

/// Copy of `documents` ordered by score. Ties keep their input order.
pub fn sorted_by_score(documents: &[ScoredDocument], descending: bool) -> Vec<ScoredDocument> {
    let mut sorted = documents.to_vec();
    if descending {
        sorted.sort_by(|a, b| b.score.total_cmp(&a.score));
    } else {
        sorted.sort_by(|a, b| a.score.total_cmp(&b.score));
    }
    sorted
}

pub fn top(documents: &[ScoredDocument], n: usize) -> Vec<ScoredDocument> {
    sorted_by_score(documents, true).into_iter().take(n).collect()
}

pub fn bottom(documents: &[ScoredDocument], n: usize) -> Vec<ScoredDocument> {
    sorted_by_score(documents, false).into_iter().take(n).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub processed: usize,
    pub matched: usize,
}

pub fn summarize(documents: &[ScoredDocument]) -> Summary {
    Summary {
        processed: documents.len(),
        matched: documents
            .iter()
            .filter(|document| document.verdict == Verdict::Match)
            .count(),
    }
}

/// Count scores into `bins` equal-width buckets over `[0, 1]`.
///
/// Scores outside the range land in the first or last bucket; `1.0` belongs
/// to the last one.
pub fn histogram(scores: &[f32], bins: usize) -> Vec<usize> {
    let mut counts = vec![0; bins];
    if bins == 0 {
        return counts;
    }

    for score in scores {
        let position = (score.clamp(0.0, 1.0) * bins as f32) as usize;
        counts[position.min(bins - 1)] += 1;
    }

    counts
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// CSV with a `filename,score,result` header, rows in the given order.
pub fn to_csv(documents: &[ScoredDocument]) -> String {
    let mut out = String::from("filename,score,result\n");
    for document in documents {
        let _ = writeln!(
            out,
            "{},{},{}",
            csv_field(&document.filename),
            document.score,
            document.verdict
        );
    }
    out
}

pub fn render_table(documents: &[ScoredDocument]) -> String {
    let width = documents
        .iter()
        .map(|document| document.filename.chars().count())
        .chain(std::iter::once("filename".len()))
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  {:>6}  result", "filename", "score");
    for document in documents {
        let _ = writeln!(
            out,
            "{:<width$}  {:>6.3}  {}",
            document.filename, document.score, document.verdict
        );
    }
    out
}

pub fn render_histogram(counts: &[usize]) -> String {
    let bins = counts.len();
    let peak = counts.iter().copied().max().unwrap_or_default();

    let mut out = String::new();
    for (index, &count) in counts.iter().enumerate() {
        let low = index as f32 / bins as f32;
        let high = (index + 1) as f32 / bins as f32;
        let bar = if peak == 0 {
            0
        } else {
            (count * HISTOGRAM_BAR_WIDTH).div_ceil(peak)
        };
        let _ = writeln!(
            out,
            "[{low:.2}, {high:.2}{} {:>4} {}",
            if index + 1 == bins { ']' } else { ')' },
            count,
            "#".repeat(bar)
        );
    }
    out
}

/// Full text report: summary, ranked table, best and worst `n`, histogram.
pub fn render_report(documents: &[ScoredDocument], threshold: f32, n: usize) -> String {
    let summary = summarize(documents);
    let scores: Vec<f32> = documents.iter().map(|document| document.score).collect();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Scored {} CV(s), {} at or above threshold {threshold:.2}\n",
        summary.processed, summary.matched
    );
    let _ = writeln!(out, "Results");
    out.push_str(&render_table(&sorted_by_score(documents, true)));
    let _ = writeln!(out, "\nTop {n}");
    out.push_str(&render_table(&top(documents, n)));
    let _ = writeln!(out, "\nBottom {n}");
    out.push_str(&render_table(&bottom(documents, n)));
    let _ = writeln!(out, "\nScore distribution");
    out.push_str(&render_histogram(&histogram(
        &scores,
        DEFAULT_HISTOGRAM_BINS,
    )));
    out
}
