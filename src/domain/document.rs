use std::fmt;

use serde::Serialize;

/// A CV as read from disk: the name it was loaded from and its decoded text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CvDocument {
    pub filename: String,
    pub text: String,
}

impl CvDocument {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }
}

/// Outcome of comparing a score against the match threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Verdict {
    #[serde(rename = "MATCH")]
    Match,
    #[serde(rename = "NO MATCH")]
    NoMatch,
}

impl Verdict {
    /// `score >= threshold` is a match.
    pub fn from_score(score: f32, threshold: f32) -> Self {
        if score >= threshold {
            Verdict::Match
        } else {
            Verdict::NoMatch
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Match => "MATCH",
            Verdict::NoMatch => "NO MATCH",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredDocument {
    pub filename: String,
    pub score: f32,
    #[serde(rename = "result")]
    pub verdict: Verdict,
}
