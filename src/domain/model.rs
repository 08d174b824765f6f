use std::fmt;
use std::str::FromStr;

use crate::errors::ScoreError;

const SENTENCE_TRANSFORMERS_PREFIX: &str = "sentence-transformers/";

/// Sentence embedding models the scorer knows how to load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModelName {
    #[default]
    AllMiniLmL6V2,
    AllMiniLmL12V2,
    BgeSmallEnV15,
    BgeBaseEnV15,
    ParaphraseMultilingualMiniLmL12V2,
    MultilingualE5Small,
    MultilingualE5Large,
}

impl ModelName {
    pub const ALL: [ModelName; 7] = [
        ModelName::AllMiniLmL6V2,
        ModelName::AllMiniLmL12V2,
        ModelName::BgeSmallEnV15,
        ModelName::BgeBaseEnV15,
        ModelName::ParaphraseMultilingualMiniLmL12V2,
        ModelName::MultilingualE5Small,
        ModelName::MultilingualE5Large,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::AllMiniLmL6V2 => "all-MiniLM-L6-v2",
            ModelName::AllMiniLmL12V2 => "all-MiniLM-L12-v2",
            ModelName::BgeSmallEnV15 => "bge-small-en-v1.5",
            ModelName::BgeBaseEnV15 => "bge-base-en-v1.5",
            ModelName::ParaphraseMultilingualMiniLmL12V2 => "paraphrase-multilingual-MiniLM-L12-v2",
            ModelName::MultilingualE5Small => "multilingual-e5-small",
            ModelName::MultilingualE5Large => "multilingual-e5-large",
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelName {
    type Err = ScoreError;

    /// Case-insensitive; the `sentence-transformers/` hub prefix is accepted.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let lowered = trimmed.to_ascii_lowercase();
        let name = lowered
            .strip_prefix(SENTENCE_TRANSFORMERS_PREFIX)
            .unwrap_or(&lowered);

        ModelName::ALL
            .into_iter()
            .find(|model| model.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ScoreError::UnknownModel(trimmed.to_string()))
    }
}
