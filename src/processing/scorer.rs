use std::sync::Arc;

use crate::errors::{ScoreError, ScoreResult};
use crate::processing::embedding::Embedding;
use crate::processing::provider::ModelProvider;
use crate::processing::similarity::cosine_similarity;

/// Scores CV texts against a job offer by cosine similarity of their
/// sentence embeddings.
///
/// Every call is stateless apart from the model cached in the shared
/// [`ModelProvider`].
#[derive(Clone)]
pub struct Scorer {
    provider: Arc<ModelProvider>,
}

impl Scorer {
    pub fn new(provider: Arc<ModelProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &ModelProvider {
        &self.provider
    }

    /// Encode `texts` with `model_name`, one embedding per text in input
    /// order. An empty input returns immediately without loading a model.
    pub fn encode<S>(&self, texts: &[S], model_name: &str) -> ScoreResult<Vec<Embedding>>
    where
        S: AsRef<str>,
    {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = self.provider.get_model(model_name)?;
        let texts: Vec<&str> = texts.iter().map(AsRef::as_ref).collect();

        log::debug!("Encoding {} text(s) with {}", texts.len(), model.name());
        let embeddings = model.embed(&texts)?;

        if embeddings.len() != texts.len() {
            return Err(ScoreError::Encoding(format!(
                "model returned {} embeddings for {} texts",
                embeddings.len(),
                texts.len()
            )));
        }

        Ok(embeddings)
    }

    fn encode_one(&self, text: &str, model_name: &str) -> ScoreResult<Embedding> {
        self.encode(&[text], model_name)?
            .into_iter()
            .next()
            .ok_or_else(|| ScoreError::Encoding("model returned no embedding".to_string()))
    }

    /// Similarity between one CV and one offer.
    pub fn score_pair(&self, cv_text: &str, offer_text: &str, model_name: &str) -> ScoreResult<f32> {
        let cv = self.encode_one(cv_text, model_name)?;
        let offer = self.encode_one(offer_text, model_name)?;

        cosine_similarity(&cv, &offer)
    }

    /// Similarity of each CV against a single offer.
    ///
    /// `result[i]` belongs to `cv_texts[i]`. No CVs means no scores and no
    /// model invocation. Encoding is all-or-nothing: any failure fails the
    /// whole batch.
    pub fn score_batch<S>(
        &self,
        cv_texts: &[S],
        offer_text: &str,
        model_name: &str,
    ) -> ScoreResult<Vec<f32>>
    where
        S: AsRef<str>,
    {
        if cv_texts.is_empty() {
            return Ok(Vec::new());
        }

        let cvs = self.encode(cv_texts, model_name)?;
        let offer = self.encode_one(offer_text, model_name)?;

        cvs.iter()
            .map(|cv| cosine_similarity(cv, &offer))
            .collect()
    }

    pub fn score_pair_default(&self, cv_text: &str, offer_text: &str) -> ScoreResult<f32> {
        self.score_pair(cv_text, offer_text, self.provider.default_model().as_str())
    }

    pub fn score_batch_default<S>(&self, cv_texts: &[S], offer_text: &str) -> ScoreResult<Vec<f32>>
    where
        S: AsRef<str>,
    {
        self.score_batch(cv_texts, offer_text, self.provider.default_model().as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::Scorer;
    use crate::domain::model::ModelName;
    use crate::errors::{ScoreError, ScoreResult};
    use crate::processing::embedding::{Embedder, Embedding, ModelLoader};
    use crate::processing::provider::ModelProvider;

    /// Drops the last embedding to simulate a misbehaving backend.
    struct ShortEmbedder;

    impl Embedder for ShortEmbedder {
        fn embed(&self, texts: &[&str]) -> ScoreResult<Vec<Embedding>> {
            Ok(texts.iter().skip(1).map(|_| vec![1.0]).collect())
        }
    }

    struct ShortLoader;

    impl ModelLoader for ShortLoader {
        fn load(&self, _model: ModelName) -> ScoreResult<Box<dyn Embedder>> {
            Ok(Box::new(ShortEmbedder))
        }
    }

    #[test]
    fn encode_rejects_missing_embeddings() {
        let scorer = Scorer::new(Arc::new(ModelProvider::new(ShortLoader)));

        let error = scorer
            .encode(&["a", "b"], "all-MiniLM-L6-v2")
            .unwrap_err();

        assert!(matches!(error, ScoreError::Encoding(_)));
    }

    #[test]
    fn score_pair_fails_when_backend_returns_nothing() {
        let scorer = Scorer::new(Arc::new(ModelProvider::new(ShortLoader)));

        let error = scorer
            .score_pair("cv", "offer", "all-MiniLM-L6-v2")
            .unwrap_err();

        assert!(matches!(error, ScoreError::Encoding(_)));
    }

    #[test]
    fn empty_encode_skips_model() {
        let scorer = Scorer::new(Arc::new(ModelProvider::new(ShortLoader)));

        let embeddings = scorer
            .encode::<&str>(&[], "all-MiniLM-L6-v2")
            .expect("empty input is fine");

        assert!(embeddings.is_empty());
        assert_eq!(scorer.provider().loaded_model(), None);
    }
}
