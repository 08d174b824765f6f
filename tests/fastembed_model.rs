//! Runs against the real ONNX model; needs network access on first run.
//! `cargo test -- --ignored` to include.

use std::sync::Arc;

use cv_match::processing::embedding::FastEmbedLoader;
use cv_match::processing::provider::ModelProvider;
use cv_match::processing::scorer::Scorer;

fn scorer() -> Scorer {
    Scorer::new(Arc::new(ModelProvider::new(FastEmbedLoader::default())))
}

#[test]
#[ignore = "downloads all-MiniLM-L6-v2"]
fn python_cv_ranks_above_design_cv() {
    let scores = scorer()
        .score_batch_default(
            &["Python Pandas Git experience", "Photoshop Illustrator design"],
            "Seeking Python developer with Pandas and Git",
        )
        .expect("model scores");

    assert_eq!(scores.len(), 2);
    assert!(scores[0] > scores[1], "{scores:?}");
    assert!(scores.iter().all(|s| (-1.0..=1.0).contains(s)));
}

#[test]
#[ignore = "downloads all-MiniLM-L6-v2"]
fn batch_matches_pairwise_with_real_model() {
    let scorer = scorer();
    let cvs = ["Rust systems programmer", "Pastry chef"];
    let offer = "Backend engineer, Rust and Linux";

    let batch = scorer.score_batch_default(&cvs, offer).expect("model scores");
    for (cv, score) in cvs.iter().zip(&batch) {
        let pair = scorer.score_pair_default(cv, offer).expect("model scores");
        assert!((pair - score).abs() < 1e-4);
    }

    let own = scorer.score_pair_default(offer, offer).expect("model scores");
    assert!((own - 1.0).abs() < 1e-4);
}
