use crate::errors::{ScoreError, ScoreResult};

/// Cosine similarity of two embeddings, `(a·b) / (‖a‖·‖b‖)`.
///
/// Sums run in `f64`, so squares of any finite `f32` neither overflow nor
/// underflow. A zero-norm vector has no direction; its similarity to anything
/// is `0.0`. Non-finite components are rejected with
/// [`ScoreError::Encoding`]. The result is clamped to `[-1, 1]` so rounding
/// never leaves the range.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> ScoreResult<f32> {
    if a.len() != b.len() {
        return Err(ScoreError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    if a.iter().chain(b).any(|x| !x.is_finite()) {
        return Err(ScoreError::Encoding(
            "embedding contains non-finite values".to_string(),
        ));
    }

    let (dot, norm_a, norm_b) = a.iter().zip(b).fold(
        (0.0_f64, 0.0_f64, 0.0_f64),
        |(dot, norm_a, norm_b), (&x, &y)| {
            let (x, y) = (f64::from(x), f64::from(y));
            (dot + x * y, norm_a + x * x, norm_b + y * y)
        },
    );

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    Ok(similarity.clamp(-1.0, 1.0) as f32)
}
