// ruta/src/route/score.rs

//! Score arithmetic. Scores are confidences in (0, 1] attached to routes and
//! used for ranking by the scoring combinators.

/// Normalizes an optional raw score into (0, 1].
///
/// Absent scores, non-finite values, values above 1, and values at or below 0
/// are all treated as full confidence (1.0). Anything already inside (0, 1]
/// passes through unchanged.
pub fn normalized_score(score: Option<f64>) -> f64 {
  match score {
    Some(s) if s > 0.0 && s <= 1.0 => s,
    _ => 1.0,
  }
}

/// Folds two confidences into one. Multiplicative, and applied consistently at
/// every boundary that combines an inner score with an outer one.
pub fn combine_scores(a: f64, b: f64) -> f64 {
  normalized_score(Some(a)) * normalized_score(Some(b))
}
