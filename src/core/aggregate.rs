use crate::core::scoring::PreferenceScorer;
use crate::models::{CustomFilter, PreferenceVector, RawReview};

/// Average the preference score of every review into one tailored rating
///
/// A gym without reviews rates exactly 0.0. The value is not rounded here;
/// rounding happens when the rating is exposed over HTTP.
pub fn tailored_rating(
    scorer: &PreferenceScorer,
    reviews: &[RawReview],
    weights: &PreferenceVector,
    custom_filters: &[CustomFilter],
) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }

    let total: u64 = reviews
        .iter()
        .map(|review| u64::from(scorer.score_text(&review.text, weights, custom_filters)))
        .sum();

    total as f64 / reviews.len() as f64
}
