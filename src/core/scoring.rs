use crate::core::taxonomy::KeywordTaxonomy;
use crate::core::tokenizer::tokenize;
use crate::models::{CustomFilter, PreferenceVector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// How often a category may contribute its weight to a single review
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accumulation {
    /// Weight is added once per matching trigger word
    PerKeyword,
    /// Weight is added at most once per category
    #[default]
    PerCategory,
}

/// Maps review text and a weighted preference vector to a numeric score
///
/// Scoring formula for one review:
/// score = (
///     sum over categories of weight * matched trigger words +
///     sum over custom filters of importance if the keyword appears
/// )
///
/// With [`Accumulation::PerCategory`] the matched trigger word count is capped at 1.
#[derive(Debug, Clone)]
pub struct PreferenceScorer {
    taxonomy: Arc<KeywordTaxonomy>,
    accumulation: Accumulation,
}

impl PreferenceScorer {
    pub fn new(taxonomy: Arc<KeywordTaxonomy>, accumulation: Accumulation) -> Self {
        Self {
            taxonomy,
            accumulation,
        }
    }

    pub fn taxonomy(&self) -> &KeywordTaxonomy {
        &self.taxonomy
    }

    pub fn accumulation(&self) -> Accumulation {
        self.accumulation
    }

    /// Score an already tokenized review
    pub fn score(
        &self,
        tokens: &HashSet<String>,
        weights: &PreferenceVector,
        custom_filters: &[CustomFilter],
    ) -> u32 {
        let mut score: u32 = 0;

        // Stage 1: predefined categories
        for (category, triggers) in self.taxonomy.iter() {
            let Some(weight) = weights.weight(category) else {
                continue;
            };

            let matched = triggers.iter().filter(|word| tokens.contains(*word)).count() as u32;
            let hits = match self.accumulation {
                Accumulation::PerKeyword => matched,
                Accumulation::PerCategory => matched.min(1),
            };

            score = score.saturating_add(u32::from(weight).saturating_mul(hits));
        }

        // Stage 2: caller-supplied keywords
        for filter in custom_filters {
            let keyword = filter.keyword.trim().to_lowercase();
            if tokens.contains(&keyword) {
                score = score.saturating_add(u32::from(filter.importance));
            }
        }

        score
    }

    /// Tokenize and score raw review text
    #[inline]
    pub fn score_text(
        &self,
        text: &str,
        weights: &PreferenceVector,
        custom_filters: &[CustomFilter],
    ) -> u32 {
        self.score(&tokenize(text), weights, custom_filters)
    }
}

impl Default for PreferenceScorer {
    fn default() -> Self {
        Self::new(Arc::new(KeywordTaxonomy::default()), Accumulation::default())
    }
}
