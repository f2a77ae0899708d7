// Core algorithm exports
pub mod aggregate;
pub mod recommender;
pub mod scoring;
pub mod taxonomy;
pub mod tokenizer;

pub use aggregate::tailored_rating;
pub use recommender::{
    rank_gyms, CandidateFailure, CandidateOutcome, Recommendation, RecommendationQuery,
    RecommendError, Recommender, SkipReason,
};
pub use scoring::{Accumulation, PreferenceScorer};
pub use taxonomy::{KeywordTaxonomy, CATEGORIES};
pub use tokenizer::tokenize;
