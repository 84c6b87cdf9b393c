// Core algorithm exports
pub mod error;
pub mod fairness;
pub mod matcher;
pub mod normalize;
pub mod reasons;
pub mod scoring;

pub use error::{ConfigIssue, MatchError};
pub use fairness::adjust_for_experience;
pub use matcher::{compare_results, Matcher};
pub use normalize::{normalize, normalize_with, NormalizationError};
pub use reasons::{generate_reasons, DataQualityNote, ReasonRules};
pub use scoring::{calculate_weighted_score, SkillRatios};
