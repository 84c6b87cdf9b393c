//! Competency Match - explainable matching of candidates against workspace requirements
//!
//! This library scores candidate profiles against a requirement profile,
//! applies an experience-based fairness adjustment and explains every score
//! with an ordered list of reasons. It supports ranking every candidate or
//! filtering on per-skill minimums.

pub mod config;
pub mod core;
pub mod dispatch;
pub mod models;

// Re-export commonly used types
pub use crate::config::{FairnessMode, FairnessPolicy, MatchConfig, ReadingScale, Settings};
pub use crate::core::{normalize, ConfigIssue, MatchError, Matcher};
pub use models::{CandidateProfile, FilterOutcome, MatchRequest, MatchResponse, MatchResult, RequirementProfile, SkillReading};
