// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CandidateProfile, FilterOutcome, MatchResult, NormalizedSkill, RequirementProfile, SkillReading};
pub use requests::{MatchMode, MatchRequest};
pub use responses::{ErrorResponse, FilterResponse, MatchResponse, RankResponse};
