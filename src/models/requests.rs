use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::models::domain::{lenient_candidates, CandidateProfile, RequirementProfile};

/// Operating mode for a match request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Score and order every candidate
    #[default]
    Rank,
    /// Keep only candidates meeting every per-skill minimum
    Filter,
}

/// Request to match candidates against a requirement
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[serde(default)]
    pub mode: MatchMode,
    #[serde(alias = "project")]
    pub requirement: RequirementProfile,
    #[validate(nested)]
    #[serde(default, alias = "students", deserialize_with = "lenient_candidates")]
    pub candidates: Vec<CandidateProfile>,
    /// Per-skill minimum ratios for filter mode; falls back to the
    /// requirement's thresholds when omitted
    #[serde(default)]
    pub minimums: Option<BTreeMap<String, f64>>,
}

impl MatchRequest {
    pub fn rank(requirement: RequirementProfile, candidates: Vec<CandidateProfile>) -> Self {
        Self {
            mode: MatchMode::Rank,
            requirement,
            candidates,
            minimums: None,
        }
    }

    pub fn filter(
        requirement: RequirementProfile,
        candidates: Vec<CandidateProfile>,
        minimums: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            mode: MatchMode::Filter,
            requirement,
            candidates,
            minimums: Some(minimums),
        }
    }

    /// Minimums that gate filter mode
    pub fn effective_minimums(&self) -> &BTreeMap<String, f64> {
        self.minimums
            .as_ref()
            .unwrap_or(&self.requirement.thresholds)
    }
}
