use serde::{Deserialize, Serialize};
use crate::models::domain::MatchResult;

/// Response for rank mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub matches: Vec<MatchResult>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Response for filter mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterResponse {
    #[serde(rename = "workspaceName")]
    pub workspace_name: Option<String>,
    pub count: usize,
    pub students: Vec<MatchResult>,
}

/// Either response shape, serialized without a tag
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchResponse {
    Filter(FilterResponse),
    Rank(RankResponse),
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
