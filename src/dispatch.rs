use serde_json::json;
use validator::Validate;

use crate::core::{MatchError, Matcher};
use crate::models::{
    ErrorResponse, FilterResponse, MatchMode, MatchRequest, MatchResponse, RankResponse,
};

/// Validate a match request and run it in the requested mode
///
/// Validation problems in individual candidate records are logged, not
/// fatal: the engine scores those records and flags them in their reasons.
/// Only an invalid configuration fails the request.
pub fn handle_match(matcher: &Matcher, request: &MatchRequest) -> Result<MatchResponse, MatchError> {
    if let Err(errors) = request.validate() {
        tracing::warn!("Match request has invalid records, scoring them flagged: field_errors={:?}", errors);
    }

    match request.mode {
        MatchMode::Rank => {
            let matches = matcher.rank(&request.candidates, &request.requirement)?;

            tracing::info!("Returning {} ranked matches", matches.len());

            Ok(MatchResponse::Rank(RankResponse {
                total_results: matches.len(),
                matches,
            }))
        }
        MatchMode::Filter => {
            let outcome = matcher.filter(
                &request.candidates,
                request.effective_minimums(),
                &request.requirement,
            )?;

            Ok(MatchResponse::Filter(FilterResponse {
                workspace_name: request.requirement.name.clone(),
                count: outcome.count,
                students: outcome.results,
            }))
        }
    }
}

/// Run a JSON request document and always produce a JSON document
///
/// Returns the serialized body and whether the request succeeded.
pub fn handle_json(matcher: &Matcher, body: &str) -> (String, bool) {
    let outcome = serde_json::from_str::<MatchRequest>(body)
        .map_err(|e| ErrorResponse {
            error: "invalid_json".to_string(),
            message: format!("Invalid JSON: {}", e),
            status_code: 400,
        })
        .and_then(|request| {
            handle_match(matcher, &request).map_err(|e| {
                tracing::error!("Match request failed: {}", e);
                ErrorResponse {
                    error: e.code().to_string(),
                    message: e.to_string(),
                    status_code: 422,
                }
            })
        });

    let (serialized, ok) = match outcome {
        Ok(response) => (serde_json::to_string_pretty(&response), true),
        Err(error) => (serde_json::to_string_pretty(&error), false),
    };

    match serialized {
        Ok(body) => (body, ok),
        Err(e) => {
            tracing::error!("Failed to serialize match response: {}", e);
            (serialization_failure(&e.to_string()), false)
        }
    }
}

fn serialization_failure(message: &str) -> String {
    json!({
        "error": "serialization",
        "message": message,
        "statusCode": 500,
    })
    .to_string()
}
