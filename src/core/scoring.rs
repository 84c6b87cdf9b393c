use std::collections::BTreeMap;

use crate::core::error::{ConfigIssue, MatchError};
use crate::models::NormalizedSkill;

/// Candidate ratios keyed by skill name
pub type SkillRatios = BTreeMap<String, NormalizedSkill>;

/// Check a weight map before any candidate is scored
///
/// Every weight must be finite and non-negative, and the total must be
/// strictly positive.
pub fn validate_weights(weights: &BTreeMap<String, f64>) -> Result<f64, MatchError> {
    let mut total = 0.0;
    for (skill, &weight) in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ConfigIssue::InvalidWeight {
                skill: skill.clone(),
                weight,
            }
            .into());
        }
        total += weight;
    }

    if total <= 0.0 {
        return Err(ConfigIssue::ZeroTotalWeight.into());
    }

    Ok(total)
}

/// Calculate the weighted composite score (0-100) for one candidate
///
/// Scoring formula:
/// score = sum(ratio_i * weight_i) / sum(weight_i) * 100
///
/// Skills the candidate lacks contribute a ratio of zero. The result is
/// rounded to one decimal; clamping happens after the fairness adjustment.
pub fn calculate_weighted_score(
    skills: &SkillRatios,
    weights: &BTreeMap<String, f64>,
) -> Result<f64, MatchError> {
    let total_weight = validate_weights(weights)?;

    let weighted: f64 = weights
        .iter()
        .map(|(skill, weight)| {
            let ratio = skills.get(skill).copied().unwrap_or(NormalizedSkill::ZERO);
            ratio.ratio() * weight
        })
        .sum();

    Ok(round_one_decimal(weighted / total_weight * 100.0))
}

#[inline]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
