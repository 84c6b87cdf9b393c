use crate::config::{FairnessMode, FairnessPolicy};
use crate::core::error::{ConfigIssue, MatchError};
use crate::core::scoring::round_one_decimal;

/// Check that the policy can be applied with the given minimum experience
pub fn validate_policy(policy: &FairnessPolicy, min_experience_months: f64) -> Result<(), MatchError> {
    match policy.mode {
        FairnessMode::Multiplicative => {
            if min_experience_months <= 0.0 || !min_experience_months.is_finite() {
                return Err(ConfigIssue::NonPositiveMinExperience(min_experience_months).into());
            }
            check_cap(policy.multiplier_cap)
        }
        FairnessMode::Additive => {
            if policy.additive_basis_months <= 0.0 || !policy.additive_basis_months.is_finite() {
                return Err(ConfigIssue::NonPositiveAdditiveBasis(policy.additive_basis_months).into());
            }
            check_cap(policy.additive_cap)
        }
    }
}

fn check_cap(cap: f64) -> Result<(), MatchError> {
    if cap.is_finite() && cap >= 0.0 {
        Ok(())
    } else {
        Err(ConfigIssue::InvalidFairnessCap(cap).into())
    }
}

/// Adjust a base score (0-100) by experience
///
/// The adjusted score is clamped to [0, 100] and rounded to one decimal.
pub fn adjust_for_experience(
    base_score: f64,
    experience_months: u32,
    min_experience_months: f64,
    policy: &FairnessPolicy,
) -> Result<f64, MatchError> {
    validate_policy(policy, min_experience_months)?;

    let months = f64::from(experience_months);
    let adjusted = match policy.mode {
        FairnessMode::Multiplicative => {
            let multiplier = (months / min_experience_months).min(policy.multiplier_cap);
            base_score * multiplier
        }
        FairnessMode::Additive => {
            let boost = (months / policy.additive_basis_months).min(policy.additive_cap);
            base_score + boost * 100.0
        }
    };

    Ok(round_one_decimal(adjusted.clamp(0.0, 100.0)))
}
