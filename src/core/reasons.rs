use std::collections::BTreeMap;
use std::fmt;

use crate::core::scoring::SkillRatios;
use crate::models::NormalizedSkill;

/// Thresholds that decide which reasons fire
#[derive(Debug, Clone, Copy)]
pub struct ReasonRules {
    pub mastery_threshold: f64,
    pub min_experience_months: f64,
}

/// A per-record anomaly recovered while scoring a candidate
#[derive(Debug, Clone, PartialEq)]
pub enum DataQualityNote {
    /// The record has no usable identifier
    MissingIdentifier,
    /// The reading could not be parsed and was scored as 0%
    Unreadable { skill: String, raw: String },
    /// The reading fell outside [0, 1] after normalization and was clamped
    OutOfRange { skill: String, ratio: f64, clamped: f64 },
}

impl fmt::Display for DataQualityNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataQualityNote::MissingIdentifier => {
                write!(f, "This record has no identifier; it was scored but cannot be told apart from other unnamed records.")
            }
            DataQualityNote::Unreadable { skill, raw } => {
                write!(f, "Could not read the {} level '{}'; it was scored as 0%.", skill, raw)
            }
            DataQualityNote::OutOfRange { skill, ratio, clamped } => write!(
                f,
                "The {} level ({:.0}%) is out of range; it was scored as {:.0}%.",
                skill,
                ratio * 100.0,
                clamped * 100.0
            ),
        }
    }
}

/// Build the ordered explanation list for one candidate
///
/// Rules are evaluated in a fixed order over the weighted skills
/// (ascending by name):
/// 1. strong mastery for ratios at or above the mastery threshold
/// 2. missing competency for ratios of exactly zero
/// 3. experience meeting the minimum
/// 4. if nothing fired, one percentage line per weighted skill
///
/// Data-quality notes are appended last. The list is never empty as long
/// as `weights` is non-empty.
pub fn generate_reasons(
    skills: &SkillRatios,
    weights: &BTreeMap<String, f64>,
    experience_months: u32,
    rules: ReasonRules,
    notes: &[DataQualityNote],
) -> Vec<String> {
    let ratio_of = |skill: &str| skills.get(skill).copied().unwrap_or(NormalizedSkill::ZERO);
    let mut reasons = Vec::new();

    for skill in weights.keys() {
        if ratio_of(skill).ratio() >= rules.mastery_threshold {
            reasons.push(format!("Strong mastery in {} matches high-priority need.", skill));
        }
    }

    for skill in weights.keys() {
        if ratio_of(skill).is_zero() {
            reasons.push(format!("Missing {}, which is a required competency.", skill));
        }
    }

    if f64::from(experience_months) >= rules.min_experience_months {
        reasons.push(format!(
            "{} months of experience meets the {}-month requirement.",
            experience_months, rules.min_experience_months
        ));
    }

    if reasons.is_empty() {
        for skill in weights.keys() {
            reasons.push(format!(
                "{} proficiency at {:.0}%.",
                skill,
                ratio_of(skill).ratio() * 100.0
            ));
        }
    }

    reasons.extend(notes.iter().map(ToString::to_string));
    reasons
}
