// Unit tests for Competency Match

use competency_match::config::{FairnessPolicy, ReadingScale};
use competency_match::core::{
    fairness::adjust_for_experience,
    normalize::{normalize, normalize_with, NormalizationError},
    reasons::{generate_reasons, ReasonRules},
    scoring::{calculate_weighted_score, SkillRatios},
    ConfigIssue, MatchError,
};
use competency_match::models::{NormalizedSkill, SkillReading};
use std::collections::BTreeMap;

fn ratios(pairs: &[(&str, f64)]) -> SkillRatios {
    pairs
        .iter()
        .map(|(skill, ratio)| (skill.to_string(), NormalizedSkill::clamped(*ratio)))
        .collect()
}

fn weights(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(skill, w)| (skill.to_string(), *w)).collect()
}

#[test]
fn test_normalize_percent_string_with_whitespace() {
    assert_eq!(normalize(&SkillReading::from(" 75% ")), Ok(0.75));
}

#[test]
fn test_normalize_raw_percentage_number() {
    assert_eq!(normalize(&SkillReading::from(60.0)), Ok(0.6));
}

#[test]
fn test_normalize_ratio_passthrough() {
    assert_eq!(normalize(&SkillReading::from(0.35)), Ok(0.35));
    assert_eq!(normalize(&SkillReading::from(0.0)), Ok(0.0));
}

#[test]
fn test_normalize_bad_input_is_an_error_not_a_panic() {
    assert!(matches!(
        normalize(&SkillReading::from("n/a")),
        Err(NormalizationError::Unparsable(_))
    ));
    assert!(matches!(normalize(&SkillReading::from("%")), Err(NormalizationError::Unparsable(_))));
}

#[test]
fn test_normalize_levels_from_legacy_scale() {
    let scale = ReadingScale::Levels { max: 5.0 };
    assert_eq!(normalize_with(&SkillReading::from(3.0), scale), Ok(0.6));
}

#[test]
fn test_scenario_a_weighted_score() {
    let score = calculate_weighted_score(
        &ratios(&[("skillA", 0.9), ("skillB", 0.8)]),
        &weights(&[("skillA", 5.0), ("skillB", 4.0)]),
    )
    .unwrap();

    assert_eq!(score, 85.6);
}

#[test]
fn test_scenario_b_missing_skill() {
    let skills = ratios(&[("skillA", 0.9)]);
    let weights = weights(&[("skillA", 5.0), ("skillB", 4.0)]);

    let score = calculate_weighted_score(&skills, &weights).unwrap();
    assert_eq!(score, 50.0);

    let rules = ReasonRules {
        mastery_threshold: 0.8,
        min_experience_months: 24.0,
    };
    let reasons = generate_reasons(&skills, &weights, 0, rules, &[]);
    assert!(reasons.contains(&"Missing skillB, which is a required competency.".to_string()));
}

#[test]
fn test_scenario_c_additive_boost() {
    let adjusted = adjust_for_experience(70.0, 12, 24.0, &FairnessPolicy::additive()).unwrap();
    assert_eq!(adjusted, 80.0);
}

#[test]
fn test_scenario_d_multiplicative_cap() {
    let adjusted = adjust_for_experience(90.0, 30, 24.0, &FairnessPolicy::multiplicative()).unwrap();
    assert_eq!(adjusted, 99.0);
}

#[test]
fn test_custom_fairness_constants() {
    let policy = FairnessPolicy {
        additive_basis_months: 12.0,
        additive_cap: 0.05,
        ..FairnessPolicy::additive()
    };

    // min(3 / 12, 0.05) = 0.05
    assert_eq!(adjust_for_experience(60.0, 3, 24.0, &policy), Ok(65.0));
}

#[test]
fn test_invalid_additive_basis() {
    let policy = FairnessPolicy {
        additive_basis_months: 0.0,
        ..FairnessPolicy::additive()
    };

    assert_eq!(
        adjust_for_experience(60.0, 3, 24.0, &policy),
        Err(MatchError::InvalidConfiguration(ConfigIssue::NonPositiveAdditiveBasis(0.0)))
    );
}

#[test]
fn test_reasons_never_empty() {
    let rules = ReasonRules {
        mastery_threshold: 0.8,
        min_experience_months: 24.0,
    };
    let reasons = generate_reasons(
        &ratios(&[("skillA", 0.4)]),
        &weights(&[("skillA", 1.0)]),
        2,
        rules,
        &[],
    );

    assert_eq!(reasons, vec!["skillA proficiency at 40%."]);
}
