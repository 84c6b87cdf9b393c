use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::config::{MatchConfig, ReadingScale};
use crate::core::{
    error::{ConfigIssue, MatchError},
    fairness::{adjust_for_experience, validate_policy},
    normalize::{normalize_with, rescale},
    reasons::{generate_reasons, DataQualityNote, ReasonRules},
    scoring::{calculate_weighted_score, validate_weights, SkillRatios},
};
use crate::models::{CandidateProfile, FilterOutcome, MatchResult, NormalizedSkill, RequirementProfile, SkillReading};

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Configuration check (weights, fairness policy, thresholds)
/// 2. Per-candidate normalization of skill readings
/// 3. Weighted scoring and fairness adjustment
/// 4. Reason generation
/// 5. Ordering (and eligibility filtering in filter mode)
///
/// Stages 2-4 are independent per candidate and run on the rayon pool
/// once a batch reaches `parallel_threshold`.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

/// Requirement resolved against the config, checked once per batch
#[derive(Debug, Clone, Copy)]
struct Plan<'a> {
    weights: &'a BTreeMap<String, f64>,
    min_experience_months: f64,
    rules: ReasonRules,
}

/// Per-candidate output before ordering
struct Evaluated {
    result: MatchResult,
    ratios: SkillRatios,
}

impl Matcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self::new(MatchConfig::default())
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Rank every candidate against the requirement
    ///
    /// Results are ordered by score (descending), ties broken by candidate
    /// identifier (ascending). No candidate is dropped.
    pub fn rank(
        &self,
        candidates: &[CandidateProfile],
        requirement: &RequirementProfile,
    ) -> Result<Vec<MatchResult>, MatchError> {
        let plan = self.plan(requirement)?;

        tracing::info!("Ranking {} candidates against {} weighted skills", candidates.len(), plan.weights.len());

        let mut results: Vec<MatchResult> = self
            .evaluate_all(&plan, candidates)?
            .into_iter()
            .map(|evaluated| evaluated.result)
            .collect();

        results.sort_by(compare_results);
        Ok(results)
    }

    /// Keep only candidates meeting every per-skill minimum
    ///
    /// Skills absent from `minimums` do not gate eligibility. Eligible
    /// results are ordered by the configured primary skill's ratio, then by
    /// score and identifier.
    pub fn filter(
        &self,
        candidates: &[CandidateProfile],
        minimums: &BTreeMap<String, f64>,
        requirement: &RequirementProfile,
    ) -> Result<FilterOutcome, MatchError> {
        let plan = self.plan(requirement)?;
        let minimums = resolve_minimums(minimums, self.config.reading_scale)?;

        tracing::info!("Filtering {} candidates on {} skill minimums", candidates.len(), minimums.len());

        let mut eligible: Vec<Evaluated> = self
            .evaluate_all(&plan, candidates)?
            .into_iter()
            .filter(|evaluated| meets_minimums(&evaluated.ratios, &minimums))
            .collect();

        let primary = self.config.primary_skill.as_deref();
        eligible.sort_by(|a, b| {
            let primary_order = match primary {
                Some(skill) => ratio_of(&b.ratios, skill).total_cmp(&ratio_of(&a.ratios, skill)),
                None => Ordering::Equal,
            };
            primary_order.then_with(|| compare_results(&a.result, &b.result))
        });

        let results: Vec<MatchResult> = eligible
            .into_iter()
            .map(|evaluated| MatchResult {
                eligible: Some(true),
                ..evaluated.result
            })
            .collect();

        tracing::info!("{} of {} candidates are eligible", results.len(), candidates.len());

        Ok(FilterOutcome {
            count: results.len(),
            results,
        })
    }

    /// Score and explain a single candidate
    pub fn score_candidate(
        &self,
        candidate: &CandidateProfile,
        requirement: &RequirementProfile,
    ) -> Result<MatchResult, MatchError> {
        let plan = self.plan(requirement)?;
        Ok(self.evaluate(&plan, candidate)?.result)
    }

    /// Resolve weights and experience minimum, and reject a broken configuration
    fn plan<'a>(&'a self, requirement: &'a RequirementProfile) -> Result<Plan<'a>, MatchError> {
        let weights = if requirement.weights.is_empty() {
            &self.config.weights
        } else {
            &requirement.weights
        };
        validate_weights(weights)?;

        let min_experience_months = requirement
            .min_experience_months
            .unwrap_or(self.config.min_experience_months);
        validate_policy(&self.config.fairness, min_experience_months)?;

        let mastery_threshold = self.config.mastery_threshold;
        if !(0.0..=1.0).contains(&mastery_threshold) {
            return Err(ConfigIssue::MasteryThresholdOutOfRange(mastery_threshold).into());
        }

        if let ReadingScale::Levels { max } = self.config.reading_scale {
            if max <= 0.0 || !max.is_finite() {
                return Err(ConfigIssue::NonPositiveLevelScale(max).into());
            }
        }

        Ok(Plan {
            weights,
            min_experience_months,
            rules: ReasonRules {
                mastery_threshold,
                min_experience_months,
            },
        })
    }

    fn evaluate_all(
        &self,
        plan: &Plan<'_>,
        candidates: &[CandidateProfile],
    ) -> Result<Vec<Evaluated>, MatchError> {
        let threshold = self.config.parallel_threshold;
        if threshold > 0 && candidates.len() >= threshold {
            candidates
                .par_iter()
                .map(|candidate| self.evaluate(plan, candidate))
                .collect()
        } else {
            candidates
                .iter()
                .map(|candidate| self.evaluate(plan, candidate))
                .collect()
        }
    }

    fn evaluate(&self, plan: &Plan<'_>, candidate: &CandidateProfile) -> Result<Evaluated, MatchError> {
        let (ratios, notes) = self.normalize_candidate(plan, candidate);

        let base_score = calculate_weighted_score(&ratios, plan.weights)?;
        let score = adjust_for_experience(
            base_score,
            candidate.experience_months,
            plan.min_experience_months,
            &self.config.fairness,
        )?;

        let reasons = generate_reasons(
            &ratios,
            plan.weights,
            candidate.experience_months,
            plan.rules,
            &notes,
        );

        tracing::debug!(
            "Scored candidate {}: base {}, adjusted {}, {} reasons",
            candidate.id,
            base_score,
            score,
            reasons.len()
        );

        Ok(Evaluated {
            result: MatchResult {
                candidate_id: candidate.id.clone(),
                name: candidate.name.clone(),
                score,
                reasons,
                eligible: None,
            },
            ratios,
        })
    }

    /// Normalize every listed reading; anomalies are recovered as zero or clamped
    /// and noted, as is a missing identifier
    fn normalize_candidate(
        &self,
        plan: &Plan<'_>,
        candidate: &CandidateProfile,
    ) -> (SkillRatios, Vec<DataQualityNote>) {
        let mut ratios = SkillRatios::new();
        let mut notes = Vec::new();

        if !candidate.has_identifier() {
            tracing::warn!("Candidate '{}' has no identifier, scoring it anyway", candidate.name);
            notes.push(DataQualityNote::MissingIdentifier);
        }

        for (skill, reading) in &candidate.skills {
            let weighted = plan.weights.contains_key(skill);
            let ratio = match normalize_with(reading, self.config.reading_scale) {
                Ok(ratio) => ratio,
                Err(e) => {
                    tracing::warn!("Candidate {}: {} for skill {}, scoring as 0", candidate.id, e, skill);
                    if weighted {
                        notes.push(DataQualityNote::Unreadable {
                            skill: skill.clone(),
                            raw: reading_text(reading),
                        });
                    }
                    0.0
                }
            };

            let normalized = NormalizedSkill::clamped(ratio);
            if normalized.ratio() != ratio {
                tracing::warn!("Candidate {}: skill {} ratio {} clamped to {}", candidate.id, skill, ratio, normalized.ratio());
                if weighted {
                    notes.push(DataQualityNote::OutOfRange {
                        skill: skill.clone(),
                        ratio,
                        clamped: normalized.ratio(),
                    });
                }
            }

            ratios.insert(skill.clone(), normalized);
        }

        (ratios, notes)
    }
}

/// Total order over results: score descending, then identifier ascending
pub fn compare_results(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.candidate_id.cmp(&b.candidate_id))
}

/// Minimums are read on the same scale as skill readings
fn resolve_minimums(
    minimums: &BTreeMap<String, f64>,
    scale: ReadingScale,
) -> Result<BTreeMap<&str, f64>, MatchError> {
    minimums
        .iter()
        .map(|(skill, &value)| {
            if value.is_finite() {
                Ok((skill.as_str(), rescale(value, scale)))
            } else {
                Err(MatchError::from(ConfigIssue::InvalidMinimum {
                    skill: skill.clone(),
                    value,
                }))
            }
        })
        .collect()
}

fn meets_minimums(ratios: &SkillRatios, minimums: &BTreeMap<&str, f64>) -> bool {
    minimums
        .iter()
        .all(|(skill, &minimum)| ratio_of(ratios, skill) >= minimum)
}

#[inline]
fn ratio_of(ratios: &SkillRatios, skill: &str) -> f64 {
    ratios.get(skill).map_or(0.0, |ratio| ratio.ratio())
}

fn reading_text(reading: &SkillReading) -> String {
    match reading {
        SkillReading::Number(value) => value.to_string(),
        SkillReading::Text(text) => text.clone(),
        SkillReading::Absent => String::new(),
    }
}
