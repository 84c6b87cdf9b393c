use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use validator::Validate;

/// Raw skill-level reading as supplied by the caller
///
/// Accepts a JSON number (`0.85`, `85`), a JSON string (`"85%"`, `" 0.9 "`)
/// or `null`. Any other JSON value is kept as its text and later reported
/// as unreadable. Normalization into a ratio happens in `core::normalize`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SkillReading {
    Number(f64),
    Text(String),
    #[default]
    Absent,
}

impl<'de> Deserialize<'de> for SkillReading {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => SkillReading::Absent,
            Value::Number(n) => n
                .as_f64()
                .map_or_else(|| SkillReading::Text(n.to_string()), SkillReading::Number),
            Value::String(text) => SkillReading::Text(text),
            other => SkillReading::Text(other.to_string()),
        })
    }
}

impl From<f64> for SkillReading {
    fn from(value: f64) -> Self {
        SkillReading::Number(value)
    }
}

impl From<&str> for SkillReading {
    fn from(value: &str) -> Self {
        SkillReading::Text(value.to_string())
    }
}

/// A skill proficiency expressed as a ratio in [0,1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedSkill(f64);

impl NormalizedSkill {
    pub const ZERO: NormalizedSkill = NormalizedSkill(0.0);

    /// Clamp an arbitrary ratio into [0,1]; non-finite values become zero
    pub fn clamped(ratio: f64) -> Self {
        if ratio.is_finite() {
            Self(ratio.clamp(0.0, 1.0))
        } else {
            Self::ZERO
        }
    }

    pub fn ratio(self) -> f64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

/// Competencies a project or workspace needs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequirementProfile {
    /// Workspace or project name, echoed in filter-mode responses
    #[serde(default)]
    pub name: Option<String>,
    /// Skill name -> importance weight
    #[serde(default, alias = "required_skills", rename = "weights")]
    pub weights: BTreeMap<String, f64>,
    /// Skill name -> minimum ratio used by filter mode
    #[serde(default)]
    pub thresholds: BTreeMap<String, f64>,
    #[serde(default, alias = "min_exp", rename = "minExperienceMonths")]
    pub min_experience_months: Option<f64>,
}

impl RequirementProfile {
    pub fn with_weights<I, S>(weights: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            weights: weights.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            ..Self::default()
        }
    }
}

/// A candidate (student, applicant) to be matched
///
/// Deserialization never rejects a row for a bad field: unusable values
/// fall back to their defaults with a warning, and the engine flags what
/// it recovered.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CandidateProfile {
    #[validate(length(min = 1))]
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_skills")]
    pub skills: BTreeMap<String, SkillReading>,
    #[serde(
        default,
        alias = "experience",
        rename = "experienceMonths",
        deserialize_with = "lenient_months"
    )]
    pub experience_months: u32,
}

impl CandidateProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skills: BTreeMap::new(),
            experience_months: 0,
        }
    }

    pub fn with_skill(mut self, skill: impl Into<String>, reading: impl Into<SkillReading>) -> Self {
        self.skills.insert(skill.into(), reading.into());
        self
    }

    pub fn with_experience(mut self, months: u32) -> Self {
        self.experience_months = months;
        self
    }

    /// Whether the candidate carries a usable identifier
    pub fn has_identifier(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id,
        Value::Number(id) => id.to_string(),
        other => {
            tracing::warn!("Unusable candidate id {}, leaving it empty", other);
            String::new()
        }
    })
}

fn lenient_skills<'de, D>(deserializer: D) -> Result<BTreeMap<String, SkillReading>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(skills) => skills
            .into_iter()
            .map(|(skill, raw)| {
                SkillReading::deserialize(raw)
                    .map(|reading| (skill, reading))
                    .map_err(<D::Error as de::Error>::custom)
            })
            .collect(),
        Value::Null => Ok(BTreeMap::new()),
        other => {
            tracing::warn!("Candidate skills must be an object, got {}; treating as no skills", other);
            Ok(BTreeMap::new())
        }
    }
}

fn lenient_months<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    Ok(months_from_value(&raw).unwrap_or_else(|| {
        tracing::warn!("Unusable experience value {}, defaulting to 0 months", raw);
        0
    }))
}

/// Whole, non-negative month counts; numeric strings are accepted
fn months_from_value(raw: &Value) -> Option<u32> {
    match raw {
        Value::Number(n) => match n.as_u64() {
            Some(months) => u32::try_from(months).ok(),
            None => n
                .as_f64()
                .filter(|m| m.is_finite() && *m >= 0.0 && m.fract() == 0.0 && *m <= f64::from(u32::MAX))
                .map(|m| m as u32),
        },
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Deserialize a candidate list row by row
///
/// A row that is not a candidate object at all carries no identity to
/// score against, so it is skipped with a warning instead of failing the
/// whole list.
pub(crate) fn lenient_candidates<'de, D>(deserializer: D) -> Result<Vec<CandidateProfile>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match CandidateProfile::deserialize(row) {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                tracing::warn!("Skipping candidate row {}: {}", index, e);
                None
            }
        })
        .collect())
}

/// Scored, explained outcome for one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    pub name: String,
    pub score: f64,
    pub reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligible: Option<bool>,
}

/// Filter-mode outcome: eligible results plus their count
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub results: Vec<MatchResult>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_reading_from_json() {
        let readings: Vec<SkillReading> =
            serde_json::from_str(r#"[0.9, 85, "70%", null]"#).unwrap();

        assert_eq!(readings[0], SkillReading::Number(0.9));
        assert_eq!(readings[1], SkillReading::Number(85.0));
        assert_eq!(readings[2], SkillReading::Text("70%".to_string()));
        assert_eq!(readings[3], SkillReading::Absent);
    }

    #[test]
    fn test_candidate_defaults() {
        let candidate: CandidateProfile =
            serde_json::from_str(r#"{"id": "c1"}"#).unwrap();

        assert_eq!(candidate.experience_months, 0);
        assert!(candidate.skills.is_empty());
        assert!(candidate.has_identifier());
    }

    #[test]
    fn test_candidate_recovers_bad_fields() {
        let candidate: CandidateProfile = serde_json::from_str(
            r#"{"id": 7, "name": null, "skills": {"rust": true, "go": [1]}, "experienceMonths": null}"#,
        )
        .unwrap();

        assert_eq!(candidate.id, "7");
        assert_eq!(candidate.name, "");
        assert_eq!(candidate.experience_months, 0);
        assert_eq!(candidate.skills["rust"], SkillReading::Text("true".to_string()));
        assert_eq!(candidate.skills["go"], SkillReading::Text("[1]".to_string()));
    }

    #[test]
    fn test_experience_accepts_whole_months_only() {
        let parse = |raw: &str| {
            serde_json::from_str::<CandidateProfile>(&format!(r#"{{"id": "c", "experience": {}}}"#, raw))
                .unwrap()
                .experience_months
        };

        assert_eq!(parse("30"), 30);
        assert_eq!(parse("30.0"), 30);
        assert_eq!(parse(r#"" 18 ""#), 18);
        assert_eq!(parse("12.5"), 0);
        assert_eq!(parse("-3"), 0);
        assert_eq!(parse(r#""a while""#), 0);
    }

    #[test]
    fn test_missing_or_blank_id_is_kept() {
        let candidate: CandidateProfile = serde_json::from_str(r#"{"skills": null}"#).unwrap();

        assert_eq!(candidate.id, "");
        assert!(!candidate.has_identifier());
        assert!(candidate.skills.is_empty());
    }

    #[test]
    fn test_requirement_accepts_legacy_field_names() {
        let requirement: RequirementProfile = serde_json::from_str(
            r#"{"required_skills": {"python": 5, "react": 3}, "min_exp": 12}"#,
        )
        .unwrap();

        assert_eq!(requirement.weights.get("python"), Some(&5.0));
        assert_eq!(requirement.min_experience_months, Some(12.0));
    }

    #[test]
    fn test_normalized_skill_clamps() {
        assert_eq!(NormalizedSkill::clamped(1.7).ratio(), 1.0);
        assert_eq!(NormalizedSkill::clamped(-0.2).ratio(), 0.0);
        assert_eq!(NormalizedSkill::clamped(f64::NAN).ratio(), 0.0);
        assert_eq!(NormalizedSkill::clamped(0.45).ratio(), 0.45);
    }
}
