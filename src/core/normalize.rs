use thiserror::Error;

use crate::config::ReadingScale;
use crate::models::SkillReading;

/// Numeric readings above this are taken as percentages
pub const PERCENT_CUTOFF: f64 = 1.1;

/// A skill reading that could not be interpreted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizationError {
    #[error("unparsable skill reading '{0}'")]
    Unparsable(String),

    #[error("non-finite skill reading")]
    NonFinite,
}

/// Normalize a raw reading into a ratio using the default scale
///
/// Absent readings yield `0.0`. The result is not clamped; see
/// [`NormalizedSkill::clamped`](crate::models::NormalizedSkill::clamped).
pub fn normalize(raw: &SkillReading) -> Result<f64, NormalizationError> {
    normalize_with(raw, ReadingScale::Auto)
}

/// Normalize a raw reading on the given scale
pub fn normalize_with(raw: &SkillReading, scale: ReadingScale) -> Result<f64, NormalizationError> {
    let value = match raw {
        SkillReading::Absent => return Ok(0.0),
        SkillReading::Number(value) => *value,
        SkillReading::Text(text) => parse_text(text)?,
    };

    if !value.is_finite() {
        return Err(NormalizationError::NonFinite);
    }

    Ok(rescale(value, scale))
}

/// Apply the scale rule to a plain number
#[inline]
pub fn rescale(value: f64, scale: ReadingScale) -> f64 {
    match scale {
        ReadingScale::Auto if value > PERCENT_CUTOFF => value / 100.0,
        ReadingScale::Auto => value,
        ReadingScale::Levels { max } => value / max,
    }
}

fn parse_text(text: &str) -> Result<f64, NormalizationError> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();

    trimmed
        .parse::<f64>()
        .map_err(|_| NormalizationError::Unparsable(text.to_string()))
}
