use thiserror::Error;

/// Errors that abort a whole match batch
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigIssue),
}

/// The specific misconfiguration behind `MatchError::InvalidConfiguration`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigIssue {
    #[error("total weight is zero")]
    ZeroTotalWeight,

    #[error("weight for '{skill}' must be a finite, non-negative number (got {weight})")]
    InvalidWeight { skill: String, weight: f64 },

    #[error("minimum experience must be positive in multiplicative mode (got {0})")]
    NonPositiveMinExperience(f64),

    #[error("additive basis months must be positive (got {0})")]
    NonPositiveAdditiveBasis(f64),

    #[error("fairness cap must be a finite, non-negative number (got {0})")]
    InvalidFairnessCap(f64),

    #[error("mastery threshold must lie in [0, 1] (got {0})")]
    MasteryThresholdOutOfRange(f64),

    #[error("minimum for '{skill}' must be a finite number (got {value})")]
    InvalidMinimum { skill: String, value: f64 },

    #[error("level scale maximum must be positive (got {0})")]
    NonPositiveLevelScale(f64),
}

impl MatchError {
    /// Short machine-readable code for error payloads
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::InvalidConfiguration(_) => "invalid_configuration",
        }
    }
}
