use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchConfig,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Engine configuration, immutable for the duration of a match call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Fallback weights used when a requirement carries none
    #[serde(default = "default_weights")]
    pub weights: BTreeMap<String, f64>,
    #[serde(default = "default_mastery_threshold")]
    pub mastery_threshold: f64,
    #[serde(default = "default_min_experience_months")]
    pub min_experience_months: f64,
    #[serde(default)]
    pub fairness: FairnessPolicy,
    #[serde(default)]
    pub reading_scale: ReadingScale,
    /// Skill whose ratio orders filter-mode results
    #[serde(default)]
    pub primary_skill: Option<String>,
    /// Batch size from which candidates are scored on the rayon pool; 0 disables
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            weights: default_weights(),
            mastery_threshold: default_mastery_threshold(),
            min_experience_months: default_min_experience_months(),
            fairness: FairnessPolicy::default(),
            reading_scale: ReadingScale::default(),
            primary_skill: None,
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl MatchConfig {
    pub fn with_fairness(mut self, fairness: FairnessPolicy) -> Self {
        self.fairness = fairness;
        self
    }

    pub fn with_primary_skill(mut self, skill: impl Into<String>) -> Self {
        self.primary_skill = Some(skill.into());
        self
    }
}

/// How experience adjusts the weighted score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FairnessMode {
    /// `score * min(months / min_months, multiplier_cap)`
    #[default]
    Multiplicative,
    /// `score + min(months / basis_months, boost_cap) * 100`
    Additive,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FairnessPolicy {
    #[serde(default)]
    pub mode: FairnessMode,
    #[serde(default = "default_multiplier_cap")]
    pub multiplier_cap: f64,
    #[serde(default = "default_additive_basis_months")]
    pub additive_basis_months: f64,
    #[serde(default = "default_additive_cap")]
    pub additive_cap: f64,
}

impl Default for FairnessPolicy {
    fn default() -> Self {
        Self {
            mode: FairnessMode::default(),
            multiplier_cap: default_multiplier_cap(),
            additive_basis_months: default_additive_basis_months(),
            additive_cap: default_additive_cap(),
        }
    }
}

impl FairnessPolicy {
    pub fn multiplicative() -> Self {
        Self::default()
    }

    pub fn additive() -> Self {
        Self {
            mode: FairnessMode::Additive,
            ..Self::default()
        }
    }
}

/// Scale on which numeric skill readings are expressed
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum ReadingScale {
    /// Values above 1.1 are percentages, everything else is a ratio
    #[default]
    Auto,
    /// Proficiency levels from 0 to `max` (e.g. 1..=5)
    Levels { max: f64 },
}

fn default_weights() -> BTreeMap<String, f64> {
    BTreeMap::from([("python".to_string(), 5.0), ("react".to_string(), 4.0)])
}
fn default_mastery_threshold() -> f64 { 0.8 }
fn default_min_experience_months() -> f64 { 24.0 }
fn default_multiplier_cap() -> f64 { 1.1 }
fn default_additive_basis_months() -> f64 { 24.0 }
fn default_additive_cap() -> f64 { 0.1 }
fn default_parallel_threshold() -> usize { 512 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local override file (config/local.toml)
    /// 4. Environment variables (prefixed with COMPETENCY__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., COMPETENCY__MATCHING__MASTERY_THRESHOLD -> matching.mastery_threshold
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("COMPETENCY")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
