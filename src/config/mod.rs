//! Configuration model
//!
//! Defaults < persisted file (`~/.vibedoc.toml`) < `OPENAI_*` environment
//! variables. Each generation stage carries its own model, verbosity and
//! reasoning effort.

pub mod store;

pub use store::{ConfigError, ConfigStore};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower and upper bound for the number of questions in a session
pub const MIN_QUESTIONS: u32 = 1;
pub const MAX_QUESTIONS: u32 = 50;

/// Response length hint forwarded to the completion API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Low,
    Medium,
    High,
}

impl Verbosity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Low => "low",
            Verbosity::Medium => "medium",
            Verbosity::High => "high",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verbosity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Verbosity::Low),
            "medium" => Ok(Verbosity::Medium),
            "high" => Ok(Verbosity::High),
            other => anyhow::bail!("Unknown verbosity '{}' (expected low, medium, high)", other),
        }
    }
}

/// Reasoning depth forwarded to the completion API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Minimal,
    Low,
    Medium,
    High,
}

impl ReasoningEffort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningEffort::Minimal => "minimal",
            ReasoningEffort::Low => "low",
            ReasoningEffort::Medium => "medium",
            ReasoningEffort::High => "high",
        }
    }
}

impl fmt::Display for ReasoningEffort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReasoningEffort {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minimal" => Ok(ReasoningEffort::Minimal),
            "low" => Ok(ReasoningEffort::Low),
            "medium" => Ok(ReasoningEffort::Medium),
            "high" => Ok(ReasoningEffort::High),
            other => anyhow::bail!(
                "Unknown reasoning effort '{}' (expected minimal, low, medium, high)",
                other
            ),
        }
    }
}

/// A generation step that calls the completion API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Question,
    Prd,
    Trd,
    Todo,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Question, Stage::Prd, Stage::Trd, Stage::Todo];

    /// Prefix used by config keys and environment variables
    pub fn key(&self) -> &'static str {
        match self {
            Stage::Question => "question",
            Stage::Prd => "prd",
            Stage::Trd => "trd",
            Stage::Todo => "todo",
        }
    }
}

/// Per-call parameters for one stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSettings {
    pub model: String,
    pub verbosity: Verbosity,
    pub reasoning_effort: ReasoningEffort,
}

/// Named preset applied uniformly to every stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Fast and economical
    Cheap,
    /// High quality, higher cost
    Expensive,
    /// Anything that matches neither preset
    Custom,
}

impl Mode {
    /// Stage settings for a preset, `None` for custom
    pub fn preset(&self) -> Option<StageSettings> {
        match self {
            Mode::Cheap => Some(StageSettings {
                model: "gpt-5-mini".to_string(),
                verbosity: Verbosity::Low,
                reasoning_effort: ReasoningEffort::Minimal,
            }),
            Mode::Expensive => Some(StageSettings {
                model: "gpt-5".to_string(),
                verbosity: Verbosity::High,
                reasoning_effort: ReasoningEffort::High,
            }),
            Mode::Custom => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Cheap => "cheap",
            Mode::Expensive => "expensive",
            Mode::Custom => "custom",
        };
        f.write_str(s)
    }
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cheap" => Ok(Mode::Cheap),
            "expensive" => Ok(Mode::Expensive),
            other => anyhow::bail!("Unknown mode '{}' (expected cheap, expensive)", other),
        }
    }
}

/// Completion API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,

    pub question_model: String,
    pub prd_model: String,
    pub trd_model: String,
    pub todo_model: String,

    pub question_verbosity: Verbosity,
    pub prd_verbosity: Verbosity,
    pub trd_verbosity: Verbosity,
    pub todo_verbosity: Verbosity,

    pub question_reasoning_effort: ReasoningEffort,
    pub prd_reasoning_effort: ReasoningEffort,
    pub trd_reasoning_effort: ReasoningEffort,
    pub todo_reasoning_effort: ReasoningEffort,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com".to_string(),
            question_model: "gpt-5".to_string(),
            prd_model: "gpt-5".to_string(),
            trd_model: "gpt-5".to_string(),
            todo_model: "gpt-5".to_string(),
            question_verbosity: Verbosity::Low,
            prd_verbosity: Verbosity::Medium,
            trd_verbosity: Verbosity::Medium,
            todo_verbosity: Verbosity::Medium,
            question_reasoning_effort: ReasoningEffort::Minimal,
            prd_reasoning_effort: ReasoningEffort::Medium,
            trd_reasoning_effort: ReasoningEffort::Medium,
            todo_reasoning_effort: ReasoningEffort::Medium,
        }
    }
}

impl OpenAiConfig {
    /// Settings for one stage
    pub fn stage(&self, stage: Stage) -> StageSettings {
        let (model, verbosity, reasoning_effort) = match stage {
            Stage::Question => (
                &self.question_model,
                self.question_verbosity,
                self.question_reasoning_effort,
            ),
            Stage::Prd => (&self.prd_model, self.prd_verbosity, self.prd_reasoning_effort),
            Stage::Trd => (&self.trd_model, self.trd_verbosity, self.trd_reasoning_effort),
            Stage::Todo => (&self.todo_model, self.todo_verbosity, self.todo_reasoning_effort),
        };
        StageSettings {
            model: model.clone(),
            verbosity,
            reasoning_effort,
        }
    }

    /// Overwrite the settings for one stage
    pub fn set_stage(&mut self, stage: Stage, settings: StageSettings) {
        let StageSettings {
            model,
            verbosity,
            reasoning_effort,
        } = settings;
        match stage {
            Stage::Question => {
                self.question_model = model;
                self.question_verbosity = verbosity;
                self.question_reasoning_effort = reasoning_effort;
            }
            Stage::Prd => {
                self.prd_model = model;
                self.prd_verbosity = verbosity;
                self.prd_reasoning_effort = reasoning_effort;
            }
            Stage::Trd => {
                self.trd_model = model;
                self.trd_verbosity = verbosity;
                self.trd_reasoning_effort = reasoning_effort;
            }
            Stage::Todo => {
                self.todo_model = model;
                self.todo_verbosity = verbosity;
                self.todo_reasoning_effort = reasoning_effort;
            }
        }
    }
}

/// Application behaviour defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub default_questions: u32,
    pub verbose: bool,
    pub skip_trd: bool,
    pub skip_todo: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_questions: 10,
            verbose: false,
            skip_trd: false,
            skip_todo: false,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VibedocConfig {
    pub openai: OpenAiConfig,
    pub app: AppConfig,
}

impl VibedocConfig {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_question_count(self.app.default_questions)?;
        Ok(())
    }

    /// Apply a preset to every stage; `Custom` leaves the config untouched
    pub fn apply_mode(&mut self, mode: Mode) {
        if let Some(settings) = mode.preset() {
            for stage in Stage::ALL {
                self.openai.set_stage(stage, settings.clone());
            }
        }
    }

    /// Classify the current stage settings against the presets
    pub fn current_mode(&self) -> Mode {
        let stages: Vec<StageSettings> = Stage::ALL.iter().map(|s| self.openai.stage(*s)).collect();
        for mode in [Mode::Cheap, Mode::Expensive] {
            if let Some(preset) = mode.preset() {
                if stages.iter().all(|s| *s == preset) {
                    return mode;
                }
            }
        }
        Mode::Custom
    }
}

/// Validate a question count against the accepted range
pub fn validate_question_count(count: u32) -> Result<u32, ConfigError> {
    if (MIN_QUESTIONS..=MAX_QUESTIONS).contains(&count) {
        Ok(count)
    } else {
        Err(ConfigError::QuestionCount(count))
    }
}

/// Source of per-stage settings, resolved on every call
pub trait SettingsSource: Send + Sync {
    fn stage_settings(&self, stage: Stage) -> StageSettings;
}

impl SettingsSource for VibedocConfig {
    fn stage_settings(&self, stage: Stage) -> StageSettings {
        self.openai.stage(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VibedocConfig::default();
        assert_eq!(config.app.default_questions, 10);
        assert_eq!(config.openai.stage(Stage::Question).verbosity, Verbosity::Low);
        assert_eq!(
            config.openai.stage(Stage::Question).reasoning_effort,
            ReasoningEffort::Minimal
        );
        assert_eq!(config.openai.stage(Stage::Prd).verbosity, Verbosity::Medium);
        assert_eq!(config.current_mode(), Mode::Custom);
    }

    #[test]
    fn test_apply_mode_roundtrips_to_current_mode() {
        let mut config = VibedocConfig::default();

        config.apply_mode(Mode::Cheap);
        assert_eq!(config.current_mode(), Mode::Cheap);
        assert_eq!(config.openai.todo_model, "gpt-5-mini");

        config.apply_mode(Mode::Expensive);
        assert_eq!(config.current_mode(), Mode::Expensive);
        assert_eq!(config.openai.question_reasoning_effort, ReasoningEffort::High);

        config.openai.trd_verbosity = Verbosity::Low;
        assert_eq!(config.current_mode(), Mode::Custom);
    }

    #[test]
    fn test_question_count_range() {
        assert!(validate_question_count(0).is_err());
        assert_eq!(validate_question_count(1).unwrap(), 1);
        assert_eq!(validate_question_count(50).unwrap(), 50);
        assert!(validate_question_count(51).is_err());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("HIGH".parse::<Verbosity>().unwrap(), Verbosity::High);
        assert_eq!("minimal".parse::<ReasoningEffort>().unwrap(), ReasoningEffort::Minimal);
        assert!("extreme".parse::<Verbosity>().is_err());
        assert!("status".parse::<Mode>().is_err());
    }
}
