//! Persisted configuration file and environment overrides

use super::{
    validate_question_count, Mode, ReasoningEffort, SettingsSource, Stage, StageSettings, Verbosity,
    VibedocConfig,
};
use colored::Colorize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const CONFIG_FILE_NAME: &str = ".vibedoc.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot find home directory")]
    NoHomeDir,

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Question count must be between 1 and 50 (got {0})")]
    QuestionCount(u32),
}

/// Reads and writes `~/.vibedoc.toml`
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store at the default location in the user's home directory
    pub fn default_location() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::at(home.join(CONFIG_FILE_NAME)))
    }

    /// Store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted config, failing on malformed content
    pub fn try_load(&self) -> Result<VibedocConfig, ConfigError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "config file missing, using defaults");
            return Ok(VibedocConfig::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        let config: VibedocConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the persisted config, falling back to defaults with a warning
    pub fn load(&self) -> VibedocConfig {
        match self.try_load() {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "falling back to default config");
                eprintln!("{} {}", "❌ 설정 파일 로드 중 오류:".red(), e);
                eprintln!("{}", "💡 기본 설정을 사용합니다.".yellow());
                VibedocConfig::default()
            }
        }
    }

    /// Validate and write the config
    pub fn save(&self, config: &VibedocConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.path, content).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    /// Persisted config with `OPENAI_*` environment overrides applied
    pub fn effective(&self) -> VibedocConfig {
        self.effective_with(|name| std::env::var(name).ok())
    }

    /// Same as [`ConfigStore::effective`] with an injectable environment lookup
    pub fn effective_with<F>(&self, env: F) -> VibedocConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.load();
        apply_env_overrides(&mut config, env);
        config
    }

    /// Read one value by dotted key from the persisted config
    pub fn get(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        let value = to_json(&self.load())?;
        Ok(lookup(&value, key).cloned())
    }

    /// Set one value by dotted key and persist it
    ///
    /// `true`/`false` and numbers are coerced first; if the field rejects the
    /// coerced value the raw string is tried instead.
    pub fn set(&self, key: &str, raw: &str) -> Result<Value, ConfigError> {
        if !available_keys().iter().any(|k| k == key) {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let current = to_json(&self.load())?;
        let coerced = coerce(raw);

        let as_string = Value::String(raw.to_string());
        let (config, stored) = match with_value(&current, key, coerced.clone()) {
            Ok(config) => (config, coerced),
            Err(ConfigError::InvalidValue { .. }) if coerced != as_string => {
                (with_value(&current, key, as_string.clone())?, as_string)
            }
            Err(e) => return Err(e),
        };

        self.save(&config)?;
        Ok(stored)
    }

    /// Overwrite the file with defaults
    pub fn reset(&self) -> Result<(), ConfigError> {
        self.save(&VibedocConfig::default())
    }

    /// Apply a preset to every stage and persist it
    pub fn apply_mode(&self, mode: Mode) -> Result<(), ConfigError> {
        let mut config = self.load();
        config.apply_mode(mode);
        self.save(&config)
    }

    pub fn current_mode(&self) -> Mode {
        self.load().current_mode()
    }
}

impl SettingsSource for ConfigStore {
    fn stage_settings(&self, stage: Stage) -> StageSettings {
        self.effective().openai.stage(stage)
    }
}

/// Every settable dotted key, derived from the config layout
pub fn available_keys() -> Vec<String> {
    let mut keys = Vec::new();
    if let Ok(Value::Object(sections)) = serde_json::to_value(VibedocConfig::default()) {
        for (section, fields) in sections {
            if let Value::Object(fields) = fields {
                for field in fields.keys() {
                    keys.push(format!("{}.{}", section, field));
                }
            }
        }
    }
    keys
}

fn apply_env_overrides<F>(config: &mut VibedocConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| env(name).filter(|v| !v.is_empty());

    if let Some(key) = non_empty("OPENAI_API_KEY") {
        config.openai.api_key = key;
    }
    if let Some(url) = non_empty("OPENAI_BASE_URL") {
        config.openai.base_url = url;
    }

    for stage in Stage::ALL {
        let prefix = format!("OPENAI_{}", stage.key().to_uppercase());
        let mut settings = config.openai.stage(stage);

        if let Some(model) = non_empty(&format!("{}_MODEL", prefix)) {
            settings.model = model;
        }
        if let Some(raw) = non_empty(&format!("{}_VERBOSITY", prefix)) {
            match raw.parse::<Verbosity>() {
                Ok(v) => settings.verbosity = v,
                Err(e) => warn!(stage = stage.key(), error = %e, "ignoring verbosity override"),
            }
        }
        if let Some(raw) = non_empty(&format!("{}_REASONING_EFFORT", prefix)) {
            match raw.parse::<ReasoningEffort>() {
                Ok(v) => settings.reasoning_effort = v,
                Err(e) => warn!(stage = stage.key(), error = %e, "ignoring reasoning effort override"),
            }
        }

        config.openai.set_stage(stage, settings);
    }
}

fn to_json(config: &VibedocConfig) -> Result<Value, ConfigError> {
    serde_json::to_value(config).map_err(|e| ConfigError::InvalidValue {
        key: "<root>".to_string(),
        message: e.to_string(),
    })
}

fn lookup<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(value, |current, part| current.get(part))
}

/// Produce a new config with `key` replaced by `new_value`
fn with_value(base: &Value, key: &str, new_value: Value) -> Result<VibedocConfig, ConfigError> {
    let mut root = base.clone();
    let mut current = &mut root;
    for part in key.split('.') {
        current = current
            .get_mut(part)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
    }
    *current = new_value;

    let config: VibedocConfig =
        serde_json::from_value(root).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;

    if key == "app.default_questions" {
        validate_question_count(config.app.default_questions)?;
    }
    Ok(config)
}

fn coerce(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => {
            if let Ok(n) = raw.parse::<u64>() {
                Value::from(n)
            } else if let Ok(f) = raw.parse::<f64>() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(raw.to_string()))
            } else {
                Value::String(raw.to_string())
            }
        }
    }
}
