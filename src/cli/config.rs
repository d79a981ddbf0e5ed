//! Config CLI commands

use crate::config::store::available_keys;
use crate::config::{ConfigError, ConfigStore, Mode};
use crate::ui::{Prompter, TerminalPrompter};
use crate::Result;
use clap::Subcommand;
use colored::Colorize;
use serde_json::Value;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// 설정값 변경 (예: openai.api_key, openai.prd_model)
    Set {
        /// 설정 키 (점 표기법 사용)
        key: String,

        /// 설정값
        value: String,
    },

    /// 설정값 조회 (키 생략 시 전체 설정 표시)
    Get {
        /// 설정 키
        key: Option<String>,
    },

    /// 사용 가능한 모든 설정 키와 설명 표시
    List,

    /// 성능/비용 모드 설정 (cheap: 빠르고 저렴, expensive: 고품질)
    Mode {
        /// 모드: cheap, expensive, status (기본값: status)
        mode: Option<String>,
    },

    /// 모든 설정을 기본값으로 초기화 (주의: 복구 불가)
    Reset {
        /// 확인 프롬프트 없이 강제 초기화
        #[arg(long)]
        force: bool,
    },
}

pub fn run(cmd: ConfigCommands) -> Result<()> {
    let store = ConfigStore::default_location()?;
    let prompter = TerminalPrompter::default();
    run_with(cmd, &store, &prompter)
}

/// Execute a config command against an explicit store
pub fn run_with(cmd: ConfigCommands, store: &ConfigStore, prompter: &dyn Prompter) -> Result<()> {
    match cmd {
        ConfigCommands::Set { key, value } => set(store, &key, &value),
        ConfigCommands::Get { key: Some(key) } => get_one(store, &key),
        ConfigCommands::Get { key: None } => get_all(store),
        ConfigCommands::List => {
            list();
            Ok(())
        }
        ConfigCommands::Mode { mode } => match mode.as_deref() {
            None | Some("status") => {
                mode_status(store.current_mode());
                Ok(())
            }
            Some(name) => set_mode(store, name),
        },
        ConfigCommands::Reset { force } => reset(store, prompter, force),
    }
}

fn set(store: &ConfigStore, key: &str, raw: &str) -> Result<()> {
    match store.set(key, raw) {
        Ok(value) => {
            println!("{}", format!("✅ {} = {}", key, display_value(&value)).green());
            Ok(())
        }
        Err(ConfigError::UnknownKey(key)) => {
            eprintln!("{}", format!("❌ 알 수 없는 설정 키: {}", key).red());
            println!("{}", "사용 가능한 키:".yellow());
            for k in available_keys() {
                println!("  {}", k);
            }
            anyhow::bail!("Unknown config key: {}", key)
        }
        Err(e) => Err(e.into()),
    }
}

fn get_one(store: &ConfigStore, key: &str) -> Result<()> {
    match store.get(key)? {
        Some(value) => {
            println!("{} {}", format!("{}:", key).cyan(), display_value(&value));
            Ok(())
        }
        None => {
            eprintln!("{}", format!("❌ 설정을 찾을 수 없습니다: {}", key).red());
            anyhow::bail!("Config key not found: {}", key)
        }
    }
}

fn get_all(store: &ConfigStore) -> Result<()> {
    let config = store.load();

    println!("{}", "🔧 현재 설정:\n".blue().bold());
    println!("{}", format!("설정 파일 위치: {}", store.path().display()).dimmed());
    println!("{}", format!("현재 모드: {}\n", mode_label(config.current_mode())).dimmed());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn list() {
    println!("{}", "📋 사용 가능한 설정 키:\n".blue().bold());

    let keys = available_keys();
    let width = keys.iter().map(|k| k.len()).max().unwrap_or(0);

    for (section, title) in [("openai.", "OpenAI 관련:"), ("app.", "앱 관련:")] {
        println!("{}", title.cyan());
        for key in keys.iter().filter(|k| k.starts_with(section)) {
            println!("  {:width$} # {}", key, describe_key(key), width = width);
        }
        println!();
    }

    println!("{}", "예시:".yellow());
    println!("  vibedoc config set openai.api_key sk-...");
    println!("  vibedoc config set openai.prd_model gpt-5-mini");
    println!("  vibedoc config set app.default_questions 15");
    println!("  vibedoc config get openai.prd_model");
    println!("  vibedoc config mode cheap              # 빠르고 경제적");
    println!("  vibedoc config mode expensive          # 고품질, 고비용");
}

fn mode_status(mode: Mode) {
    println!("{}", "📊 현재 설정 모드:\n".blue().bold());

    match mode.preset() {
        Some(preset) => {
            println!("{}", mode_label(mode).green());
            println!("{}", format!("  • Model: {}", preset.model).dimmed());
            println!("{}", format!("  • Verbosity: {}", preset.verbosity).dimmed());
            println!("{}", format!("  • Reasoning Effort: {}", preset.reasoning_effort).dimmed());
        }
        None => {
            println!("{}", mode_label(mode).yellow());
            println!("{}", "  • 개별 설정이 혼합되어 있습니다".dimmed());
        }
    }

    println!("{}", "\n사용 가능한 모드:".dimmed());
    for mode in [Mode::Cheap, Mode::Expensive] {
        if let Some(preset) = mode.preset() {
            println!(
                "{}{}",
                format!("  {:<11}", mode.to_string()).cyan(),
                format!(
                    "{} ({}, verbosity: {}, reasoning: {})",
                    mode_tagline(mode),
                    preset.model,
                    preset.verbosity,
                    preset.reasoning_effort
                )
                .dimmed()
            );
        }
    }
}

fn set_mode(store: &ConfigStore, name: &str) -> Result<()> {
    let mode: Mode = match name.parse() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("{}", format!("❌ 알 수 없는 모드: {}", name).red());
            println!("{}", "사용 가능한 모드: cheap, expensive, status".yellow());
            return Err(e);
        }
    };

    store.apply_mode(mode)?;

    println!("{}", format!("✅ {} 모드로 설정되었습니다", mode).green());
    if let Some(preset) = mode.preset() {
        println!("{}", format!("  • 모든 모델: {}", preset.model).dimmed());
        println!("{}", format!("  • 모든 verbosity: {}", preset.verbosity).dimmed());
        println!("{}", format!("  • 모든 reasoning effort: {}", preset.reasoning_effort).dimmed());
    }
    let tip = match mode {
        Mode::Expensive => "💡 고품질 문서 생성이 가능합니다 (시간과 비용이 더 소요됩니다)",
        _ => "💡 빠르고 경제적인 문서 생성이 가능합니다",
    };
    println!("{}", tip.yellow());
    Ok(())
}

fn reset(store: &ConfigStore, prompter: &dyn Prompter, force: bool) -> Result<()> {
    if !force {
        let confirmed = prompter.confirm(
            &"정말로 모든 설정을 기본값으로 초기화하시겠습니까?".red().to_string(),
            false,
        )?;
        if !confirmed {
            println!("{}", "취소되었습니다.".yellow());
            return Ok(());
        }
    }

    store.reset()?;
    println!("{}", "✅ 설정이 기본값으로 초기화되었습니다.".green());
    println!("{}", format!("설정 파일: {}", store.path().display()).dimmed());
    Ok(())
}

fn mode_label(mode: Mode) -> String {
    match mode {
        Mode::Cheap => "💰 cheap (빠르고 경제적)".to_string(),
        Mode::Expensive => "💎 expensive (고품질)".to_string(),
        Mode::Custom => "🔧 custom (사용자 정의)".to_string(),
    }
}

fn mode_tagline(mode: Mode) -> &'static str {
    match mode {
        Mode::Cheap => "빠르고 경제적",
        Mode::Expensive => "고품질, 고비용",
        Mode::Custom => "사용자 정의",
    }
}

fn describe_key(key: &str) -> String {
    let (section, field) = key.split_once('.').unwrap_or(("", key));
    match (section, field) {
        ("openai", "api_key") => "OpenAI API 키".to_string(),
        ("openai", "base_url") => "API 엔드포인트 (기본: https://api.openai.com)".to_string(),
        ("app", "default_questions") => "기본 질문 횟수".to_string(),
        ("app", "verbose") => "상세 출력 모드".to_string(),
        ("app", "skip_trd") => "TRD 생성 건너뛰기".to_string(),
        ("app", "skip_todo") => "TODO 생성 건너뛰기".to_string(),
        ("openai", field) => {
            let stage = field.split('_').next().unwrap_or_default();
            let stage = if stage == "question" {
                "질문".to_string()
            } else {
                stage.to_uppercase()
            };
            if field.ends_with("_model") {
                format!("{} 생성용 모델", stage)
            } else if field.ends_with("_verbosity") {
                format!("{} 생성 상세도", stage)
            } else {
                format!("{} 추론 노력도", stage)
            }
        }
        _ => String::new(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    struct FixedConfirm {
        answer: bool,
        asked: Cell<bool>,
    }

    impl Prompter for FixedConfirm {
        fn select(&self, _: &str, _: &[String], _: usize) -> Result<usize> {
            anyhow::bail!("unexpected select")
        }

        fn input(&self, _: &str, _: Option<&str>) -> Result<String> {
            anyhow::bail!("unexpected input")
        }

        fn confirm(&self, _: &str, default: bool) -> Result<bool> {
            assert!(!default);
            self.asked.set(true);
            Ok(self.answer)
        }
    }

    fn prompter(answer: bool) -> FixedConfirm {
        FixedConfirm {
            answer,
            asked: Cell::new(false),
        }
    }

    fn store(temp: &TempDir) -> ConfigStore {
        ConfigStore::at(temp.path().join(".vibedoc.toml"))
    }

    #[test]
    fn test_set_then_get() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);

        run_with(
            ConfigCommands::Set {
                key: "openai.prd_model".to_string(),
                value: "gpt-5-mini".to_string(),
            },
            &store,
            &prompter(false),
        )
        .unwrap();

        assert_eq!(
            store.get("openai.prd_model").unwrap(),
            Some(Value::String("gpt-5-mini".to_string()))
        );
        assert!(run_with(
            ConfigCommands::Get {
                key: Some("openai.prd_model".to_string())
            },
            &store,
            &prompter(false)
        )
        .is_ok());
    }

    #[test]
    fn test_set_unknown_key_fails() {
        let temp = TempDir::new().unwrap();
        let result = run_with(
            ConfigCommands::Set {
                key: "openai.nope".to_string(),
                value: "x".to_string(),
            },
            &store(&temp),
            &prompter(false),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_get_missing_key_fails() {
        let temp = TempDir::new().unwrap();
        let result = run_with(
            ConfigCommands::Get {
                key: Some("app.nope".to_string()),
            },
            &store(&temp),
            &prompter(false),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_mode_switches_presets() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);

        run_with(
            ConfigCommands::Mode {
                mode: Some("cheap".to_string()),
            },
            &store,
            &prompter(false),
        )
        .unwrap();
        assert_eq!(store.current_mode(), Mode::Cheap);

        let bad = run_with(
            ConfigCommands::Mode {
                mode: Some("turbo".to_string()),
            },
            &store,
            &prompter(false),
        );
        assert!(bad.is_err());
        assert_eq!(store.current_mode(), Mode::Cheap);
    }

    #[test]
    fn test_reset_declined_keeps_settings() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        store.set("app.default_questions", "5").unwrap();

        let declined = prompter(false);
        run_with(ConfigCommands::Reset { force: false }, &store, &declined).unwrap();

        assert!(declined.asked.get());
        assert_eq!(store.load().app.default_questions, 5);
    }

    #[test]
    fn test_reset_force_skips_prompt() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        store.set("app.default_questions", "5").unwrap();

        let unused = prompter(false);
        run_with(ConfigCommands::Reset { force: true }, &store, &unused).unwrap();

        assert!(!unused.asked.get());
        assert_eq!(store.load().app.default_questions, 10);
    }

    #[test]
    fn test_describe_key() {
        assert_eq!(describe_key("openai.question_model"), "질문 생성용 모델");
        assert_eq!(describe_key("openai.todo_reasoning_effort"), "TODO 추론 노력도");
        assert_eq!(describe_key("app.skip_trd"), "TRD 생성 건너뛰기");
    }
}
