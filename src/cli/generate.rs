//! Default command: interactive Q&A followed by document generation

use super::print_api_hints;
use crate::config::{validate_question_count, ConfigStore, Stage, VibedocConfig};
use crate::models::DocumentKind;
use crate::orchestrator::OpenAiClient;
use crate::pipeline::{DirectorySink, DocumentPipeline, PipelineOptions};
use crate::session::QaSession;
use crate::ui::{colors, TerminalPrompter};
use crate::Result;
use colored::Colorize;
use tracing::info;

/// Flags of the default command
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub verbose: bool,
    pub skip_trd: bool,
    pub skip_todo: bool,
    pub questions: Option<u32>,
}

impl GenerateOptions {
    /// Merge with `app.*` config defaults
    ///
    /// Boolean flags are OR'd with their config counterparts; an explicit
    /// question count wins over `app.default_questions`.
    pub fn resolve(&self, config: &VibedocConfig) -> Result<ResolvedOptions> {
        let questions = validate_question_count(self.questions.unwrap_or(config.app.default_questions))?;
        Ok(ResolvedOptions {
            verbose: self.verbose || config.app.verbose,
            pipeline: PipelineOptions {
                skip_trd: self.skip_trd || config.app.skip_trd,
                skip_todo: self.skip_todo || config.app.skip_todo,
                show_progress: true,
            },
            questions,
        })
    }
}

/// An error already shown to the user together with its hints
///
/// `main` exits non-zero on it without printing the message again.
#[derive(Debug, thiserror::Error)]
#[error("{0:#}")]
pub struct Reported(pub anyhow::Error);

/// Whether `error` was already printed by the command that raised it
pub fn is_reported(error: &anyhow::Error) -> bool {
    error.downcast_ref::<Reported>().is_some()
}

/// What the user can still do by hand after a stage failed
pub fn failure_hint(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Prd => "수집된 정보를 바탕으로 수동으로 PRD를 작성해 주세요.",
        DocumentKind::Trd => "PRD 문서는 성공적으로 생성되었으니 수동으로 TRD를 작성해 주세요.",
        DocumentKind::Todo => "PRD, TRD 문서는 성공적으로 생성되었으니 수동으로 TODO 목록을 작성해 주세요.",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub verbose: bool,
    pub pipeline: PipelineOptions,
    pub questions: u32,
}

pub async fn run(options: GenerateOptions) -> Result<()> {
    let store = ConfigStore::default_location()?;
    let config = store.effective();

    if config.openai.api_key.trim().is_empty() {
        eprintln!("{}", "❌ OpenAI API 키가 설정되지 않았습니다.".red());
        eprintln!("{}", "💡 다음 방법 중 하나로 API 키를 설정해주세요:".yellow());
        eprintln!("{}", "   1. vibedoc config set openai.api_key sk-...".dimmed());
        eprintln!("{}", "   2. 환경변수: export OPENAI_API_KEY=sk-...".dimmed());
        anyhow::bail!("OpenAI API key is not configured");
    }

    let resolved = options.resolve(&config)?;

    println!("{}", colors::lavender("🚀 VibeDOC - Vibe Document Generator").bold());
    println!(
        "{}",
        colors::light_purple("쉽게 PRD, TRD, TODO List를 만들 수 있는 문서 생성 도구\n")
    );

    if resolved.verbose {
        print_verbose_info(&store, &config, resolved.questions)?;
    }

    println!("{}", colors::BANNER);
    println!();

    let client = OpenAiClient::new(config.openai.api_key.clone(), config.openai.base_url.clone())?;
    let prompter = TerminalPrompter::default();

    let mut session = QaSession::new(&prompter, &client, &store, resolved.questions)?;
    let transcript = match session.run().await {
        Ok(transcript) => transcript,
        Err(e) => {
            eprintln!("{} {:#}", "❌ 프로세스 중 오류가 발생했습니다:".red(), e);
            print_api_hints();
            return Err(Reported(e).into());
        }
    };
    info!(exchanges = transcript.len(), "transcript confirmed");

    let sink = DirectorySink::current_dir()?;
    let pipeline = DocumentPipeline::new(&client, &store, &sink, resolved.pipeline);

    let report = match pipeline.run(&transcript).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", colors::pink(&format!("❌ {:#}", e)));
            eprintln!("{}", "\n❌ PRD 문서 생성에 실패했습니다.".red());
            eprintln!("{}", failure_hint(DocumentKind::Prd).dimmed());
            print_api_hints();
            return Err(Reported(e).into());
        }
    };

    report.print_summary();

    if let Some(failure) = &report.failure {
        eprintln!(
            "{}{}",
            colors::pink(&format!("❌ {} 생성 중 오류가 발생했습니다: ", failure.kind)),
            failure.message
        );
        eprintln!("{}", colors::light_purple(failure_hint(failure.kind)));
        return Err(Reported(anyhow::anyhow!("{} generation failed", failure.kind)).into());
    }

    Ok(())
}

fn print_verbose_info(store: &ConfigStore, config: &VibedocConfig, questions: u32) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let models = [Stage::Prd, Stage::Trd, Stage::Todo]
        .iter()
        .map(|stage| format!("{}({})", stage.key().to_uppercase(), config.openai.stage(*stage).model))
        .collect::<Vec<_>>()
        .join(", ");

    println!("{}", "🔧 상세 출력 모드가 활성화되었습니다.".dimmed());
    println!("{}", format!("📍 현재 작업 디렉토리: {}", cwd.display()).dimmed());
    println!("{}", format!("📁 설정 파일: {}", store.path().display()).dimmed());
    println!("{}", format!("❓ 설정된 질문 횟수: {}개", questions).dimmed());
    println!("{}", format!("🤖 사용 모델: {}\n", models).dimmed());
    Ok(())
}
