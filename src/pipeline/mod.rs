//! Document pipeline
//!
//! PRD from the confirmed transcript, TRD from the PRD, structured TODO from
//! the TRD. Strictly linear: a stage never runs when the stage feeding it
//! failed or was skipped. Stage settings are resolved at call time.

pub mod render;
pub mod sink;

pub use render::render_todo_markdown;
pub use sink::{ArtifactSink, DirectorySink};

use crate::config::{SettingsSource, Stage};
use crate::models::{DocumentKind, TodoDocument, Transcript};
use crate::orchestrator::prompts::{PRD_SYSTEM_PROMPT, TODO_SYSTEM_PROMPT, TRD_SYSTEM_PROMPT};
use crate::orchestrator::{complete_structured, ChatMessage, CompletionClient, CompletionRequest};
use crate::ui::{colors, Spinner};
use crate::validator::{todo_schema, TODO_SCHEMA_NAME};
use crate::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub skip_trd: bool,
    pub skip_todo: bool,
    pub show_progress: bool,
}

impl PipelineOptions {
    /// TODO needs TRD output, so skipping TRD skips TODO too
    pub fn skips_todo(&self) -> bool {
        self.skip_trd || self.skip_todo
    }
}

/// Where a produced document ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactLocation {
    Persisted(PathBuf),
    /// Writing failed; the content was printed to the terminal instead
    PrintedOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: DocumentKind,
    pub location: ArtifactLocation,
}

/// A stage after PRD that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    pub kind: DocumentKind,
    pub message: String,
}

/// Outcome of a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub artifacts: Vec<Artifact>,
    pub failure: Option<StageFailure>,
}

impl PipelineReport {
    pub fn kinds(&self) -> Vec<DocumentKind> {
        self.artifacts.iter().map(|a| a.kind).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Print the closing list of produced files
    pub fn print_summary(&self) {
        if self.artifacts.is_empty() {
            return;
        }

        let all = self.artifacts.len() == 3;
        let headline = if all {
            "\n🎉 전체 문서 생성이 완료되었습니다!"
        } else {
            "\n🎉 문서 생성이 완료되었습니다!"
        };
        println!("{}", colors::mint(headline).bold());
        println!("{}", colors::light_purple("생성된 파일들:"));

        for artifact in &self.artifacts {
            let name = match &artifact.location {
                ArtifactLocation::Persisted(_) => artifact.kind.file_name().to_string(),
                ArtifactLocation::PrintedOnly => format!("{} (터미널 출력)", artifact.kind.file_name()),
            };
            println!(
                "{}{}",
                colors::blue(&format!("  • {}", name)),
                colors::light_purple(&format!(" - {}", artifact.kind.label()))
            );
        }

        if all && self.is_complete() {
            println!("{}", colors::peach("✨ 이제 바이브코딩을 시작할 준비가 되었습니다!"));
        }
    }
}

pub struct DocumentPipeline<'a> {
    client: &'a dyn CompletionClient,
    settings: &'a dyn SettingsSource,
    sink: &'a dyn ArtifactSink,
    options: PipelineOptions,
}

impl<'a> DocumentPipeline<'a> {
    pub fn new(
        client: &'a dyn CompletionClient,
        settings: &'a dyn SettingsSource,
        sink: &'a dyn ArtifactSink,
        options: PipelineOptions,
    ) -> Self {
        Self {
            client,
            settings,
            sink,
            options,
        }
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Run every enabled stage
    ///
    /// A PRD failure is returned as an error. Later failures are recorded in
    /// the report next to the artifacts already produced.
    pub async fn run(&self, transcript: &Transcript) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();

        let prd = self.generate_prd(transcript).await?;
        report.artifacts.push(self.persist(DocumentKind::Prd, &prd));

        if self.options.skip_trd {
            println!("{}", "⚠️  TRD 생성을 건너뜁니다.".yellow());
            info!("TRD and TODO stages skipped");
            return Ok(report);
        }

        let trd = match self.generate_trd(&prd).await {
            Ok(trd) => trd,
            Err(e) => {
                report.failure = Some(stage_failure(DocumentKind::Trd, &e));
                return Ok(report);
            }
        };
        report.artifacts.push(self.persist(DocumentKind::Trd, &trd));

        if self.options.skips_todo() {
            println!("{}", colors::peach("⚠️  TODO 생성을 건너뜁니다."));
            info!("TODO stage skipped");
            return Ok(report);
        }

        let todo = match self.generate_todo(&trd).await {
            Ok(todo) => todo,
            Err(e) => {
                report.failure = Some(stage_failure(DocumentKind::Todo, &e));
                return Ok(report);
            }
        };
        let markdown = render_todo_markdown(&todo);
        report.artifacts.push(self.persist(DocumentKind::Todo, &markdown));

        Ok(report)
    }

    /// PRD from the flattened Q&A transcript
    pub async fn generate_prd(&self, transcript: &Transcript) -> Result<String> {
        self.complete_text(
            Stage::Prd,
            PRD_SYSTEM_PROMPT,
            transcript.to_requirements_text(),
            "PRD 문서를 생성하고 있습니다...",
        )
        .await
        .context("PRD 생성 중 오류가 발생했습니다")
    }

    /// TRD from the PRD text
    pub async fn generate_trd(&self, prd: &str) -> Result<String> {
        self.complete_text(
            Stage::Trd,
            TRD_SYSTEM_PROMPT,
            prd.to_string(),
            "TRD 문서를 생성하고 있습니다...",
        )
        .await
        .context("TRD 생성 중 오류가 발생했습니다")
    }

    /// Structured TODO from the TRD text
    pub async fn generate_todo(&self, trd: &str) -> Result<TodoDocument> {
        let settings = self.settings.stage_settings(Stage::Todo);
        debug!(model = %settings.model, "generate_todo");

        let request = CompletionRequest::new(
            settings,
            vec![ChatMessage::developer(TODO_SYSTEM_PROMPT), ChatMessage::user(trd)],
        );

        let spinner = Spinner::start(
            colors::light_mint("TODO 목록을 생성하고 있습니다...").to_string(),
            self.options.show_progress,
        );
        let result = complete_structured::<TodoDocument>(self.client, TODO_SCHEMA_NAME, todo_schema(), request).await;
        spinner.stop();

        let todo = result.context("TODO 생성 중 오류가 발생했습니다")?;
        debug!(tasks = todo.total_tasks(), subtasks = todo.total_subtasks(), "TODO parsed");
        Ok(todo)
    }

    async fn complete_text(&self, stage: Stage, system: &str, user: String, progress: &str) -> Result<String> {
        let settings = self.settings.stage_settings(stage);
        debug!(stage = stage.key(), model = %settings.model, "complete_text");

        let request = CompletionRequest::new(settings, vec![ChatMessage::developer(system), ChatMessage::user(user)]);

        let spinner = Spinner::start(colors::light_mint(progress).to_string(), self.options.show_progress);
        let result = self.client.complete(request).await;
        spinner.stop();

        Ok(result?)
    }

    /// Persist a document, printing it when the write fails
    fn persist(&self, kind: DocumentKind, content: &str) -> Artifact {
        match self.sink.persist(kind, content) {
            Ok(path) => {
                println!(
                    "{}{}",
                    colors::mint(&format!("✅ {} 생성 완료: ", kind)),
                    colors::blue(&path.display().to_string())
                );
                Artifact {
                    kind,
                    location: ArtifactLocation::Persisted(path),
                }
            }
            Err(e) => {
                warn!(kind = %kind, error = %e, "persist failed, printing content");
                let rule = "═".repeat(70);
                println!("{}", format!("\n📄 생성된 {} 문서:", kind).blue().bold());
                println!("{}", rule.dimmed());
                println!("\n{}\n", content);
                println!("{}", rule.dimmed());
                println!("{}{}", "⚠️  파일 저장 실패: ".red(), e);
                println!("{}", "위 내용을 복사하여 수동으로 저장해 주세요.".dimmed());
                Artifact {
                    kind,
                    location: ArtifactLocation::PrintedOnly,
                }
            }
        }
    }
}

fn stage_failure(kind: DocumentKind, error: &anyhow::Error) -> StageFailure {
    warn!(kind = %kind, error = %error, "stage failed");
    StageFailure {
        kind,
        message: format!("{:#}", error),
    }
}
