//! Integration tests for the document pipeline
//!
//! Runs PRD → TRD → TODO against a fake completion client and a temporary
//! output directory, covering skip flags, stage failures and the
//! print-instead-of-save fallback.

mod common;

use common::{sample_todo, FakeClient};
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;
use vibedoc::config::{ReasoningEffort, SettingsSource, Stage, StageSettings, Verbosity, VibedocConfig};
use vibedoc::models::{DocumentKind, Question, Transcript};
use vibedoc::orchestrator::{LlmError, ResponseFormat, Role};
use vibedoc::pipeline::{ArtifactLocation, DirectorySink, DocumentPipeline, PipelineOptions};

fn transcript() -> Transcript {
    let mut t = Transcript::new("a recipe-sharing app");
    t.record_question(Question {
        question: "Which platform should ship first?".to_string(),
        choices: vec!["Web".to_string(), "iOS".to_string()],
    });
    t.record_answer("Web");
    t.begin_next_exchange();
    t.record_question(Question {
        question: "Who is the main audience?".to_string(),
        choices: vec!["Home cooks".to_string(), "Chefs".to_string()],
    });
    t.record_answer("Home cooks");
    t
}

fn options(skip_trd: bool, skip_todo: bool) -> PipelineOptions {
    PipelineOptions {
        skip_trd,
        skip_todo,
        show_progress: false,
    }
}

fn full_client() -> FakeClient {
    FakeClient::replying(vec![
        "# PRD\n\nRecipe sharing".to_string(),
        "# TRD\n\nStack".to_string(),
        serde_json::to_string(&sample_todo()).unwrap(),
    ])
}

/// Records which stages were resolved, in order
struct RecordingSettings {
    inner: VibedocConfig,
    seen: Mutex<Vec<Stage>>,
}

impl SettingsSource for RecordingSettings {
    fn stage_settings(&self, stage: Stage) -> StageSettings {
        self.seen.lock().unwrap().push(stage);
        self.inner.stage_settings(stage)
    }
}

#[tokio::test]
async fn test_full_pipeline_writes_three_files() {
    let temp = TempDir::new().unwrap();
    let sink = DirectorySink::new(temp.path());
    let client = full_client();
    let config = VibedocConfig::default();

    let pipeline = DocumentPipeline::new(&client, &config, &sink, options(false, false));
    let report = pipeline.run(&transcript()).await.unwrap();

    assert!(report.is_complete());
    assert_eq!(report.kinds(), vec![DocumentKind::Prd, DocumentKind::Trd, DocumentKind::Todo]);
    for artifact in &report.artifacts {
        assert!(matches!(artifact.location, ArtifactLocation::Persisted(_)));
    }

    assert_eq!(
        fs::read_to_string(temp.path().join("prd.md")).unwrap(),
        "# PRD\n\nRecipe sharing"
    );
    assert_eq!(fs::read_to_string(temp.path().join("trd.md")).unwrap(), "# TRD\n\nStack");

    let todo = fs::read_to_string(temp.path().join("todo.md")).unwrap();
    assert!(todo.starts_with("# RecipeShare\n"));
    assert!(todo.contains("\n### 우선순위별 작업 분포\n"));

    let counts: usize = ["P0 (필수)", "P1 (중요)", "P2 (선택)"]
        .iter()
        .map(|label| {
            let marker = format!("- **{}:** ", label);
            let start = todo.find(&marker).unwrap() + marker.len();
            let end = start + todo[start..].find('개').unwrap();
            todo[start..end].parse::<usize>().unwrap()
        })
        .sum();
    assert_eq!(counts, sample_todo().tasks.len());
}

#[tokio::test]
async fn test_stage_inputs_chain() {
    let temp = TempDir::new().unwrap();
    let sink = DirectorySink::new(temp.path());
    let client = full_client();
    let config = VibedocConfig::default();

    let pipeline = DocumentPipeline::new(&client, &config, &sink, options(false, false));
    pipeline.run(&transcript()).await.unwrap();

    let requests = client.requests();
    assert_eq!(requests.len(), 3);

    let prd = &requests[0];
    assert_eq!(prd.messages[0].role, Role::Developer);
    assert_eq!(prd.messages[1].content, transcript().to_requirements_text());
    assert!(prd.messages[1].content.contains("Q: Who is the main audience?\nA: Home cooks\n"));
    assert_eq!(prd.response_format, ResponseFormat::Text);

    assert_eq!(requests[1].messages[1].content, "# PRD\n\nRecipe sharing");
    assert_eq!(requests[1].response_format, ResponseFormat::Text);

    assert_eq!(requests[2].messages[1].content, "# TRD\n\nStack");
    match &requests[2].response_format {
        ResponseFormat::JsonSchema { name, .. } => assert_eq!(name, "project_todo_list"),
        other => panic!("expected schema constraint, got {:?}", other),
    }
}

#[tokio::test]
async fn test_settings_resolved_per_stage() {
    let temp = TempDir::new().unwrap();
    let sink = DirectorySink::new(temp.path());
    let client = full_client();

    let mut inner = VibedocConfig::default();
    inner.openai.set_stage(
        Stage::Trd,
        StageSettings {
            model: "gpt-5-mini".to_string(),
            verbosity: Verbosity::Low,
            reasoning_effort: ReasoningEffort::Minimal,
        },
    );
    let settings = RecordingSettings {
        inner,
        seen: Mutex::new(Vec::new()),
    };

    let pipeline = DocumentPipeline::new(&client, &settings, &sink, options(false, false));
    pipeline.run(&transcript()).await.unwrap();

    assert_eq!(*settings.seen.lock().unwrap(), vec![Stage::Prd, Stage::Trd, Stage::Todo]);

    let requests = client.requests();
    assert_eq!(requests[0].model, "gpt-5");
    assert_eq!(requests[1].model, "gpt-5-mini");
    assert_eq!(requests[1].verbosity, Verbosity::Low);
    assert_eq!(requests[1].reasoning_effort, ReasoningEffort::Minimal);
    assert_eq!(requests[2].model, "gpt-5");
}

#[tokio::test]
async fn test_skip_trd_produces_only_prd() {
    let temp = TempDir::new().unwrap();
    let sink = DirectorySink::new(temp.path());
    let client = full_client();
    let config = VibedocConfig::default();

    let pipeline = DocumentPipeline::new(&client, &config, &sink, options(true, false));
    let report = pipeline.run(&transcript()).await.unwrap();

    assert_eq!(report.kinds(), vec![DocumentKind::Prd]);
    assert_eq!(client.requests().len(), 1);
    assert!(temp.path().join("prd.md").exists());
    assert!(!temp.path().join("trd.md").exists());
    assert!(!temp.path().join("todo.md").exists());
}

#[tokio::test]
async fn test_skip_todo_produces_prd_and_trd() {
    let temp = TempDir::new().unwrap();
    let sink = DirectorySink::new(temp.path());
    let client = full_client();
    let config = VibedocConfig::default();

    let pipeline = DocumentPipeline::new(&client, &config, &sink, options(false, true));
    let report = pipeline.run(&transcript()).await.unwrap();

    assert_eq!(report.kinds(), vec![DocumentKind::Prd, DocumentKind::Trd]);
    assert_eq!(client.requests().len(), 2);
    assert!(!temp.path().join("todo.md").exists());
}

#[tokio::test]
async fn test_prd_failure_halts_pipeline() {
    let temp = TempDir::new().unwrap();
    let sink = DirectorySink::new(temp.path());
    let client = FakeClient::new(vec![Err(LlmError::Authentication("invalid api key".to_string()))]);
    let config = VibedocConfig::default();

    let pipeline = DocumentPipeline::new(&client, &config, &sink, options(false, false));
    let err = pipeline.run(&transcript()).await.unwrap_err();

    assert!(format!("{:#}", err).contains("invalid api key"));
    assert_eq!(client.requests().len(), 1);
    assert!(!temp.path().join("prd.md").exists());
}

#[tokio::test]
async fn test_trd_failure_keeps_prd() {
    let temp = TempDir::new().unwrap();
    let sink = DirectorySink::new(temp.path());
    let client = FakeClient::new(vec![
        Ok("# PRD".to_string()),
        Err(LlmError::Api {
            status: 500,
            message: "server error".to_string(),
        }),
    ]);
    let config = VibedocConfig::default();

    let pipeline = DocumentPipeline::new(&client, &config, &sink, options(false, false));
    let report = pipeline.run(&transcript()).await.unwrap();

    assert_eq!(report.kinds(), vec![DocumentKind::Prd]);
    let failure = report.failure.expect("TRD failure recorded");
    assert_eq!(failure.kind, DocumentKind::Trd);
    assert!(failure.message.contains("server error"));
    assert_eq!(client.requests().len(), 2);
}

#[tokio::test]
async fn test_malformed_todo_is_fatal_to_stage() {
    let temp = TempDir::new().unwrap();
    let sink = DirectorySink::new(temp.path());
    let client = FakeClient::replying(vec![
        "# PRD".to_string(),
        "# TRD".to_string(),
        r#"{"project": {"name": "x"}}"#.to_string(),
    ]);
    let config = VibedocConfig::default();

    let pipeline = DocumentPipeline::new(&client, &config, &sink, options(false, false));
    let report = pipeline.run(&transcript()).await.unwrap();

    assert_eq!(report.kinds(), vec![DocumentKind::Prd, DocumentKind::Trd]);
    assert_eq!(report.failure.map(|f| f.kind), Some(DocumentKind::Todo));
    assert!(temp.path().join("trd.md").exists());
    assert!(!temp.path().join("todo.md").exists());
}

#[tokio::test]
async fn test_persist_failure_prints_and_continues() {
    let temp = TempDir::new().unwrap();
    let sink = DirectorySink::new(temp.path().join("does-not-exist"));
    let client = full_client();
    let config = VibedocConfig::default();

    let pipeline = DocumentPipeline::new(&client, &config, &sink, options(false, false));
    let report = pipeline.run(&transcript()).await.unwrap();

    assert!(report.is_complete());
    assert_eq!(report.artifacts.len(), 3);
    for artifact in &report.artifacts {
        assert_eq!(artifact.location, ArtifactLocation::PrintedOnly);
    }
}
