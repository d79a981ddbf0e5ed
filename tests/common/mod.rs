//! Scripted fakes shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::Mutex;
use vibedoc::models::{
    DocumentMetadata, ExecutionOrder, GlobalConsiderations, Phase, Priority, ProjectInfo, Subtask, Task,
    TaskStatus, TodoDocument,
};
use vibedoc::orchestrator::{CompletionClient, CompletionRequest, LlmError};
use vibedoc::ui::Prompter;
use vibedoc::Result;

/// One scripted user action
#[derive(Debug, Clone)]
pub enum Step {
    Select(usize),
    Input(&'static str),
    Confirm(bool),
}

/// A `select` call as seen by the prompter
#[derive(Debug, Clone)]
pub struct SelectCall {
    pub message: String,
    pub items: Vec<String>,
    pub default: usize,
}

/// Prompter replaying a fixed script and recording what it was asked
#[derive(Default)]
pub struct ScriptedPrompter {
    steps: RefCell<VecDeque<Step>>,
    pub selects: RefCell<Vec<SelectCall>>,
    pub input_initials: RefCell<Vec<Option<String>>>,
}

impl ScriptedPrompter {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: RefCell::new(steps.into()),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.steps.borrow().len()
    }

    fn next(&self) -> Result<Step> {
        self.steps
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("prompt script exhausted"))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, message: &str, items: &[String], default: usize) -> Result<usize> {
        self.selects.borrow_mut().push(SelectCall {
            message: message.to_string(),
            items: items.to_vec(),
            default,
        });
        match self.next()? {
            Step::Select(index) => Ok(index),
            other => anyhow::bail!("expected select, script has {:?}", other),
        }
    }

    fn input(&self, _message: &str, initial: Option<&str>) -> Result<String> {
        self.input_initials.borrow_mut().push(initial.map(str::to_string));
        match self.next()? {
            Step::Input(text) => Ok(text.to_string()),
            other => anyhow::bail!("expected input, script has {:?}", other),
        }
    }

    fn confirm(&self, _message: &str, _default: bool) -> Result<bool> {
        match self.next()? {
            Step::Confirm(answer) => Ok(answer),
            other => anyhow::bail!("expected confirm, script has {:?}", other),
        }
    }
}

/// Completion client returning queued responses in order
#[derive(Default)]
pub struct FakeClient {
    responses: Mutex<VecDeque<std::result::Result<String, LlmError>>>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeClient {
    pub fn new(responses: Vec<std::result::Result<String, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(texts: Vec<String>) -> Self {
        Self::new(texts.into_iter().map(Ok).collect())
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for FakeClient {
    async fn complete(&self, request: CompletionRequest) -> std::result::Result<String, LlmError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::InvalidResponse("no scripted response".to_string())))
    }
}

/// Question-stage response JSON with four choices
pub fn question_json(text: &str, choices: [&str; 4]) -> String {
    json!({ "questions": [{ "question": text, "choices": choices }] }).to_string()
}

/// A small but complete TODO document
pub fn sample_todo() -> TodoDocument {
    let task = |id: &str, priority: Priority, subtasks: usize| Task {
        id: id.to_string(),
        title: format!("Task {}", id),
        priority,
        description: "work".to_string(),
        files: vec![],
        subtasks: (0..subtasks)
            .map(|i| Subtask {
                id: format!("{}.{}", id, i + 1),
                title: "step".to_string(),
                description: "detail".to_string(),
                category: "setup".to_string(),
                implementation_notes: vec![],
            })
            .collect(),
        dependencies: vec![],
        completion_criteria: vec!["done".to_string()],
        risks: vec![],
        order: 1,
        status: TaskStatus::NotStarted,
    };

    TodoDocument {
        project: ProjectInfo {
            name: "RecipeShare".to_string(),
            description: "A recipe-sharing app".to_string(),
            version: "1.0.0".to_string(),
        },
        tasks: vec![
            task("T001", Priority::P0, 2),
            task("T002", Priority::P1, 1),
            task("T003", Priority::P2, 0),
            task("T004", Priority::P0, 3),
        ],
        implementation_guides: vec![],
        global_considerations: GlobalConsiderations {
            browser_compatibility: vec!["Evergreen browsers".to_string()],
            performance_requirements: vec![],
            accessibility_standards: vec![],
            error_handling_policies: vec![],
            memory_management: vec![],
        },
        execution_order: ExecutionOrder {
            summary: "Core first".to_string(),
            phases: vec![Phase {
                phase_name: "MVP".to_string(),
                description: "Ship the basics".to_string(),
                task_ids: vec!["T001".to_string(), "T004".to_string()],
            }],
        },
        metadata: DocumentMetadata {
            created_at: "2025-08-01T00:00:00Z".to_string(),
            updated_at: "2025-08-01T00:00:00Z".to_string(),
            author: "VibeDOC".to_string(),
            version: "1.0.0".to_string(),
        },
    }
}
