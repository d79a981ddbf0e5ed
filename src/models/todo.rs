//! Structured TODO document produced by the final pipeline stage

use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::P0, Priority::P1, Priority::P2];

    /// Korean label used in the rendered distribution summary
    pub fn label(&self) -> &'static str {
        match self {
            Priority::P0 => "필수",
            Priority::P1 => "중요",
            Priority::P2 => "선택",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::P0 => "P0",
            Priority::P1 => "P1",
            Priority::P2 => "P2",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
    Blocked,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::NotStarted => "not_started",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Blocked => "blocked",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileChangeType {
    Create,
    Modify,
    Delete,
}

impl fmt::Display for FileChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileChangeType::Create => "create",
            FileChangeType::Modify => "modify",
            FileChangeType::Delete => "delete",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub description: String,
    #[serde(rename = "type")]
    pub change_type: FileChangeType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub implementation_notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risk {
    pub risk: String,
    pub mitigation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub description: String,
    pub files: Vec<FileChange>,
    pub subtasks: Vec<Subtask>,
    pub dependencies: Vec<String>,
    pub completion_criteria: Vec<String>,
    pub risks: Vec<Risk>,
    pub order: i64,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeExample {
    pub language: String,
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationGuide {
    pub id: String,
    pub title: String,
    pub category: String,
    pub content: String,
    pub related_tasks: Vec<String>,
    pub code_examples: Vec<CodeExample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConsiderations {
    pub browser_compatibility: Vec<String>,
    pub performance_requirements: Vec<String>,
    pub accessibility_standards: Vec<String>,
    pub error_handling_policies: Vec<String>,
    pub memory_management: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub phase_name: String,
    pub description: String,
    pub task_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOrder {
    pub summary: String,
    pub phases: Vec<Phase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub created_at: String,
    pub updated_at: String,
    pub author: String,
    pub version: String,
}

/// Complete TODO document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDocument {
    pub project: ProjectInfo,
    pub tasks: Vec<Task>,
    pub implementation_guides: Vec<ImplementationGuide>,
    pub global_considerations: GlobalConsiderations,
    pub execution_order: ExecutionOrder,
    pub metadata: DocumentMetadata,
}

impl TodoDocument {
    pub fn total_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Sum of every task's subtask count
    pub fn total_subtasks(&self) -> usize {
        self.tasks.iter().map(|t| t.subtasks.len()).sum()
    }

    /// Number of tasks carrying the given priority
    pub fn count_by_priority(&self, priority: Priority) -> usize {
        self.tasks.iter().filter(|t| t.priority == priority).count()
    }
}
