// VibeDOC - Vibe Document Generator
// Guided Q&A that turns a project idea into PRD, TRD and TODO documents

pub mod cli;
pub mod config;
pub mod models;
pub mod orchestrator;
pub mod pipeline;
pub mod session;
pub mod ui;
pub mod validator;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use config::{ConfigStore, VibedocConfig};
pub use models::{DocumentKind, Question, TodoDocument, Transcript};
pub use pipeline::{DocumentPipeline, PipelineOptions, PipelineReport};
pub use session::QaSession;
