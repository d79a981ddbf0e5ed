//! Question/answer session
//!
//! Drives a fixed number of AI-generated multiple-choice questions, then lets
//! the user review, edit or restart before the transcript is handed to the
//! document pipeline.
//!
//! ```text
//! Collecting -> Asking -> Reviewing -> Confirmed
//!     ^                    |    ^
//!     +---- restart -------+    | back
//!                          v    |
//!                          Editing
//! ```

use crate::config::{validate_question_count, SettingsSource, Stage};
use crate::models::{Question, QuestionSet, Transcript};
use crate::orchestrator::prompts::question_system_prompt;
use crate::orchestrator::{complete_structured, CompletionClient, CompletionRequest};
use crate::ui::{colors, input_non_empty, Prompter, Spinner};
use crate::validator::{question_schema, QUESTION_SCHEMA_NAME};
use crate::{Context, Result};
use colored::Colorize;
use tracing::{debug, info};

/// Synthetic choice appended to every question for free-text answers
pub const OTHER_CHOICE: &str = "기타 (직접 입력)";

const BACK_CHOICE: &str = "⬅️  뒤로 가기";
const QUESTION_PREVIEW_CHARS: usize = 40;
const ANSWER_PREVIEW_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Initial description being entered
    Collecting,
    /// Question loop in progress
    Asking,
    /// Full transcript shown, waiting for confirm/edit/restart
    Reviewing,
    /// Re-answering a prior exchange
    Editing,
    /// Transcript accepted
    Confirmed,
}

/// Result of the review screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    Confirmed,
    Restart,
}

pub struct QaSession<'a> {
    prompter: &'a dyn Prompter,
    client: &'a dyn CompletionClient,
    settings: &'a dyn SettingsSource,
    max_questions: u32,
    show_progress: bool,
    state: SessionState,
}

impl<'a> QaSession<'a> {
    pub fn new(
        prompter: &'a dyn Prompter,
        client: &'a dyn CompletionClient,
        settings: &'a dyn SettingsSource,
        max_questions: u32,
    ) -> Result<Self> {
        let max_questions = validate_question_count(max_questions)?;
        Ok(Self {
            prompter,
            client,
            settings,
            max_questions,
            show_progress: true,
            state: SessionState::Collecting,
        })
    }

    /// Toggle the spinner shown during completion calls
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn max_questions(&self) -> u32 {
        self.max_questions
    }

    /// Run the session until the user confirms a transcript
    pub async fn run(&mut self) -> Result<Transcript> {
        loop {
            self.state = SessionState::Collecting;
            let mut transcript = self.collect_description()?;

            self.state = SessionState::Asking;
            self.ask_questions(&mut transcript).await?;

            match self.review(&mut transcript)? {
                ReviewOutcome::Confirmed => {
                    self.state = SessionState::Confirmed;
                    info!(exchanges = transcript.len(), "session confirmed");
                    return Ok(transcript);
                }
                ReviewOutcome::Restart => {
                    println!("{}", "🔄 처음부터 다시 시작합니다...".yellow());
                    debug!("session restarted, transcript discarded");
                }
            }
        }
    }

    /// Read the initial project description into a fresh transcript
    pub fn collect_description(&self) -> Result<Transcript> {
        let description = input_non_empty(
            self.prompter,
            "만들고자 하는 프로젝트에 대해 간단히 설명해주세요",
            None,
            "프로젝트 설명을 입력해주세요.",
        )?;
        Ok(Transcript::new(description))
    }

    async fn ask_questions(&self, transcript: &mut Transcript) -> Result<()> {
        for number in 1..=self.max_questions {
            let question = self.request_next_question(transcript).await?;
            let message = format!("[{}/{}] {}", number, self.max_questions, question.question);
            transcript.record_question(question.clone());

            let answer = self.present_choices(&question, None, &message)?;
            transcript.record_answer(answer);

            if number < self.max_questions {
                transcript.begin_next_exchange();
            }
        }
        Ok(())
    }

    /// Ask the model for the next question given the whole transcript
    ///
    /// Only the first question of the returned set is used.
    pub async fn request_next_question(&self, transcript: &Transcript) -> Result<Question> {
        let settings = self.settings.stage_settings(Stage::Question);
        debug!(model = %settings.model, exchanges = transcript.len(), "requesting next question");

        let messages = transcript.to_chat_messages(&question_system_prompt(self.max_questions));
        let request = CompletionRequest::new(settings, messages);

        let spinner = Spinner::start(
            colors::light_mint("질문을 생성하고 있습니다...").to_string(),
            self.show_progress,
        );
        let result = complete_structured::<QuestionSet>(
            self.client,
            QUESTION_SCHEMA_NAME,
            question_schema(),
            request,
        )
        .await;
        spinner.stop();

        let set = result.context("질문 생성 API 호출에 실패했습니다")?;
        if set.questions.len() > 1 {
            debug!(extra = set.questions.len() - 1, "ignoring additional questions");
        }
        set.into_first()
            .ok_or_else(|| anyhow::anyhow!("응답에 질문이 포함되어 있지 않습니다"))
    }

    /// Offer a question's choices plus the free-text escape hatch
    ///
    /// `current` pre-selects a matching listed choice, and seeds the free-text
    /// input when it was itself a free-text answer.
    pub fn present_choices(&self, question: &Question, current: Option<&str>, message: &str) -> Result<String> {
        let mut items = question.choices.clone();
        items.push(OTHER_CHOICE.to_string());

        let default = current
            .and_then(|c| question.choices.iter().position(|choice| choice == c))
            .unwrap_or(0);

        let index = self
            .prompter
            .select(&colors::light_purple(message).to_string(), &items, default)?;

        if index == question.choices.len() {
            let initial = current.filter(|c| !question.choices.iter().any(|choice| choice == c));
            return input_non_empty(
                self.prompter,
                &colors::yellow("직접 입력해주세요").to_string(),
                initial,
                "답변을 입력해주세요.",
            );
        }

        question
            .choices
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Invalid selection index {}", index))
    }

    /// Show the transcript and loop until confirm or restart
    pub fn review(&mut self, transcript: &mut Transcript) -> Result<ReviewOutcome> {
        let actions = [
            "✅ 답변이 만족스럽습니다. PRD 생성을 시작하세요.".to_string(),
            "✏️  특정 답변을 수정하고 싶습니다.".to_string(),
            "🔄 처음부터 다시 시작하고 싶습니다.".to_string(),
        ];

        loop {
            self.state = SessionState::Reviewing;
            println!("{}", render_summary(transcript));

            let action = self.prompter.select(
                &colors::peach("위의 답변들을 확인해주세요. 어떻게 하시겠습니까?").to_string(),
                &actions,
                0,
            )?;

            match action {
                0 => return Ok(ReviewOutcome::Confirmed),
                1 => {
                    self.state = SessionState::Editing;
                    self.edit_loop(transcript)?;
                }
                _ => {
                    let restart = self.prompter.confirm(
                        &"정말로 처음부터 다시 시작하시겠습니까? 현재 답변들이 모두 사라집니다."
                            .red()
                            .to_string(),
                        false,
                    )?;
                    if restart {
                        return Ok(ReviewOutcome::Restart);
                    }
                }
            }
        }
    }

    fn edit_loop(&self, transcript: &mut Transcript) -> Result<()> {
        loop {
            let entries: Vec<(usize, String)> = transcript
                .answered()
                .map(|(index, question, answer)| (index, edit_menu_label(index, &question.question, answer)))
                .collect();

            let mut items: Vec<String> = entries.iter().map(|(_, label)| label.clone()).collect();
            items.push(BACK_CHOICE.to_string());

            let choice = self.prompter.select(
                &colors::light_mint("수정하고 싶은 항목을 선택해주세요:").to_string(),
                &items,
                0,
            )?;

            match entries.get(choice) {
                Some((index, _)) => self.edit_exchange(transcript, *index)?,
                None => return Ok(()),
            }
        }
    }

    /// Re-ask the question at `index` and overwrite its answer in place
    pub fn edit_exchange(&self, transcript: &mut Transcript, index: usize) -> Result<()> {
        let exchange = transcript
            .get(index)
            .ok_or_else(|| anyhow::anyhow!("No exchange at index {}", index))?;
        let question = exchange
            .question
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Exchange {} has no question", index))?;
        let current = exchange.answer.clone();

        let message = match &current {
            Some(answer) => format!("현재 답변: \"{}\" - 새로운 답변을 선택해주세요:", answer),
            None => question.question.clone(),
        };

        let answer = self.present_choices(&question, current.as_deref(), &message)?;
        debug!(index, "answer edited");
        transcript.set_answer(index, answer)
    }
}

/// Text of the review screen
pub fn render_summary(transcript: &Transcript) -> String {
    let rule = "═".repeat(60);
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", colors::lavender("📋 질문/답변 요약").bold()));
    out.push_str(&rule);
    out.push('\n');

    out.push_str(&format!("\n{}\n", colors::orange("🎯 프로젝트 설명:").bold()));
    out.push_str(&format!("{}\n", colors::yellow(transcript.description())));

    for (index, question, answer) in transcript.answered() {
        let line = format!("❓ [{}] {}", index + 1, question.question);
        out.push_str(&format!("{}\n", colors::blue(&line).bold()));
        out.push_str(&format!("{}\n", colors::mint(&format!("✅ {}", answer))));
    }

    out.push_str(&rule);
    out
}

/// Label for one entry of the edit menu
pub fn edit_menu_label(index: usize, question: &str, answer: &str) -> String {
    format!(
        "❓ [{}] {} → \"{}\"",
        index + 1,
        truncate_chars(question, QUESTION_PREVIEW_CHARS),
        truncate_chars(answer, ANSWER_PREVIEW_CHARS)
    )
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("짧은 답변", 30), "짧은 답변");
        let long = "가".repeat(45);
        let truncated = truncate_chars(&long, 40);
        assert_eq!(truncated.chars().count(), 43);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_edit_menu_label() {
        let label = edit_menu_label(2, "주요 타겟 사용자는 누구인가요?", "대학생");
        assert_eq!(label, "❓ [3] 주요 타겟 사용자는 누구인가요? → \"대학생\"");
    }

    #[test]
    fn test_render_summary_lists_answered_only() {
        let mut t = Transcript::new("레시피 공유 앱");
        t.record_question(Question {
            question: "플랫폼은?".to_string(),
            choices: vec!["웹".to_string(), "모바일".to_string()],
        });
        t.record_answer("웹");
        t.begin_next_exchange();

        let summary = render_summary(&t);
        assert!(summary.contains("레시피 공유 앱"));
        assert!(summary.contains("❓ [1] 플랫폼은?"));
        assert!(summary.contains("✅ 웹"));
        assert!(!summary.contains("[2]"));
    }
}
