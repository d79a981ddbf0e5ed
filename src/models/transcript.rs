//! Session transcript model
//!
//! A transcript is the ordered record of one Q&A session: the initial project
//! description followed by question/answer exchanges. Records are only ever
//! appended; editing replaces an answer in place.

use crate::orchestrator::ChatMessage;
use serde::{Deserialize, Serialize};

/// One AI-generated question with its multiple-choice options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub choices: Vec<String>,
}

/// Wire shape of the question stage response
///
/// The model may return several questions; the session consumes only the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
}

impl QuestionSet {
    /// Take the first question, if any
    pub fn into_first(self) -> Option<Question> {
        self.questions.into_iter().next()
    }
}

/// One question/answer unit within a transcript
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exchange {
    /// Free-text project description (first record only)
    pub initial_description: Option<String>,
    pub question: Option<Question>,
    pub answer: Option<String>,
}

impl Exchange {
    /// Both a question and an answer are present
    pub fn is_answered(&self) -> bool {
        self.question.is_some() && self.answer.is_some()
    }
}

/// Ordered, append-only sequence of exchanges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    exchanges: Vec<Exchange>,
}

impl Transcript {
    /// Start a transcript holding only the initial description
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            exchanges: vec![Exchange {
                initial_description: Some(description.into()),
                ..Exchange::default()
            }],
        }
    }

    pub fn description(&self) -> &str {
        self.exchanges
            .first()
            .and_then(|e| e.initial_description.as_deref())
            .unwrap_or_default()
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Exchange> {
        self.exchanges.get(index)
    }

    /// Attach a question to the latest exchange
    pub fn record_question(&mut self, question: Question) {
        if let Some(last) = self.exchanges.last_mut() {
            last.question = Some(question);
        }
    }

    /// Attach an answer to the latest exchange
    pub fn record_answer(&mut self, answer: impl Into<String>) {
        if let Some(last) = self.exchanges.last_mut() {
            last.answer = Some(answer.into());
        }
    }

    /// Open an empty exchange for the next question
    pub fn begin_next_exchange(&mut self) {
        self.exchanges.push(Exchange::default());
    }

    /// Replace the answer of an existing exchange
    ///
    /// Length and order of the transcript never change. Fails when the index
    /// is out of range or the exchange holds no question.
    pub fn set_answer(&mut self, index: usize, answer: impl Into<String>) -> anyhow::Result<()> {
        let exchange = self
            .exchanges
            .get_mut(index)
            .ok_or_else(|| anyhow::anyhow!("No exchange at index {}", index))?;
        if exchange.question.is_none() {
            anyhow::bail!("Exchange {} has no question to answer", index);
        }
        exchange.answer = Some(answer.into());
        Ok(())
    }

    /// Exchanges holding both a question and an answer, with their index
    pub fn answered(&self) -> impl Iterator<Item = (usize, &Question, &str)> + '_ {
        self.exchanges.iter().enumerate().filter_map(|(i, e)| match (&e.question, &e.answer) {
            (Some(q), Some(a)) => Some((i, q, a.as_str())),
            _ => None,
        })
    }

    /// Rebuild the full chat history for the question stage
    ///
    /// Always derived from scratch: system prompt, the initial description as
    /// a user turn, then each stored question (assistant, as the JSON the
    /// model produced) and answer (user) in transcript order.
    pub fn to_chat_messages(&self, system_prompt: &str) -> Vec<ChatMessage> {
        let mut messages = vec![
            ChatMessage::developer(system_prompt),
            ChatMessage::user(self.description()),
        ];

        for exchange in &self.exchanges {
            if let Some(question) = &exchange.question {
                let set = QuestionSet {
                    questions: vec![question.clone()],
                };
                let json = serde_json::to_string(&set).unwrap_or_default();
                messages.push(ChatMessage::assistant(json));
            }
            if let Some(answer) = &exchange.answer {
                messages.push(ChatMessage::user(answer.clone()));
            }
        }

        messages
    }

    /// Flatten into the plain-text requirements block used for the PRD stage
    pub fn to_requirements_text(&self) -> String {
        let mut text = format!("프로젝트 설명: {}\n\n", self.description());
        text.push_str("수집된 요구사항 정보:\n");
        for (_, question, answer) in self.answered() {
            text.push_str(&format!("Q: {}\n", question.question));
            text.push_str(&format!("A: {}\n\n", answer));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::Role;

    fn question(text: &str) -> Question {
        Question {
            question: text.to_string(),
            choices: vec!["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()],
        }
    }

    fn two_answered() -> Transcript {
        let mut t = Transcript::new("a recipe-sharing app");
        t.record_question(question("Who are the users?"));
        t.record_answer("A");
        t.begin_next_exchange();
        t.record_question(question("Which platform?"));
        t.record_answer("B");
        t
    }

    #[test]
    fn test_new_transcript_has_single_record() {
        let t = Transcript::new("a todo app");
        assert_eq!(t.len(), 1);
        assert_eq!(t.description(), "a todo app");
        assert!(t.get(0).unwrap().question.is_none());
    }

    #[test]
    fn test_set_answer_only_touches_target() {
        let mut t = two_answered();
        let before = t.clone();

        t.set_answer(1, "C").unwrap();

        assert_eq!(t.len(), before.len());
        assert_eq!(t.get(0), before.get(0));
        assert_eq!(t.get(1).unwrap().question, before.get(1).unwrap().question);
        assert_eq!(t.get(1).unwrap().answer.as_deref(), Some("C"));
    }

    #[test]
    fn test_set_answer_rejects_missing_question() {
        let mut t = Transcript::new("x");
        assert!(t.set_answer(0, "y").is_err());
        assert!(t.set_answer(5, "y").is_err());
    }

    #[test]
    fn test_chat_messages_alternate() {
        let t = two_answered();
        let messages = t.to_chat_messages("sys");

        let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::Developer,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User
            ]
        );
        assert_eq!(messages[1].content, "a recipe-sharing app");

        let parsed: QuestionSet = serde_json::from_str(&messages[2].content).unwrap();
        assert_eq!(parsed.questions[0].question, "Who are the users?");
    }

    #[test]
    fn test_chat_messages_are_reproducible() {
        let t = two_answered();
        assert_eq!(t.to_chat_messages("sys"), t.to_chat_messages("sys"));
    }

    #[test]
    fn test_requirements_text_skips_unanswered() {
        let mut t = two_answered();
        t.begin_next_exchange();
        t.record_question(question("Pending?"));

        let text = t.to_requirements_text();
        assert!(text.starts_with("프로젝트 설명: a recipe-sharing app\n\n"));
        assert!(text.contains("Q: Who are the users?\nA: A\n\n"));
        assert!(text.contains("Q: Which platform?\nA: B\n\n"));
        assert!(!text.contains("Pending?"));
    }
}
