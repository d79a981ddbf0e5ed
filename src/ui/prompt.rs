//! Terminal prompts
//!
//! Every interactive read goes through [`Prompter`] so the session logic can
//! be driven by a scripted implementation in tests. [`TerminalPrompter`]
//! takes its cancel behaviour as an explicit [`CancelPolicy`].

use super::colors;
use crate::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::io::ErrorKind;
use tracing::debug;

/// Interactive input primitives used by the session and CLI
pub trait Prompter {
    /// Pick one of `items`, returning its index
    fn select(&self, message: &str, items: &[String], default: usize) -> Result<usize>;

    /// Read a line of free text
    fn input(&self, message: &str, initial: Option<&str>) -> Result<String>;

    /// Yes/no question
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;
}

/// What happens when the user cancels a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelPolicy {
    /// Escape (or `q`) re-issues the same prompt instead of aborting it
    pub reprompt_on_escape: bool,
    /// Ctrl-C prints the closing message and exits the process
    pub exit_on_interrupt: bool,
}

impl Default for CancelPolicy {
    fn default() -> Self {
        Self {
            reprompt_on_escape: true,
            exit_on_interrupt: true,
        }
    }
}

/// dialoguer-backed prompter
pub struct TerminalPrompter {
    theme: ColorfulTheme,
    policy: CancelPolicy,
}

impl TerminalPrompter {
    pub fn new(policy: CancelPolicy) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            policy,
        }
    }

    pub fn policy(&self) -> CancelPolicy {
        self.policy
    }

    /// Resolve an escape: `Ok(())` means ask again
    fn on_escape(&self, message: &str) -> Result<()> {
        if self.policy.reprompt_on_escape {
            debug!(prompt = message, "escape swallowed, re-prompting");
            Ok(())
        } else {
            anyhow::bail!("Prompt cancelled: {}", message)
        }
    }

    fn on_error(&self, error: dialoguer::Error) -> anyhow::Error {
        match &error {
            dialoguer::Error::IO(io) if io.kind() == ErrorKind::Interrupted => {
                if self.policy.exit_on_interrupt {
                    colors::print_goodbye();
                    std::process::exit(0);
                }
                anyhow::anyhow!("Interrupted")
            }
            _ => anyhow::anyhow!("Terminal not available: {}", error),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new(CancelPolicy::default())
    }
}

impl Prompter for TerminalPrompter {
    fn select(&self, message: &str, items: &[String], default: usize) -> Result<usize> {
        loop {
            let result = Select::with_theme(&self.theme)
                .with_prompt(message)
                .items(items)
                .default(default)
                .interact_opt();

            match result {
                Ok(Some(index)) => return Ok(index),
                Ok(None) => self.on_escape(message)?,
                Err(e) => return Err(self.on_error(e)),
            }
        }
    }

    fn input(&self, message: &str, initial: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true);
        if let Some(text) = initial {
            input = input.with_initial_text(text);
        }
        input.interact_text().map_err(|e| self.on_error(e))
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        loop {
            let result = Confirm::with_theme(&self.theme)
                .with_prompt(message)
                .default(default)
                .interact_opt();

            match result {
                Ok(Some(answer)) => return Ok(answer),
                Ok(None) => self.on_escape(message)?,
                Err(e) => return Err(self.on_error(e)),
            }
        }
    }
}

/// Ask until the answer is non-empty after trimming
pub fn input_non_empty(
    prompter: &dyn Prompter,
    message: &str,
    initial: Option<&str>,
    retry_hint: &str,
) -> Result<String> {
    loop {
        let value = prompter.input(message, initial)?;
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
        println!("{}", colors::pink(retry_hint));
    }
}
