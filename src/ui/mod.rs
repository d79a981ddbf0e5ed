pub mod colors;
pub mod prompt;
pub mod spinner;

pub use prompt::{input_non_empty, CancelPolicy, Prompter, TerminalPrompter};
pub use spinner::Spinner;
