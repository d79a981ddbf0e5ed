pub mod document;
pub mod todo;
pub mod transcript;

pub use document::DocumentKind;
pub use todo::{
    CodeExample, DocumentMetadata, ExecutionOrder, FileChange, FileChangeType, GlobalConsiderations,
    ImplementationGuide, Phase, Priority, ProjectInfo, Risk, Subtask, Task, TaskStatus, TodoDocument,
};
pub use transcript::{Exchange, Question, QuestionSet, Transcript};
