pub mod schema;

pub use schema::{question_schema, todo_schema, validate_against, QUESTION_SCHEMA_NAME, TODO_SCHEMA_NAME};
