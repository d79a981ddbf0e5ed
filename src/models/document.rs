use std::fmt;

/// A document produced by one pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Prd,
    Trd,
    Todo,
}

impl DocumentKind {
    /// Output file name in the working directory
    pub fn file_name(&self) -> &'static str {
        match self {
            DocumentKind::Prd => "prd.md",
            DocumentKind::Trd => "trd.md",
            DocumentKind::Todo => "todo.md",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Prd => "제품요구사항문서",
            DocumentKind::Trd => "기술요구사항문서",
            DocumentKind::Todo => "개발 할일 목록",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DocumentKind::Prd => "PRD",
            DocumentKind::Trd => "TRD",
            DocumentKind::Todo => "TODO",
        };
        write!(f, "{}", s)
    }
}
