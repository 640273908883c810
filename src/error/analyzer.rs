use std::fmt;

use crate::analyzer::{ScopeId, Ty};

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum SemanticError {
    #[error("line {line}:{column}: undeclared variable [{name}] assigned before declaration")]
    UndeclaredAssignment {
        name: char,
        line: usize,
        column: usize,
    },
    #[error("line {line}:{column}: undeclared variable [{name}] used before declaration")]
    UndeclaredUse {
        name: char,
        line: usize,
        column: usize,
    },
}

impl SemanticError {
    pub fn line(&self) -> usize {
        match self {
            SemanticError::UndeclaredAssignment { line, .. }
            | SemanticError::UndeclaredUse { line, .. } => *line,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarningKind {
    UnusedButInitialized,
    NeverInitializedOrUsed,
    UsedButNeverInitialized,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::UnusedButInitialized => write!(f, "initialized but never used"),
            WarningKind::NeverInitializedOrUsed => write!(f, "declared but never initialized or used"),
            WarningKind::UsedButNeverInitialized => write!(f, "used but never initialized"),
        }
    }
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("line {line}:{column}: {ty} variable [{name}] in scope {scope} was {kind}")]
pub struct SemanticWarning {
    pub kind: WarningKind,
    pub name: char,
    pub ty: Ty,
    pub scope: ScopeId,
    pub line: usize,
    pub column: usize,
}
