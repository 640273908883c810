mod analyzer;
mod codegen;
mod lexer;
mod parser;

use std::fmt;

pub use analyzer::*;
pub use codegen::*;
pub use lexer::*;
pub use parser::*;

/// A stage of the compilation pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Lex,
    Parse,
    Semantic,
    Codegen,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Lex => write!(f, "lexing"),
            Stage::Parse => write!(f, "parsing"),
            Stage::Semantic => write!(f, "semantic analysis"),
            Stage::Codegen => write!(f, "code generation"),
        }
    }
}

/// A stage that did not run because an earlier one reported errors.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
#[error("{stage} skipped due to {cause} errors")]
pub struct Skipped {
    pub stage: Stage,
    pub cause: Stage,
}

impl Skipped {
    pub fn new(stage: Stage, cause: Stage) -> Self {
        Self { stage, cause }
    }
}
