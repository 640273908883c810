use std::fmt;

use crate::lexer::{Token, TokenKind};

/// What a grammar rule was looking for when it failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expected {
    Token(TokenKind),
    Statement,
    Expression,
    BooleanExpression,
    BooleanOperator,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::Statement => write!(f, "statement"),
            Expected::Expression => write!(f, "expression"),
            Expected::BooleanExpression => write!(f, "boolean expression"),
            Expected::BooleanOperator => write!(f, "'==' or '!='"),
        }
    }
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("line {line}:{column}: expected {expected}, found {found} [{literal}]")]
    Unexpected {
        expected: Expected,
        found: TokenKind,
        literal: String,
        line: usize,
        column: usize,
    },
    #[error("line {line}: expected {expected}, found unexpected end of stream")]
    UnexpectedEndOfStream { expected: Expected, line: usize },
}

impl SyntaxError {
    pub fn unexpected(expected: Expected, token: &Token) -> Self {
        SyntaxError::Unexpected {
            expected,
            found: token.kind,
            literal: token.literal.clone(),
            line: token.line,
            column: token.column,
        }
    }

    pub fn expected(&self) -> Expected {
        match self {
            SyntaxError::Unexpected { expected, .. }
            | SyntaxError::UnexpectedEndOfStream { expected, .. } => *expected,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            SyntaxError::Unexpected { line, .. } | SyntaxError::UnexpectedEndOfStream { line, .. } => {
                *line
            }
        }
    }
}
