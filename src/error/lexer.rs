/// Errors encountered while tokenizing a program.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum LexError {
    #[error("line {line}:{column}: unrecognized token '{text}'")]
    UnrecognizedToken {
        text: String,
        line: usize,
        column: usize,
    },
    #[error("line {line}:{column}: unterminated string")]
    UnterminatedString { line: usize, column: usize },
    #[error("line {line}:{column}: invalid character '{ch}' in string")]
    InvalidStringChar { ch: char, line: usize, column: usize },
    #[error("line {line}:{column}: unterminated comment")]
    UnterminatedComment { line: usize, column: usize },
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum LexWarning {
    #[error("line {line}: missing end-of-program marker '$', one was added")]
    MissingEndOfProgram { line: usize },
}
