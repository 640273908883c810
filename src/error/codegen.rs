use super::Skipped;

#[derive(thiserror::Error, Debug)]
pub enum CodegenError {
    #[error(transparent)]
    Skipped(#[from] Skipped),
    #[error(
        "program does not fit in memory: {code} bytes of code, {statics} static cells and {heap} bytes of heap exceed {limit} bytes"
    )]
    OutOfMemory {
        code: usize,
        statics: usize,
        heap: usize,
        limit: usize,
    },
    #[error("string literal of {len} characters does not fit next to {heap} bytes of staged strings")]
    StringTooLong { len: usize, heap: usize },
    /// Internal compiler error, should never happen
    #[error("CompilerInternalError: {0}")]
    Internal(#[from] anyhow::Error),
}
