//! Errors raised while building a structure document.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    #[error("slot {slot} holds no item")]
    EmptySlot { slot: usize },

    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

/// Errors from assembling mnemonic source. Line numbers are 1-based and
/// point at the source line that caused the failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("line {line}: unknown instruction '{text}'")]
    UnknownInstruction { line: usize, text: String },

    #[error("line {line}: malformed macro definition '{text}'")]
    MalformedDefinition { line: usize, text: String },

    #[error("line {line}: macro '{name}' has no 'end'")]
    UnterminatedMacro { line: usize, name: String },

    #[error("line {line}: macro '{name}' is already defined")]
    DuplicateMacro { line: usize, name: String },

    #[error("line {line}: unknown macro '{name}'")]
    UnknownMacro { line: usize, name: String },

    #[error("line {line}: macro '{name}' takes {expected} arguments, got {got}")]
    ArgumentCount {
        line: usize,
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("line {line}: argument '{arg}' to macro '{name}' is not an instruction")]
    InvalidArgument {
        line: usize,
        name: String,
        arg: String,
    },

    #[error("line {line}: macros nested deeper than {limit}")]
    ExpansionTooDeep { line: usize, limit: usize },

    #[error("program expands past {limit} instructions")]
    ProgramTooLarge { limit: usize },
}
