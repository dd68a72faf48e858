use thiserror::Error;

/// Errors produced while parsing path data.
///
/// Offsets are byte offsets into the path string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("path data is empty")]
    Empty,

    #[error("unexpected character `{found}` at offset {offset}")]
    UnexpectedCharacter { found: char, offset: usize },

    #[error("unsupported path command `{command}` at offset {offset}")]
    UnknownCommand { command: char, offset: usize },

    #[error("number at offset {offset} is not finite")]
    NonFiniteNumber { offset: usize },

    #[error("number at offset {offset} is not preceded by a command")]
    MissingCommand { offset: usize },

    #[error("command `{command}` at offset {offset} expects {expected} numeric arguments")]
    MissingArguments {
        command: char,
        expected: usize,
        offset: usize,
    },

    #[error("arc flag at offset {offset} must be 0 or 1, found {value}")]
    InvalidFlag { value: f64, offset: usize },
}
