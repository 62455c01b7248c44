use thiserror::Error;

use crate::binding::BindingKind;

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Unknown binding: {0}")]
    UnknownBinding(String),

    #[error("Binding registered twice: {0}")]
    DuplicateBinding(String),

    #[error("Binding {name} is {actual:?}, operation requires {expected:?}")]
    TypeMismatch {
        name: String,
        expected: BindingKind,
        actual: BindingKind,
    },

    #[error("Note {index} has invalid time {time}")]
    InvalidNoteTime { index: usize, time: f64 },

    #[error("Note {index} at {time}s is earlier than the previous note at {previous}s")]
    UnsortedScript {
        index: usize,
        time: f64,
        previous: f64,
    },

    #[error("Invalid fret value: {0}")]
    InvalidFret(i32),
}

pub type Result<T> = std::result::Result<T, InputError>;
