use thiserror::Error;

pub type Result<T> = std::result::Result<T, RlError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RlError {
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid state or action: ({state}, {action})")]
    InvalidStateOrAction { state: String, action: String },

    #[error("Hyperparameter {name} = {value} is outside [0, 1]")]
    InvalidHyperparameter { name: &'static str, value: f64 },

    #[error("A space needs at least one name")]
    EmptySpace,

    #[error("Duplicate name in space: {0}")]
    DuplicateName(String),

    #[error("Expected a {rows}x{cols} table, got {len} values")]
    ShapeMismatch { rows: usize, cols: usize, len: usize },
}
