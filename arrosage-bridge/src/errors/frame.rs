/// A line that could not be decoded into a sensor reading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("Malformed frame: expected {expected} fields, found {found}")]
    FieldCount { expected: &'static str, found: usize },

    #[error("Malformed frame: {field} is not a non-negative integer ({value:?})")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Malformed frame: pump state must be 0 or 1 ({0:?})")]
    InvalidPumpState(String),

    #[error("Malformed frame: unknown mode {0:?}")]
    UnknownMode(String),
}
