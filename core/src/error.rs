use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),
    #[error("Invalid configuration: {0}")]
    ConfigurationError(&'static str),
    #[error("Capacity must be at least 2, got {0}")]
    InvalidCapacity(usize),
    #[error("Capacity would exceed the maximum representable size")]
    CapacityOverflow,
}

pub type Result<T> = core::result::Result<T, GameError>;
