use thiserror::Error;

/// Completion barrier misuse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BarrierError {
    #[error("Barrier overflow: more than {expected} completion signals")]
    Overflow { expected: usize },
}

/// Poller configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollerError {
    #[error("Invalid poller configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, PollerError>;
