use thiserror::Error;

/// Result type for universe operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("type '{0}' is defined more than once")]
    DuplicateType(String),

    #[error("inheritance cycle through '{0}'")]
    CyclicInheritance(String),

    #[error("'{0}' is not a named type")]
    NotNamed(String),
}
