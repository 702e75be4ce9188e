use std::path::PathBuf;

use thiserror::Error;

/// Result type for code generation
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot resolve type '{ty}': {reason}")]
    UnresolvableType { ty: String, reason: String },

    #[error("invalid {context} name '{name}': {reason}")]
    InvalidName {
        name: String,
        context: &'static str,
        reason: String,
    },

    #[error("failed to write '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl Error {
    pub(crate) fn unresolvable(ty: impl ToString, reason: impl Into<String>) -> Self {
        Self::UnresolvableType {
            ty: ty.to_string(),
            reason: reason.into(),
        }
    }
}
