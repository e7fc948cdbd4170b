//! Failure kinds shared by every edit operation.

use thiserror::Error;

/// Result type for edit operations.
pub type EditResult<T> = Result<T, EditError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("path not found: {path:?}")]
    PathNotFound { path: String },

    #[error("target at {path:?} is not an object")]
    NotAnObject { path: String },

    #[error("target at {path:?} is an array")]
    TargetIsArray { path: String },

    #[error("key {key:?} already exists at {path:?}")]
    KeyExists { path: String, key: String },
}

impl EditError {
    /// The path the failed precondition refers to.
    pub fn path(&self) -> &str {
        match self {
            EditError::PathNotFound { path }
            | EditError::NotAnObject { path }
            | EditError::TargetIsArray { path }
            | EditError::KeyExists { path, .. } => path,
        }
    }
}
