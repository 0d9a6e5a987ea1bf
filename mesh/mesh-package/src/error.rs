//! Error types for model packages.

use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for package operations.
pub type PackageResult<T> = Result<T, PackageError>;

/// Errors that can occur while building, saving or loading a package.
#[derive(Debug, Error)]
pub enum PackageError {
    /// An object with the same name is already in the package.
    #[error("object '{name}' already exists in package")]
    DuplicateName {
        /// The duplicate object name.
        name: String,
    },

    /// The mesh has no faces.
    #[error("object '{name}' has an empty mesh")]
    EmptyObject {
        /// Name of the rejected object.
        name: String,
    },

    /// Nothing to save.
    #[error("cannot save a package with no objects")]
    EmptyPackage,

    /// I/O error during file operations.
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// ZIP container error.
    #[error("zip error: {message}")]
    Zip {
        /// Error message.
        message: String,
    },

    /// XML serialization or parse error.
    #[error("XML error: {message}")]
    Xml {
        /// Error message.
        message: String,
    },

    /// The archive is readable but does not describe a valid model.
    #[error("invalid 3MF content: {message}")]
    InvalidContent {
        /// Description of the problem.
        message: String,
    },
}

impl PackageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn zip(err: impl Display) -> Self {
        Self::Zip {
            message: err.to_string(),
        }
    }

    pub(crate) fn xml(err: impl Display) -> Self {
        Self::Xml {
            message: err.to_string(),
        }
    }

    pub(crate) fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}
