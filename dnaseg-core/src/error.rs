//! Error taxonomy shared by every per-file pipeline

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;

/// Failure (or no-op outcome) of processing one input file
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Malformed input in {}: {message}", path.display())]
    MalformedInput { path: PathBuf, message: String },

    #[error("No sequence data after alignment for {}", path.display())]
    NoSequenceData { path: PathBuf },

    #[error("Nothing to plot for {}: {message}", path.display())]
    Empty { path: PathBuf, message: String },

    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalysisError {
    pub fn not_found<P: AsRef<Path>>(path: P) -> Self {
        Self::NotFound { path: path.as_ref().to_path_buf() }
    }

    pub fn malformed<P: AsRef<Path>, S: Into<String>>(path: P, message: S) -> Self {
        Self::MalformedInput {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn no_sequence_data<P: AsRef<Path>>(path: P) -> Self {
        Self::NoSequenceData { path: path.as_ref().to_path_buf() }
    }

    pub fn empty<P: AsRef<Path>, S: Into<String>>(path: P, message: S) -> Self {
        Self::Empty {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn invalid_parameter<S: Into<String>>(message: S) -> Self {
        Self::InvalidParameter { message: message.into() }
    }

    /// Map an I/O error, turning "not found" into [`AnalysisError::NotFound`]
    pub fn io<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// `Empty` is a no-op outcome, not a failure
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}
