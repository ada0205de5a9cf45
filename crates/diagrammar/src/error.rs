//! Error types for Diagrammar operations.
//!
//! [`DiagrammarError`] covers everything that can go wrong *around* the
//! parser: reading the source, enforcing limits, loading configuration and
//! writing output. Diagram content itself never produces an error; see
//! [`diagrammar_parser::Parser::parse`].

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for Diagrammar operations.
#[derive(Debug, Error)]
pub enum DiagrammarError {
    #[error("failed to read `{}`: {source}", path.display())]
    SourceRead { path: PathBuf, source: io::Error },

    #[error("`{}` does not have a supported diagram extension", path.display())]
    UnsupportedExtension { path: PathBuf },

    #[error("source is {size} bytes, over the {limit} byte limit")]
    SourceTooLarge { size: usize, limit: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for DiagrammarError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl DiagrammarError {
    /// Stable code for documentation and searchability.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SourceRead { .. } => "diagrammar::source_read",
            Self::UnsupportedExtension { .. } => "diagrammar::unsupported_extension",
            Self::SourceTooLarge { .. } => "diagrammar::source_too_large",
            Self::Io(_) => "diagrammar::io",
            Self::Config(_) => "diagrammar::config",
            Self::Export(_) => "diagrammar::export",
        }
    }

    /// Suggestion for the user, when there is one.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            Self::SourceRead { .. } => Some("check that the file exists and is readable"),
            Self::UnsupportedExtension { .. } => {
                Some("rename the file or add its extension to `parser.extensions`")
            }
            Self::SourceTooLarge { .. } => Some("raise `parser.max_source_bytes` in the config"),
            Self::Config(_) => Some("check the configuration file syntax"),
            Self::Io(_) | Self::Export(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_read_display() {
        let err = DiagrammarError::SourceRead {
            path: PathBuf::from("missing.mmd"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "failed to read `missing.mmd`: no such file");
        assert_eq!(err.code(), "diagrammar::source_read");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_too_large_display() {
        let err = DiagrammarError::SourceTooLarge { size: 10, limit: 4 };
        assert_eq!(err.to_string(), "source is 10 bytes, over the 4 byte limit");
        assert!(err.help().is_some());
    }
}
