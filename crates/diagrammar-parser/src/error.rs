//! Reasons a parse produced no graph.
//!
//! These never escape [`Parser::parse`](crate::Parser::parse), which degrades
//! every failure to an empty graph. They are returned by
//! [`Parser::try_parse`](crate::Parser::try_parse) for callers that want to
//! tell the user *why* nothing was extracted.

use thiserror::Error;

use diagrammar_core::Dialect;

/// Why a source yielded an empty graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No supported dialect keyword occurs anywhere in the source.
    #[error("no supported diagram type found")]
    UnsupportedDialect,

    /// A dialect was recognized but nothing could be extracted for it.
    #[error("{dialect} diagram contains no recognizable entities or relations")]
    EmptyExtraction { dialect: Dialect },
}

impl ParseError {
    /// Stable code for documentation and searchability.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnsupportedDialect => "diagrammar::unsupported_dialect",
            ParseError::EmptyExtraction { .. } => "diagrammar::empty_extraction",
        }
    }

    /// Suggestion for fixing the source.
    pub fn help(&self) -> &'static str {
        match self {
            ParseError::UnsupportedDialect => {
                "start the diagram with `flowchart`, `sequenceDiagram` or `classDiagram`"
            }
            ParseError::EmptyExtraction { dialect } => match dialect {
                Dialect::Flow => "declare nodes like `A[Label]` or link them with `A --> B`",
                Dialect::Sequence => {
                    "declare roles with `participant` or send messages like `A->>B: hi`"
                }
                Dialect::Class => "declare classes with `class Name` or relate them with `A <|-- B`",
            },
        }
    }
}
