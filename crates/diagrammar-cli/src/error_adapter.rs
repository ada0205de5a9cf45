//! Error adapter for converting Diagrammar errors to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Hard failures come
//! from [`DiagrammarError`]; an empty extraction is not a failure, but its
//! [`ParseError`] reason is still worth showing as a warning.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, Severity};

use diagrammar::{DiagrammarError, ParseError};

/// Adapter for [`DiagrammarError`].
pub struct ErrorAdapter<'a>(pub &'a DiagrammarError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.0.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.0
            .help()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }
}

/// Adapter for the reason a source produced an empty graph.
#[derive(Debug)]
pub struct EmptyGraphAdapter(pub ParseError);

impl fmt::Display for EmptyGraphAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for EmptyGraphAdapter {}

impl MietteDiagnostic for EmptyGraphAdapter {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.0.code()))
    }

    fn severity(&self) -> Option<Severity> {
        Some(Severity::Warning)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.0.help()))
    }
}

/// Something the CLI reports through miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A failure that stopped the run.
    Error(ErrorAdapter<'a>),
    /// A run that succeeded but extracted nothing.
    Empty(EmptyGraphAdapter),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Error(e) => fmt::Display::fmt(e, f),
            Reportable::Empty(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Error(e) => std::error::Error::source(e),
            Reportable::Empty(_) => None,
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Error(e) => e.code(),
            Reportable::Empty(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<Severity> {
        match self {
            Reportable::Error(e) => e.severity(),
            Reportable::Empty(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Error(e) => e.help(),
            Reportable::Empty(e) => e.help(),
        }
    }
}

impl<'a> From<&'a DiagrammarError> for Reportable<'a> {
    fn from(err: &'a DiagrammarError) -> Self {
        Reportable::Error(ErrorAdapter(err))
    }
}

impl From<ParseError> for Reportable<'_> {
    fn from(reason: ParseError) -> Self {
        Reportable::Empty(EmptyGraphAdapter(reason))
    }
}

/// Render `reportable` with miette's graphical handler.
pub fn render(reportable: &Reportable<'_>) -> String {
    let mut writer = String::new();
    if let Err(err) = miette::GraphicalReportHandler::new().render_report(&mut writer, reportable) {
        return format!("{reportable} (failed to render diagnostic: {err})");
    }
    writer
}
