//! Configuration types for Diagrammar.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from TOML
//! (or any other serde format) by the embedding application.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining parser and output settings.
//! - [`ParserConfig`] - Source limits, forced dialect, accepted file extensions.
//! - [`OutputConfig`] - Which JSON shape [`GraphBuilder::export`] produces.
//!
//! # Example
//!
//! ```
//! # use diagrammar::config::{AppConfig, OutputFormat};
//! let config = AppConfig::default();
//! assert_eq!(config.output().format(), OutputFormat::Full);
//! assert!(config.parser().dialect().is_none());
//! ```
//!
//! [`GraphBuilder::export`]: crate::GraphBuilder::export

use std::path::Path;

use serde::Deserialize;

use diagrammar_core::Dialect;

/// Default upper bound on source size, in bytes.
pub const DEFAULT_MAX_SOURCE_BYTES: usize = 4 * 1024 * 1024;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(parser: ParserConfig, output: OutputConfig) -> Self {
        Self { parser, output }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns the output configuration for modification.
    pub fn output_mut(&mut self) -> &mut OutputConfig {
        &mut self.output
    }
}

/// Settings applied before and during parsing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Sources larger than this are rejected before parsing. `None` or `0`
    /// disables the limit; `0` is the only way to do so from TOML.
    max_source_bytes: Option<usize>,

    /// Skip detection and always parse as this dialect.
    dialect: Option<Dialect>,

    /// File extensions accepted by [`GraphBuilder::parse_file`]. Empty
    /// accepts everything.
    ///
    /// [`GraphBuilder::parse_file`]: crate::GraphBuilder::parse_file
    extensions: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_source_bytes: Some(DEFAULT_MAX_SOURCE_BYTES),
            dialect: None,
            extensions: ["mmd", "mermaid", "txt"].map(String::from).to_vec(),
        }
    }
}

impl ParserConfig {
    /// Replace the source size limit. `None` or `Some(0)` removes it.
    pub fn with_max_source_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_source_bytes = limit;
        self
    }

    /// Force a dialect instead of detecting one.
    pub fn with_dialect(mut self, dialect: Option<Dialect>) -> Self {
        self.dialect = dialect;
        self
    }

    /// Replace the accepted file extensions.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the source size limit, if any.
    pub fn max_source_bytes(&self) -> Option<usize> {
        self.max_source_bytes.filter(|&limit| limit > 0)
    }

    /// Returns the forced dialect, if any.
    pub fn dialect(&self) -> Option<Dialect> {
        self.dialect
    }

    /// Returns the accepted file extensions.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether `path` has one of the accepted extensions (case-insensitive).
    pub fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(ext))
            })
    }
}

/// JSON shape produced by the exporter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The full graph: typed nodes with members, typed edges.
    #[default]
    Full,
    /// The simplified `{nodes:[{id,label}], edges:[{from,to,label}]}` shape.
    Wire,
}

/// Output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    format: OutputFormat,
    pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: true,
        }
    }
}

impl OutputConfig {
    /// Creates a new [`OutputConfig`].
    pub fn new(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }

    /// Returns the output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns whether JSON is pretty-printed.
    pub fn pretty(&self) -> bool {
        self.pretty
    }

    /// Override the output format.
    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.max_source_bytes(), Some(DEFAULT_MAX_SOURCE_BYTES));
        assert!(config.accepts(Path::new("flow.mmd")));
        assert!(config.accepts(Path::new("FLOW.MMD")));
        assert!(!config.accepts(Path::new("flow.png")));
        assert!(!config.accepts(Path::new("flow")));
    }

    #[test]
    fn test_empty_extension_list_accepts_all() {
        let config = ParserConfig::default().with_extensions(Vec::<String>::new());
        assert!(config.accepts(Path::new("anything.bin")));
    }

    #[test]
    fn test_zero_limit_is_unlimited() {
        let config: ParserConfig =
            serde_json::from_str(r#"{"max_source_bytes": 0}"#).expect("config should deserialize");
        assert_eq!(config.max_source_bytes(), None);
        assert_eq!(ParserConfig::default().with_max_source_bytes(Some(0)).max_source_bytes(), None);
        assert_eq!(ParserConfig::default().with_max_source_bytes(None).max_source_bytes(), None);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AppConfig = serde_json::from_str(
            r#"{"parser": {"dialect": "sequence"}, "output": {"format": "wire"}}"#,
        )
        .expect("config should deserialize");

        assert_eq!(config.parser().dialect(), Some(Dialect::Sequence));
        assert_eq!(
            config.parser().max_source_bytes(),
            Some(DEFAULT_MAX_SOURCE_BYTES)
        );
        assert_eq!(config.output().format(), OutputFormat::Wire);
        assert!(config.output().pretty());
    }
}
