//! Supported diagram notations.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the diagram notations the parser understands.
///
/// The declaration order is also the detection priority: when a source
/// contains markers for several dialects, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Flowchart notation: boxes joined by arrows.
    Flow,
    /// Sequence notation: roles exchanging messages.
    Sequence,
    /// Class notation: classes, members and structural relations.
    Class,
}

impl Dialect {
    /// All dialects in detection priority order.
    pub const ALL: [Dialect; 3] = [Dialect::Flow, Dialect::Sequence, Dialect::Class];

    /// Returns the short lowercase name of this dialect.
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Flow => "flow",
            Dialect::Sequence => "sequence",
            Dialect::Class => "class",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known [`Dialect`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dialect `{0}`")]
pub struct UnknownDialect(String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flow" | "flowchart" => Ok(Dialect::Flow),
            "sequence" | "sequenceDiagram" => Ok(Dialect::Sequence),
            "class" | "classDiagram" => Ok(Dialect::Class),
            other => Err(UnknownDialect(other.to_string())),
        }
    }
}
