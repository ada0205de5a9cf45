//! Dialect detection.
//!
//! Detection is a plain substring search over the raw text, not a lexical
//! scan: a marker counts wherever it appears. Dialects are tried in
//! [`Dialect::ALL`] order and the first one with any marker present wins, so
//! a source mentioning both `classDiagram` and `flowchart` is a flowchart no
//! matter which marker comes first.

use log::{debug, trace};

use diagrammar_core::Dialect;

/// Marker keywords for each dialect.
const MARKERS: &[(Dialect, &[&str])] = &[
    (
        Dialect::Flow,
        &[
            "flowchart", "graph TD", "graph TB", "graph BT", "graph LR", "graph RL",
        ],
    ),
    (Dialect::Sequence, &["sequenceDiagram"]),
    (Dialect::Class, &["classDiagram"]),
];

/// Header keywords that open a diagram, skipped by the extractors.
pub(crate) const HEADER_KEYWORDS: &[&str] = &[
    "flowchart",
    "graph",
    "sequenceDiagram",
    "classDiagram",
    "classDiagram-v2",
];

/// Detect the dialect of `source`.
///
/// Returns `None` when no marker of any supported dialect occurs in the text.
pub fn detect_dialect(source: &str) -> Option<Dialect> {
    let detected = MARKERS.iter().find_map(|(dialect, markers)| {
        let marker = markers.iter().find(|marker| source.contains(**marker))?;
        trace!(dialect:%, marker = *marker; "Dialect marker found");
        Some(*dialect)
    });

    match detected {
        Some(dialect) => debug!(dialect:%; "Detected diagram dialect"),
        None => debug!("No dialect marker found"),
    }

    detected
}
