//! Sequence diagram extraction.
//!
//! Passes, in order:
//! 1. `participant` declarations;
//! 2. `actor` declarations;
//! 3. messages, synthesizing an implicit participant the first time an
//!    undeclared role is named;
//! 4. notes, each becoming its own node attached to one or two roles.

use winnow::{
    Parser as _,
    ascii::{space0, space1},
    combinator::{alt, opt, preceded},
    error::ModalResult,
    token::{one_of, rest},
};

use diagrammar_core::{Edge, Node, NodeKind};

use super::{Extractor, Rule, ScanContext, recognize};
use crate::{
    detect::HEADER_KEYWORDS,
    patterns::{self, MessageArrow, SEQUENCE_ARROWS},
};

/// Statements that carry no graph content.
const DIRECTIVES: &[&str] = &[
    "autonumber",
    "activate",
    "deactivate",
    "loop",
    "alt",
    "else",
    "opt",
    "par",
    "and",
    "critical",
    "break",
    "rect",
    "end",
    "title",
    "box",
    "create",
    "destroy",
    "link",
    "links",
];

const NOTE_KEYWORDS: &[&str] = &["Note", "note", "NOTE"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum SequenceFragment {
    Directive,
    Declaration {
        id: String,
        alias: Option<String>,
        kind: NodeKind,
    },
    Message {
        source: String,
        target: String,
        arrow: MessageArrow,
        text: Option<String>,
    },
    Note {
        participants: Vec<String>,
        text: String,
    },
}

const RULES: &[Rule<SequenceFragment>] = &[
    Rule {
        name: "header",
        matcher: header,
    },
    Rule {
        name: "participant",
        matcher: participant,
    },
    Rule {
        name: "actor",
        matcher: actor,
    },
    Rule {
        name: "note",
        matcher: note,
    },
    Rule {
        name: "message",
        matcher: message,
    },
    Rule {
        name: "directive",
        matcher: directive,
    },
];

fn header(input: &mut &str) -> ModalResult<SequenceFragment> {
    preceded(patterns::keywords(HEADER_KEYWORDS), rest)
        .value(SequenceFragment::Directive)
        .parse_next(input)
}

fn directive(input: &mut &str) -> ModalResult<SequenceFragment> {
    preceded(patterns::keywords(DIRECTIVES), rest)
        .value(SequenceFragment::Directive)
        .parse_next(input)
}

/// `<word> NAME [as ALIAS]`
fn declaration(
    input: &mut &str,
    word: &'static str,
    kind: NodeKind,
) -> ModalResult<SequenceFragment> {
    let (_, _, name, alias) = (
        patterns::keyword(word),
        space1,
        patterns::identifier,
        opt(preceded(
            (space1, patterns::keyword("as"), space1),
            patterns::rest_text,
        )),
    )
        .parse_next(input)?;

    let alias = alias
        .map(patterns::unquote)
        .filter(|alias| !alias.is_empty())
        .map(str::to_string);

    Ok(SequenceFragment::Declaration {
        id: name.to_string(),
        alias,
        kind,
    })
}

fn participant(input: &mut &str) -> ModalResult<SequenceFragment> {
    declaration(input, "participant", NodeKind::Participant)
}

fn actor(input: &mut &str) -> ModalResult<SequenceFragment> {
    declaration(input, "actor", NodeKind::Actor)
}

/// `Note over A[, B]: text`, `Note left of A: text`, `Note right of A: text`
fn note(input: &mut &str) -> ModalResult<SequenceFragment> {
    let _ = (patterns::keywords(NOTE_KEYWORDS), space1).parse_next(input)?;
    let _ = alt((
        patterns::keyword("over").void(),
        ("left", space1, "of").void(),
        ("right", space1, "of").void(),
    ))
    .parse_next(input)?;
    let first = preceded(space1, patterns::identifier).parse_next(input)?;
    let second = opt(preceded((space0, ',', space0), patterns::identifier)).parse_next(input)?;
    let text = preceded((space0, ':'), patterns::rest_text).parse_next(input)?;

    let participants = std::iter::once(first)
        .chain(second)
        .map(str::to_string)
        .collect();

    Ok(SequenceFragment::Note {
        participants,
        text: text.to_string(),
    })
}

/// `A ARROW B [: text]`, with an optional activation marker after the arrow.
fn message(input: &mut &str) -> ModalResult<SequenceFragment> {
    let source = patterns::identifier.parse_next(input)?;
    let arrow = preceded(space0, patterns::operator(SEQUENCE_ARROWS, false)).parse_next(input)?;
    let _ = opt(one_of(['+', '-'])).parse_next(input)?;
    let target = preceded(space0, patterns::identifier).parse_next(input)?;
    let text = patterns::colon_text.parse_next(input)?;

    Ok(SequenceFragment::Message {
        source: source.to_string(),
        target: target.to_string(),
        arrow,
        text: text.map(str::to_string),
    })
}

/// Extractor for sequence diagram sources.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SequenceExtractor;

impl Extractor for SequenceExtractor {
    fn scan(&self, ctx: &mut ScanContext, source: &str) {
        let fragments: Vec<SequenceFragment> = patterns::lines(source)
            .filter_map(|line| recognize(RULES, line))
            .collect();
        let graph = ctx.graph_mut();

        for declared_kind in [NodeKind::Participant, NodeKind::Actor] {
            for fragment in &fragments {
                let SequenceFragment::Declaration { id, alias, kind } = fragment else {
                    continue;
                };
                if *kind != declared_kind {
                    continue;
                }
                let label = alias.as_deref().unwrap_or(id);
                graph.declare(Node::new(id, label, *kind));
            }
        }

        for fragment in &fragments {
            let SequenceFragment::Message {
                source,
                target,
                arrow,
                text,
            } = fragment
            else {
                continue;
            };

            for role in [source, target] {
                graph.synthesize(role, NodeKind::ImplicitParticipant);
            }

            let (sender, receiver) = if arrow.reversed {
                (target, source)
            } else {
                (source, target)
            };
            let mut edge = Edge::new(sender, receiver, arrow.kind);
            if let Some(text) = text {
                edge.set_label(text);
            }
            graph.connect(edge);
        }

        let mut notes = 0usize;
        for fragment in &fragments {
            let SequenceFragment::Note { participants, text } = fragment else {
                continue;
            };

            let id = loop {
                let candidate = format!("note_{notes}");
                notes += 1;
                if !graph.contains(&candidate) {
                    break candidate;
                }
            };
            let kind = if participants.len() > 1 {
                NodeKind::NoteBetween
            } else {
                NodeKind::NoteOver
            };
            graph.declare(Node::new(id, text.trim(), kind).with_participants(participants.clone()));
        }
    }
}
