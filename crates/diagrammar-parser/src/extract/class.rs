//! Class diagram extraction.
//!
//! A `class Name {` line opens a body that runs until the next line starting
//! with `}`; the whole block is recognized as one statement.
//!
//! Passes, in order:
//! 1. class declarations with their members;
//! 2. relations, canonicalized through the operator table;
//! 3. `Name : member` shorthand;
//! 4. stereotypes, attached only to classes that already exist.

use std::borrow::Cow;

use log::trace;
use winnow::{
    Parser as _,
    ascii::{space0, space1},
    combinator::{delimited, opt, preceded},
    error::ModalResult,
    token::{rest, take_till, take_until},
};

use diagrammar_core::{Edge, Member, Node, NodeKind, Visibility};

use super::{Extractor, Rule, ScanContext, recognize};
use crate::{
    detect::HEADER_KEYWORDS,
    patterns::{self, CLASS_RELATIONS, RelationOperator},
};

/// Statements that carry no graph content.
const DIRECTIVES: &[&str] = &[
    "direction",
    "note",
    "namespace",
    "}",
    "classDef",
    "style",
    "cssClass",
    "click",
    "link",
    "callback",
];

/// One line of a class body.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BodyItem {
    Attribute(Member),
    Method(Member),
    Stereotype(String),
}

impl BodyItem {
    /// Classify a body line. Blank lines yield `None`.
    fn classify(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let mut input = line;
        if let Ok(text) = patterns::stereotype.parse_next(&mut input) {
            if input.trim().is_empty() {
                return Some(BodyItem::Stereotype(text.to_string()));
            }
        }

        let mut chars = line.chars();
        let (visibility, name) = match chars.next().and_then(Visibility::from_sigil) {
            Some(visibility) => (visibility, chars.as_str().trim()),
            None => (Visibility::default(), line),
        };
        if name.is_empty() {
            return None;
        }

        let member = Member::new(name, visibility);
        Some(if name.contains('(') {
            BodyItem::Method(member)
        } else {
            BodyItem::Attribute(member)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ClassFragment {
    Directive,
    Class {
        id: String,
        label: Option<String>,
        stereotype: Option<String>,
        body: Vec<BodyItem>,
    },
    Annotation {
        id: String,
        stereotype: String,
    },
    Relation {
        source: String,
        target: String,
        operator: RelationOperator,
        label: Option<String>,
    },
    Member {
        id: String,
        item: BodyItem,
    },
}

const RULES: &[Rule<ClassFragment>] = &[
    Rule {
        name: "header",
        matcher: header,
    },
    Rule {
        name: "class",
        matcher: class_declaration,
    },
    Rule {
        name: "annotation",
        matcher: annotation,
    },
    Rule {
        name: "relation",
        matcher: relation,
    },
    Rule {
        name: "member",
        matcher: member,
    },
    Rule {
        name: "directive",
        matcher: directive,
    },
];

fn header(input: &mut &str) -> ModalResult<ClassFragment> {
    preceded(patterns::keywords(HEADER_KEYWORDS), rest)
        .value(ClassFragment::Directive)
        .parse_next(input)
}

fn directive(input: &mut &str) -> ModalResult<ClassFragment> {
    preceded(patterns::keywords(DIRECTIVES), rest)
        .value(ClassFragment::Directive)
        .parse_next(input)
}

/// `class Name[~T~]["Label"] [<<stereotype>>] [{ body }]`
fn class_declaration(input: &mut &str) -> ModalResult<ClassFragment> {
    let id = preceded((patterns::keyword("class"), space1), patterns::identifier).parse_next(input)?;
    let _ = opt(delimited('~', take_till(0.., '~'), '~')).parse_next(input)?;
    let label = opt(delimited('[', take_until(0.., "]"), ']')).parse_next(input)?;
    let stereotype = opt(preceded(space0, patterns::stereotype)).parse_next(input)?;
    let body = opt(preceded(space0, delimited('{', take_till(0.., '}'), opt('}')))).parse_next(input)?;

    let label = label
        .map(patterns::unquote)
        .filter(|label| !label.is_empty())
        .map(str::to_string);
    let body = body
        .map(|body| body.lines().filter_map(BodyItem::classify).collect())
        .unwrap_or_default();

    Ok(ClassFragment::Class {
        id: id.to_string(),
        label,
        stereotype: stereotype.map(str::to_string),
        body,
    })
}

/// `<<stereotype>> Name`
fn annotation(input: &mut &str) -> ModalResult<ClassFragment> {
    let (stereotype, _, id) =
        (patterns::stereotype, space0, patterns::identifier).parse_next(input)?;

    Ok(ClassFragment::Annotation {
        id: id.to_string(),
        stereotype: stereotype.to_string(),
    })
}

/// `A ["card"] OP ["card"] B [: label]`
fn relation(input: &mut &str) -> ModalResult<ClassFragment> {
    let source = patterns::identifier.parse_next(input)?;
    let _ = opt(preceded(space0, patterns::quoted)).parse_next(input)?;
    let operator = preceded(space0, patterns::operator(CLASS_RELATIONS, true)).parse_next(input)?;
    let _ = opt(preceded(space0, patterns::quoted)).parse_next(input)?;
    let target = preceded(space0, patterns::identifier).parse_next(input)?;
    let label = patterns::colon_text.parse_next(input)?;

    Ok(ClassFragment::Relation {
        source: source.to_string(),
        target: target.to_string(),
        operator,
        label: label.map(str::to_string),
    })
}

/// `Name : member`
fn member(input: &mut &str) -> ModalResult<ClassFragment> {
    let id = patterns::identifier.parse_next(input)?;
    let item = preceded((space0, ':'), patterns::rest_text)
        .verify_map(BodyItem::classify)
        .parse_next(input)?;

    Ok(ClassFragment::Member {
        id: id.to_string(),
        item,
    })
}

/// Extractor for class diagram sources.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ClassExtractor;

impl ClassExtractor {
    /// Meaningful lines, with each multi-line `class Name {` block joined
    /// into a single statement. An unterminated block runs to the end.
    fn statements(source: &str) -> Vec<Cow<'_, str>> {
        let mut statements = Vec::new();
        let mut block: Option<String> = None;

        for line in patterns::lines(source) {
            if let Some(open) = block.as_mut() {
                open.push('\n');
                open.push_str(line);
                if line.starts_with('}') {
                    statements.extend(block.take().map(Cow::Owned));
                }
                continue;
            }

            let opens_body = line.ends_with('{') && line.split_whitespace().next() == Some("class");
            if opens_body {
                block = Some(line.to_string());
            } else {
                statements.push(Cow::Borrowed(line));
            }
        }
        statements.extend(block.map(Cow::Owned));

        statements
    }
}

impl Extractor for ClassExtractor {
    fn scan(&self, ctx: &mut ScanContext, source: &str) {
        let fragments: Vec<ClassFragment> = Self::statements(source)
            .iter()
            .filter_map(|statement| recognize(RULES, statement))
            .collect();
        let graph = ctx.graph_mut();
        let mut stereotypes: Vec<(&str, &str)> = Vec::new();

        for fragment in &fragments {
            let ClassFragment::Class {
                id,
                label,
                stereotype,
                body,
            } = fragment
            else {
                continue;
            };

            let mut node = Node::new(id, label.as_deref().unwrap_or(id), NodeKind::Class);
            stereotypes.extend(stereotype.as_deref().map(|text| (id.as_str(), text)));
            for item in body {
                match item {
                    BodyItem::Attribute(member) => node.push_attribute(member.clone()),
                    BodyItem::Method(member) => node.push_method(member.clone()),
                    BodyItem::Stereotype(text) => stereotypes.push((id.as_str(), text.as_str())),
                }
            }
            graph.declare(node);
        }

        for fragment in &fragments {
            let ClassFragment::Relation {
                source,
                target,
                operator,
                label,
            } = fragment
            else {
                continue;
            };

            let (source, target) = if operator.swap {
                (target, source)
            } else {
                (source, target)
            };
            let mut edge = Edge::new(source, target, operator.kind);
            if let Some(label) = label {
                edge.set_label(label);
            }
            graph.connect(edge);
        }

        for fragment in &fragments {
            match fragment {
                ClassFragment::Member { id, item } => {
                    let mut node = Node::unlabeled(id, NodeKind::Class);
                    match item {
                        BodyItem::Attribute(member) => node.push_attribute(member.clone()),
                        BodyItem::Method(member) => node.push_method(member.clone()),
                        BodyItem::Stereotype(text) => stereotypes.push((id.as_str(), text.as_str())),
                    }
                    graph.declare(node);
                }
                ClassFragment::Annotation { id, stereotype } => {
                    stereotypes.push((id.as_str(), stereotype.as_str()));
                }
                _ => {}
            }
        }

        for (id, text) in stereotypes {
            match graph.node_mut(id) {
                Some(node) if node.kind() == NodeKind::Class => node.set_stereotype(text),
                _ => trace!(id, stereotype = text; "Dropping stereotype for unknown class"),
            }
        }
    }
}
