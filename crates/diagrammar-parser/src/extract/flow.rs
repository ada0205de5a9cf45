//! Flowchart extraction.
//!
//! Statements are node declarations (`A[Label]`), link chains
//! (`A --> B -.-> C`) or a mix of both (`A[Start] --> B[Process]`). Labeled
//! links come in two spellings, `A -- text --> B` and `A -->|text| B`.
//!
//! Passes, in order:
//! 1. entities: every node reference carrying a bracketed label;
//! 2. relations: every unlabeled link;
//! 3. labels: every labeled link, merged onto the first existing edge for the
//!    same endpoint pair or appended as a new edge.
//!
//! Endpoints never declared with a label are closed with implicit nodes when
//! the assembler finishes.

use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{alt, opt, preceded, repeat},
    error::{ContextError, ErrMode, ModalResult},
    token::rest,
};

use diagrammar_core::{Edge, EdgeKind, Node, NodeKind};

use super::{Extractor, Rule, ScanContext, recognize};
use crate::{detect::HEADER_KEYWORDS, patterns};

/// Statements that carry no graph content.
const DIRECTIVES: &[&str] = &[
    "subgraph",
    "end",
    "direction",
    "style",
    "classDef",
    "class",
    "linkStyle",
    "click",
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeRef {
    id: String,
    label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Link {
    source: String,
    target: String,
    style: EdgeKind,
    label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FlowFragment {
    Directive,
    Chain { nodes: Vec<NodeRef>, links: Vec<Link> },
}

const RULES: &[Rule<FlowFragment>] = &[
    Rule {
        name: "header",
        matcher: header,
    },
    Rule {
        name: "directive",
        matcher: directive,
    },
    Rule {
        name: "chain",
        matcher: chain,
    },
];

fn header(input: &mut &str) -> ModalResult<FlowFragment> {
    preceded(patterns::keywords(HEADER_KEYWORDS), rest)
        .value(FlowFragment::Directive)
        .parse_next(input)
}

fn directive(input: &mut &str) -> ModalResult<FlowFragment> {
    preceded(patterns::keywords(DIRECTIVES), rest)
        .value(FlowFragment::Directive)
        .parse_next(input)
}

/// `id`, optionally followed by a bracketed label and a `:::class` suffix.
fn node_ref(input: &mut &str) -> ModalResult<NodeRef> {
    let id = patterns::identifier.parse_next(input)?;
    let label = opt(patterns::bracket_label).parse_next(input)?;
    let _ = opt(preceded(":::", patterns::bare_identifier)).parse_next(input)?;

    Ok(NodeRef {
        id: id.to_string(),
        label: label.map(str::to_string),
    })
}

/// One arrow of a chain: its style and optional label.
fn arrow<'s>(input: &mut &'s str) -> ModalResult<(EdgeKind, Option<&'s str>)> {
    alt((
        patterns::flow_inline_label.map(|(label, style)| (style, Some(label))),
        (patterns::flow_arrow, opt(patterns::pipe_label)),
    ))
    .parse_next(input)
}

/// A node reference followed by any number of `arrow node` steps.
fn chain(input: &mut &str) -> ModalResult<FlowFragment> {
    let first = node_ref.parse_next(input)?;
    let steps: Vec<((EdgeKind, Option<&str>), NodeRef)> =
        repeat(0.., (preceded(space0, arrow), preceded(space0, node_ref))).parse_next(input)?;

    if steps.is_empty() && first.label.is_none() {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }

    let mut links = Vec::with_capacity(steps.len());
    let mut nodes = Vec::with_capacity(steps.len() + 1);
    let mut source = first.id.clone();
    nodes.push(first);

    for ((style, label), node) in steps {
        links.push(Link {
            source: source.clone(),
            target: node.id.clone(),
            style,
            label: label.map(str::to_string),
        });
        source = node.id.clone();
        nodes.push(node);
    }

    Ok(FlowFragment::Chain { nodes, links })
}

/// Extractor for flowchart sources.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct FlowExtractor;

impl FlowExtractor {
    fn recognize_all(source: &str) -> (Vec<NodeRef>, Vec<Link>) {
        let mut nodes = Vec::new();
        let mut links = Vec::new();

        let statements = patterns::lines(source).flat_map(patterns::split_statements);
        for fragment in statements.filter_map(|statement| recognize(RULES, statement)) {
            if let FlowFragment::Chain {
                nodes: chain_nodes,
                links: chain_links,
            } = fragment
            {
                nodes.extend(chain_nodes);
                links.extend(chain_links);
            }
        }

        (nodes, links)
    }
}

impl Extractor for FlowExtractor {
    fn scan(&self, ctx: &mut ScanContext, source: &str) {
        let (nodes, links) = Self::recognize_all(source);
        let graph = ctx.graph_mut();

        for node in &nodes {
            if let Some(label) = &node.label {
                graph.declare(Node::new(&node.id, label, NodeKind::Node));
            }
        }

        for link in links.iter().filter(|link| link.label.is_none()) {
            graph.connect(Edge::new(&link.source, &link.target, link.style));
        }

        for link in &links {
            if let Some(label) = &link.label {
                graph.label_or_connect(&link.source, &link.target, label, link.style);
            }
        }
    }
}
