//! End-to-end tests for the detect → extract → assemble pipeline.

use crate::{Dialect, EdgeKind, GraphData, NodeKind, ParseError, Parser, parse, try_parse};

/// `(id, label, kind)` for every node, in output order.
fn node_summary(graph: &GraphData) -> Vec<(&str, &str, NodeKind)> {
    graph
        .nodes()
        .iter()
        .map(|node| (node.id(), node.label(), node.kind()))
        .collect()
}

/// `(source, target, label, kind)` for every edge, in output order.
fn edge_summary(graph: &GraphData) -> Vec<(&str, &str, Option<&str>, EdgeKind)> {
    graph
        .edges()
        .iter()
        .map(|edge| (edge.source(), edge.target(), edge.label(), edge.kind()))
        .collect()
}

fn assert_closed(graph: &GraphData) {
    for edge in graph.edges() {
        assert!(graph.node(edge.source()).is_some(), "dangling source {edge:?}");
        assert!(graph.node(edge.target()).is_some(), "dangling target {edge:?}");
    }
}

#[test]
fn test_flowchart_scenario() {
    let graph = parse("flowchart\nA[Start] --> B[Process]\nB -- ok --> C[End]\n");

    assert_eq!(
        node_summary(&graph),
        vec![
            ("A", "Start", NodeKind::Node),
            ("B", "Process", NodeKind::Node),
            ("C", "End", NodeKind::Node),
        ]
    );
    assert_eq!(
        edge_summary(&graph),
        vec![
            ("A", "B", None, EdgeKind::Solid),
            ("B", "C", Some("ok"), EdgeKind::Solid),
        ]
    );
}

#[test]
fn test_prose_yields_empty_graph() {
    let graph = parse("Just some meeting notes about the roadmap.");
    assert!(graph.is_empty());
    assert_eq!(
        try_parse("Just some meeting notes about the roadmap."),
        Err(ParseError::UnsupportedDialect)
    );
}

#[test]
fn test_marker_without_content_is_empty_extraction() {
    assert_eq!(
        try_parse("sequenceDiagram\n%% nothing yet\n"),
        Err(ParseError::EmptyExtraction {
            dialect: Dialect::Sequence
        })
    );
    assert!(parse("classDiagram\n").is_empty());
}

#[test]
fn test_label_merge_keeps_one_edge() {
    let graph = parse("flowchart LR\nA --> B\nA -- hello --> B\n");

    assert_eq!(
        edge_summary(&graph),
        vec![("A", "B", Some("hello"), EdgeKind::Solid)]
    );
}

#[test]
fn test_pipe_label_merges_too() {
    let graph = parse("graph TD\nA -.-> B\nA -->|why| B\n");

    assert_eq!(
        edge_summary(&graph),
        vec![("A", "B", Some("why"), EdgeKind::Dashed)]
    );
}

#[test]
fn test_implicit_node_synthesized_once() {
    let graph = parse("flowchart TD\nA[Alpha] --> X\nB[Beta] --> X\nX --> C[Gamma]\n");

    let implicit: Vec<_> = graph
        .nodes()
        .iter()
        .filter(|node| node.id() == "X")
        .collect();
    assert_eq!(implicit.len(), 1);
    assert_eq!(implicit[0].kind(), NodeKind::Implicit);
    assert_eq!(implicit[0].label(), "X");
    assert_closed(&graph);
}

#[test]
fn test_flow_redeclaration_augments() {
    let graph = parse("flowchart TD\nA[Old] --> B\nA[New]\nA --> B\n");

    assert_eq!(graph.nodes().len(), 2);
    assert_eq!(graph.node("A").map(|node| node.label()), Some("New"));
    assert_eq!(graph.edges().len(), 2);
}

#[test]
fn test_flow_semicolon_statements() {
    let graph = parse("graph LR; A[One] --> B[Two]; B ==> C");

    assert_eq!(
        edge_summary(&graph),
        vec![
            ("A", "B", None, EdgeKind::Solid),
            ("B", "C", None, EdgeKind::Thick),
        ]
    );
}

#[test]
fn test_dialect_priority() {
    let source = "classDiagram\nclass Foo\n%% flowchart mentioned later\nA[Box] --> B";
    let graph = parse(source);

    assert_eq!(graph.node("A").map(|node| node.kind()), Some(NodeKind::Node));
    assert!(graph.node("Foo").is_none());
}

#[test]
fn test_forced_dialect_skips_detection() {
    let source = "class Foo\nFoo <|-- Bar";
    assert!(parse(source).is_empty());

    let graph = Parser::with_dialect(Dialect::Class).parse(source);
    assert_eq!(graph.node("Foo").map(|node| node.kind()), Some(NodeKind::Class));
    assert_eq!(
        edge_summary(&graph),
        vec![("Bar", "Foo", None, EdgeKind::Inheritance)]
    );
}

#[test]
fn test_sequence_typing_and_direction() {
    let source = "sequenceDiagram
participant A as Alice
actor B
A->>B: async hello
A->B: sync
A-xB: lost
B<<-A: reversed async
B<-A: reversed sync
A-)B: open
";
    let graph = parse(source);

    assert_eq!(
        node_summary(&graph),
        vec![
            ("A", "Alice", NodeKind::Participant),
            ("B", "B", NodeKind::Actor),
        ]
    );
    assert_eq!(
        edge_summary(&graph),
        vec![
            ("A", "B", Some("async hello"), EdgeKind::Async),
            ("A", "B", Some("sync"), EdgeKind::Sync),
            ("A", "B", Some("lost"), EdgeKind::Lost),
            ("A", "B", Some("reversed async"), EdgeKind::Async),
            ("A", "B", Some("reversed sync"), EdgeKind::Sync),
            ("A", "B", Some("open"), EdgeKind::Async),
        ]
    );
}

#[test]
fn test_sequence_implicit_participants_and_notes() {
    let source = "sequenceDiagram
Client->>Server: request
Server-->>Client: response
Note over Client,Server: round trip
Note left of Client: waits
";
    let graph = parse(source);

    assert_eq!(
        node_summary(&graph),
        vec![
            ("Client", "Client", NodeKind::ImplicitParticipant),
            ("Server", "Server", NodeKind::ImplicitParticipant),
            ("note_0", "round trip", NodeKind::NoteBetween),
            ("note_1", "waits", NodeKind::NoteOver),
        ]
    );
    assert_eq!(
        graph.node("note_0").map(|node| node.participants().to_vec()),
        Some(vec!["Client".to_string(), "Server".to_string()])
    );
    assert_eq!(graph.edges().len(), 2);
}

#[test]
fn test_class_direction_canonicalization() {
    let graph = parse("classDiagram\nBase <|-- Derived\nSub --|> Base\n");

    assert_eq!(
        edge_summary(&graph),
        vec![
            ("Derived", "Base", None, EdgeKind::Inheritance),
            ("Sub", "Base", None, EdgeKind::Inheritance),
        ]
    );
}

#[test]
fn test_class_relations_only_are_closed() {
    let graph = try_parse("classDiagram\nAnimal <|-- Duck\n").expect("relations are content");

    assert_eq!(
        node_summary(&graph),
        vec![
            ("Duck", "Duck", NodeKind::Implicit),
            ("Animal", "Animal", NodeKind::Implicit),
        ]
    );
    assert_eq!(
        edge_summary(&graph),
        vec![("Duck", "Animal", None, EdgeKind::Inheritance)]
    );
    assert_closed(&graph);
}

#[test]
fn test_flow_bare_links_are_closed() {
    let graph = try_parse("flowchart\nA --> B\n").expect("links are content");

    assert_eq!(
        node_summary(&graph),
        vec![("A", "A", NodeKind::Implicit), ("B", "B", NodeKind::Implicit)]
    );
    assert_eq!(edge_summary(&graph), vec![("A", "B", None, EdgeKind::Solid)]);
    assert_closed(&graph);
}

#[test]
fn test_sequence_messages_only_are_closed() {
    let graph = try_parse("sequenceDiagram\nAlice->>Bob: hi\n").expect("messages are content");

    assert_eq!(
        node_summary(&graph),
        vec![
            ("Alice", "Alice", NodeKind::ImplicitParticipant),
            ("Bob", "Bob", NodeKind::ImplicitParticipant),
        ]
    );
    assert_closed(&graph);
}

#[test]
fn test_class_members_and_stereotype() {
    let source = "classDiagram
class Animal {
    <<interface>>
    +String name
    -int age
    #breathe() void
    ~digest()
}
Animal <|-- Duck : extends
Duck : +swim()
";
    let graph = parse(source);

    let animal = graph.node("Animal").expect("Animal declared");
    assert_eq!(animal.kind(), NodeKind::Class);
    assert_eq!(animal.stereotype(), Some("interface"));
    let attributes: Vec<_> = animal
        .attributes()
        .iter()
        .map(|member| (member.name(), member.visibility()))
        .collect();
    assert_eq!(
        attributes,
        vec![
            ("String name", crate::Visibility::Public),
            ("int age", crate::Visibility::Private),
        ]
    );
    let methods: Vec<_> = animal.methods().iter().map(|member| member.name()).collect();
    assert_eq!(methods, vec!["breathe() void", "digest()"]);

    let duck = graph.node("Duck").expect("Duck declared by member shorthand");
    assert_eq!(duck.kind(), NodeKind::Class);
    assert_eq!(duck.methods().len(), 1);
    assert_eq!(
        edge_summary(&graph),
        vec![("Duck", "Animal", Some("extends"), EdgeKind::Inheritance)]
    );
}

#[test]
fn test_parser_is_reusable() {
    let parser = Parser::new();
    let first = parser.parse("flowchart\nA[One] --> B");
    let second = parser.parse("flowchart\nC[Two]");

    assert_eq!(first.nodes().len(), 2);
    assert_eq!(node_summary(&second), vec![("C", "Two", NodeKind::Node)]);
}
