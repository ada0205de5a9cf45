//! Graph vertices and their dialect-specific payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of node kinds across all dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A flowchart box declared with a bracketed label.
    Node,
    /// An entity referenced by a relation but never declared.
    Implicit,
    /// A sequence role declared with the `actor` keyword.
    Actor,
    /// A sequence role declared with the `participant` keyword.
    Participant,
    /// A sequence role first seen inside a message.
    ImplicitParticipant,
    /// A class-diagram class.
    Class,
    /// A note attached to a single sequence role.
    NoteOver,
    /// A note spanning two sequence roles.
    NoteBetween,
}

impl NodeKind {
    /// Returns `true` for kinds synthesized from references rather than declarations.
    pub fn is_implicit(self) -> bool {
        matches!(self, NodeKind::Implicit | NodeKind::ImplicitParticipant)
    }
}

/// Visibility of a class member, written as a leading sigil in the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// `+`, or no sigil at all.
    #[default]
    Public,
    /// `-`
    Private,
    /// `#`
    Protected,
    /// `~`
    Package,
}

impl Visibility {
    /// Maps a visibility sigil to its [`Visibility`], if it is one.
    pub fn from_sigil(sigil: char) -> Option<Self> {
        match sigil {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            '#' => Some(Visibility::Protected),
            '~' => Some(Visibility::Package),
            _ => None,
        }
    }
}

/// A class attribute or method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    name: String,
    visibility: Visibility,
}

impl Member {
    /// Create a new member.
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            visibility,
        }
    }

    /// Get the member text with its visibility sigil removed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the member visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }
}

/// A vertex in an extracted graph.
///
/// Every node carries an id, a display label and a [`NodeKind`]. Class nodes
/// may additionally carry members and a stereotype; note nodes carry the ids
/// of the participants they are attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    id: String,
    label: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<Member>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    methods: Vec<Member>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stereotype: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    participants: Vec<String>,
}

impl Node {
    /// Create a node with an explicit label.
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            attributes: Vec::new(),
            methods: Vec::new(),
            stereotype: None,
            participants: Vec::new(),
        }
    }

    /// Create a node whose label is its id.
    pub fn unlabeled(id: impl Into<String>, kind: NodeKind) -> Self {
        let id = id.into();
        Self::new(id.clone(), id, kind)
    }

    /// Attach the participants a note refers to.
    pub fn with_participants(mut self, participants: Vec<String>) -> Self {
        self.participants = participants;
        self
    }

    /// Get the node identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the node kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Class attributes in declaration order.
    pub fn attributes(&self) -> &[Member] {
        &self.attributes
    }

    /// Class methods in declaration order.
    pub fn methods(&self) -> &[Member] {
        &self.methods
    }

    /// The stereotype annotation, if any.
    pub fn stereotype(&self) -> Option<&str> {
        self.stereotype.as_deref()
    }

    /// Participant ids a note is attached to.
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    /// Replace the display label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Set the stereotype annotation.
    pub fn set_stereotype(&mut self, stereotype: impl Into<String>) {
        self.stereotype = Some(stereotype.into());
    }

    /// Append a class attribute.
    pub fn push_attribute(&mut self, member: Member) {
        self.attributes.push(member);
    }

    /// Append a class method.
    pub fn push_method(&mut self, member: Member) {
        self.methods.push(member);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
