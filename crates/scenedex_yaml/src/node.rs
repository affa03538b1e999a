//! The generic document tree consumed by reference extraction.
//!
//! Only three node shapes exist. Scalars keep their source text (numbers are
//! not pre-parsed), and mappings keep their entries in document order.

/// One node of a loaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A scalar value as text. Nulls load as the empty string.
    Scalar(String),
    /// An ordered sequence of nodes.
    Sequence(Vec<Node>),
    /// An ordered key/value mapping.
    Mapping(Mapping),
}

/// The shape of a [`Node`], without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// See [`Node::Scalar`].
    Scalar,
    /// See [`Node::Sequence`].
    Sequence,
    /// See [`Node::Mapping`].
    Mapping,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeKind::Scalar => "scalar",
            NodeKind::Sequence => "sequence",
            NodeKind::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

impl Node {
    /// Creates a scalar node.
    pub fn scalar(text: impl Into<String>) -> Self {
        Node::Scalar(text.into())
    }

    /// Returns the shape of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Scalar(_) => NodeKind::Scalar,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Mapping(_) => NodeKind::Mapping,
        }
    }

    /// Returns the text of a scalar node.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Node::Scalar(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the elements of a sequence node.
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the mapping of a mapping node.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }
}

/// An ordered mapping, optionally carrying the anchor declared on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    anchor: Option<String>,
    entries: Vec<(Node, Node)>,
}

impl Mapping {
    /// Creates an empty mapping without an anchor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this mapping with `anchor` attached.
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    /// Sets the anchor text declared on this mapping.
    pub fn set_anchor(&mut self, anchor: impl Into<String>) {
        self.anchor = Some(anchor.into());
    }

    /// Returns the anchor text declared on this mapping, without the `&`.
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Appends an entry.
    pub fn push(&mut self, key: Node, value: Node) {
        self.entries.push((key, value));
    }

    /// Returns all entries in document order.
    pub fn entries(&self) -> &[(Node, Node)] {
        &self.entries
    }

    /// Returns the first entry.
    pub fn first(&self) -> Option<(&Node, &Node)> {
        self.entries.first().map(|(k, v)| (k, v))
    }

    /// Returns the value of the first entry whose key is the scalar `key`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_scalar() == Some(key))
            .map(|(_, v)| v)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
