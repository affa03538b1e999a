//! Loading a document's text into a [`Node`] tree.

use yaml_rust2::parser::{Event, EventReceiver, Parser};
use yaml_rust2::scanner::TScalarStyle;

use crate::error::LoadError;
use crate::node::{Mapping, Node};

/// Parses one self-contained document text into its root node.
///
/// Implementations must attach the document's declared anchor to a root
/// mapping (see [`Mapping::anchor`]) and keep every scalar's source text.
pub trait DocumentLoader {
    /// Returns the root node of the first document in `text`, or `None` if
    /// the text holds no document content.
    fn load(&self, text: &str) -> Result<Option<Node>, LoadError>;
}

/// [`DocumentLoader`] built on the `yaml-rust2` event parser.
///
/// Scalars are taken verbatim from the scanner, so plain values that look
/// like numbers (`0000000000000000e000000000000000`) keep their exact text.
/// The parser numbers anchors instead of naming them, so the root anchor is
/// read from the document's `--- !tag &anchor` start line.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlEventLoader;

impl DocumentLoader for YamlEventLoader {
    fn load(&self, text: &str) -> Result<Option<Node>, LoadError> {
        let mut tree = TreeBuilder::default();
        Parser::new(text.chars())
            .load(&mut tree, false)
            .map_err(|e| LoadError::Syntax {
                reason: e.to_string(),
            })?;
        let mut root = match tree.root {
            None => return Ok(None),
            Some(Node::Scalar(ref s)) if s.is_empty() => return Ok(None),
            Some(root) => root,
        };
        if let (Node::Mapping(mapping), Some(anchor)) = (&mut root, start_line_anchor(text)) {
            mapping.set_anchor(anchor);
        }
        Ok(Some(root))
    }
}

/// A collection whose end event has not arrived yet.
enum Frame {
    Sequence(Vec<Node>),
    Mapping { mapping: Mapping, key: Option<Node> },
}

/// Assembles parser events into the first document's root node.
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    root: Option<Node>,
}

impl TreeBuilder {
    fn attach(&mut self, node: Node) {
        match self.stack.last_mut() {
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
            Some(Frame::Sequence(items)) => items.push(node),
            Some(Frame::Mapping { mapping, key }) => match key.take() {
                Some(key) => mapping.push(key, node),
                None => *key = Some(node),
            },
        }
    }

    fn close(&mut self) {
        let node = match self.stack.pop() {
            Some(Frame::Sequence(items)) => Node::Sequence(items),
            Some(Frame::Mapping { mapping, .. }) => Node::Mapping(mapping),
            None => return,
        };
        self.attach(node);
    }
}

impl EventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event) {
        match ev {
            Event::Scalar(value, style, ..) => {
                self.attach(Node::Scalar(scalar_text(value, style)))
            }
            Event::SequenceStart(..) => self.stack.push(Frame::Sequence(Vec::new())),
            Event::MappingStart(..) => self.stack.push(Frame::Mapping {
                mapping: Mapping::new(),
                key: None,
            }),
            Event::SequenceEnd | Event::MappingEnd => self.close(),
            Event::Alias(..) => self.attach(Node::scalar("")),
            _ => {}
        }
    }
}

/// Plain nulls become the empty string; everything else is kept as written.
fn scalar_text(value: String, style: TScalarStyle) -> String {
    match (style, value.as_str()) {
        (TScalarStyle::Plain, "~" | "null" | "Null" | "NULL") => String::new(),
        _ => value,
    }
}

/// Finds the `&anchor` token on the first `---` line of `text`.
fn start_line_anchor(text: &str) -> Option<&str> {
    let start = text.lines().find(|line| line.starts_with("---"))?;
    start
        .split_whitespace()
        .find_map(|token| token.strip_prefix('&'))
        .filter(|anchor| !anchor.is_empty())
}
