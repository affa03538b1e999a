//! Reference extraction from a single loaded document.
//!
//! The document root is a mapping anchored with the object's local id; its
//! first entry maps the class name to the object's fields. Every `fileID` and
//! `guid` found anywhere below counts as one usage, and an `m_Component` list
//! records which components are attached to the object.

use scenedex_common::Anchor;
use scenedex_index::CacheIndex;
use scenedex_yaml::{Mapping, Node};

use crate::error::ExtractError;

const FILE_ID: &str = "fileID";
const GUID: &str = "guid";
const COMPONENTS: &str = "m_Component";

/// What one document contributes to its file's index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRefs {
    /// The anchor declared on the document root.
    pub anchor: Anchor,
    /// Usage counts and the component list found in the document.
    pub index: CacheIndex,
}

/// Extracts the references of one document.
///
/// A root mapping without entries contributes nothing. `fileID` values that
/// are zero or not unsigned integers are ignored, as are non-scalar `guid`
/// values.
pub fn extract_document(root: &Node) -> Result<DocumentRefs, ExtractError> {
    let mapping = root
        .as_mapping()
        .ok_or(ExtractError::NotAMapping { kind: root.kind() })?;
    let anchor_text = mapping.anchor().ok_or(ExtractError::MissingAnchor)?;
    let anchor: Anchor = anchor_text
        .parse()
        .map_err(|_| ExtractError::InvalidAnchor {
            anchor: anchor_text.to_string(),
        })?;

    let mut walker = ReferenceWalker {
        anchor,
        index: CacheIndex::new(),
    };
    if let Some((_, fields)) = mapping.first() {
        walker.visit(fields);
    }
    Ok(DocumentRefs {
        anchor,
        index: walker.index,
    })
}

struct ReferenceWalker {
    anchor: Anchor,
    index: CacheIndex,
}

impl ReferenceWalker {
    fn visit(&mut self, node: &Node) {
        match node {
            Node::Scalar(_) => {}
            Node::Sequence(items) => {
                for item in items {
                    self.visit(item);
                }
            }
            Node::Mapping(mapping) => self.visit_mapping(mapping),
        }
    }

    fn visit_mapping(&mut self, mapping: &Mapping) {
        for (key, value) in mapping.entries() {
            match key.as_scalar() {
                Some(FILE_ID) => {
                    if let Some(anchor) = value.as_scalar().and_then(parse_reference) {
                        self.index.increment_anchor(anchor);
                    }
                }
                Some(GUID) => {
                    if let Some(guid) = value.as_scalar() {
                        self.index.increment_guid(guid);
                    }
                }
                Some(COMPONENTS) => {
                    self.index.set_attached(self.anchor, component_list(value));
                }
                _ => {}
            }
            self.visit(value);
        }
    }
}

/// Parses a `fileID` value, treating `0` (the null reference) as absent.
fn parse_reference(text: &str) -> Option<Anchor> {
    text.parse::<Anchor>().ok().filter(|anchor| !anchor.is_none())
}

/// Collects `- <key>: {fileID: N}` entries in order.
fn component_list(value: &Node) -> Vec<Anchor> {
    let Some(entries) = value.as_sequence() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let (_, target) = entry.as_mapping()?.first()?;
            let id = target.as_mapping()?.get(FILE_ID)?.as_scalar()?;
            parse_reference(id)
        })
        .collect()
}
