//! The hierarchy grammar.
//!
//! Which child kinds may appear under which parent kind is a closed table,
//! expressed here as pure functions over `NodeKind` pairs. The exhaustive
//! `match` means adding a kind forces the table to be revisited.
//!
//! | Parent | Allowed children |
//! |---|---|
//! | document | at most one element; processing instruction, comment, document type |
//! | document fragment, entity reference, element, entity | element, processing instruction, comment, text, CDATA, entity reference |
//! | attribute | text, entity reference |
//! | document type, text, comment, CDATA, processing instruction, notation | none |
//!
//! A document fragment is never itself a child: inserting one inserts its
//! children, so callers expand fragments before consulting this table.

use super::NodeKind;

/// Returns `true` if a node of kind `child` may be a child of `parent`.
///
/// Cardinality limits are reported separately by [`max_children`].
///
/// # Examples
///
/// ```
/// use domcore::tree::grammar::allows_child;
/// use domcore::NodeKind;
///
/// assert!(allows_child(NodeKind::Element, NodeKind::Text));
/// assert!(!allows_child(NodeKind::Document, NodeKind::Text));
/// assert!(!allows_child(NodeKind::Text, NodeKind::Element));
/// ```
#[must_use]
pub fn allows_child(parent: NodeKind, child: NodeKind) -> bool {
    use NodeKind::{
        Attribute, CData, Comment, Document, DocumentFragment, DocumentType, Element, Entity,
        EntityReference, Notation, ProcessingInstruction, Text,
    };

    match parent {
        Document => matches!(child, Element | ProcessingInstruction | Comment | DocumentType),
        DocumentFragment | EntityReference | Element | Entity => matches!(
            child,
            Element | ProcessingInstruction | Comment | Text | CData | EntityReference
        ),
        Attribute => matches!(child, Text | EntityReference),
        DocumentType | Text | Comment | CData | ProcessingInstruction | Notation => false,
    }
}

/// The maximum number of children of kind `child` under `parent`, if limited.
#[must_use]
pub fn max_children(parent: NodeKind, child: NodeKind) -> Option<usize> {
    match (parent, child) {
        (NodeKind::Document, NodeKind::Element) => Some(1),
        _ => None,
    }
}

/// Returns `true` if nodes of this kind can never have children.
#[must_use]
pub fn is_leaf(kind: NodeKind) -> bool {
    NodeKind::ALL.into_iter().all(|child| !allows_child(kind, child))
}
