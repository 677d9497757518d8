//! # domcore
//!
//! A mutable document tree in the shape of the W3C DOM Level 1 Core: twelve
//! node kinds, a fixed hierarchy grammar, and insert, replace and remove
//! operations that validate every precondition before touching the tree.
//!
//! All nodes live in a [`Dom`] arena and are addressed by [`NodeId`]. A
//! failing operation returns a [`DomError`] carrying an [`ExceptionCode`]
//! and leaves the tree exactly as it was.
//!
//! ## Quick Start
//!
//! ```
//! use domcore::{Dom, ExceptionCode};
//!
//! let mut dom = Dom::new();
//! let doc = dom.create_document();
//! let root = dom.create_element(doc, "root").unwrap();
//! let greeting = dom.create_text_node(doc, "Hello").unwrap();
//! dom.append_child(doc, root).unwrap();
//! dom.append_child(root, greeting).unwrap();
//! assert_eq!(dom.first_child(root), Some(greeting));
//!
//! // A document holds at most one element.
//! let second = dom.create_element(doc, "second").unwrap();
//! let err = dom.append_child(doc, second).unwrap_err();
//! assert_eq!(err.code(), ExceptionCode::HierarchyRequest);
//! assert_eq!(dom.child_nodes(doc).length(), 1);
//! ```

pub mod error;
pub mod implementation;
pub mod tree;
pub mod util;

// Re-export primary types at the crate root for convenience.
pub use error::{DomError, ExceptionCode};
pub use implementation::DomImplementation;
pub use tree::{
    ChildList, Dom, NamedNodeMap, NodeData, NodeId, NodeInit, NodeKind, NodeList, SnapshotNode,
    TreeSnapshot,
};
pub use util::dom_string::DomString;
