//! Owned, comparable copies of a subtree.
//!
//! A [`TreeSnapshot`] records everything observable about a node and its
//! descendants at one moment. Two snapshots of the same node taken before
//! and after a rejected operation compare equal, which is how callers check
//! that failures leave the tree untouched. [`TreeSnapshot::same_shape`]
//! ignores node ids, for comparing a subtree with its clone.
//!
//! The subtree is stored flat, in pre-order with a depth per entry, so
//! building, comparing and dropping a snapshot never recurses.

use std::fmt::{self, Write};

use super::{Dom, NodeId, NodeKind};
use crate::util::dom_string::DomString;

/// One node's observable state inside a [`TreeSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotNode {
    /// The node's id in the `Dom` it was taken from.
    pub id: NodeId,
    /// The node's kind.
    pub kind: NodeKind,
    /// The node's name.
    pub name: DomString,
    /// The node's value; `None` for kinds without a value.
    pub value: Option<DomString>,
    /// Whether the node rejects mutation.
    pub read_only: bool,
    /// Parent node, if attached. Always `None` for attributes.
    pub parent: Option<NodeId>,
    /// For attribute nodes, the element whose attribute map holds them.
    pub owner_element: Option<NodeId>,
    /// Distance from the snapshot root. Attributes sit one level below their element.
    pub depth: usize,
}

/// A deep, owned copy of a node's observable state.
///
/// Entries are in pre-order: each node is followed by its attributes (each
/// with its own subtree), then its children.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeSnapshot {
    /// Every captured node, root first.
    pub nodes: Vec<SnapshotNode>,
}

impl TreeSnapshot {
    /// The node the snapshot was taken of.
    ///
    /// # Panics
    ///
    /// Panics if `nodes` has been emptied by hand.
    #[must_use]
    pub fn root(&self) -> &SnapshotNode {
        &self.nodes[0]
    }

    /// Returns the captured entry for `id`, if it is part of the snapshot.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SnapshotNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Iterates over the captured children of `id`, in order.
    pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = &SnapshotNode> + '_ {
        self.nodes.iter().filter(move |n| n.parent == Some(id))
    }

    /// Iterates over the captured attributes of `id`, in order.
    pub fn attributes_of(&self, id: NodeId) -> impl Iterator<Item = &SnapshotNode> + '_ {
        self.nodes.iter().filter(move |n| n.owner_element == Some(id))
    }

    /// Compares two snapshots, ignoring node ids and the root's links.
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.nodes.len() == other.nodes.len()
            && self.nodes.iter().zip(&other.nodes).all(|(a, b)| {
                a.kind == b.kind
                    && a.name == b.name
                    && a.value == b.value
                    && a.read_only == b.read_only
                    && a.depth == b.depth
            })
    }

    /// Counts this node and everything under it, attributes included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Renders the subtree as indented lines, one node per line.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TreeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i != 0 {
                f.write_char('\n')?;
            }
            for _ in 0..node.depth {
                f.write_str("  ")?;
            }
            write!(f, "{:?} {}", node.kind, node.name)?;
            if let Some(value) = &node.value {
                write!(f, " {:?}", value.as_str())?;
            }
            if node.read_only {
                f.write_str(" (read-only)")?;
            }
        }
        Ok(())
    }
}

impl Dom {
    /// Captures `id` and its subtree.
    #[must_use]
    pub fn snapshot(&self, id: NodeId) -> TreeSnapshot {
        let mut nodes = Vec::new();
        let mut stack = vec![(id, 0)];
        while let Some((current, depth)) = stack.pop() {
            let node = self.node(current);
            nodes.push(SnapshotNode {
                id: current,
                kind: node.kind,
                name: node.name.clone(),
                value: node.value.clone(),
                read_only: node.read_only,
                parent: node.parent,
                owner_element: node.owner_element,
                depth,
            });
            // Pushed in reverse so attributes pop first, then children in order.
            for child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
            for &attr in node.attributes.iter().rev() {
                stack.push((attr, depth + 1));
            }
        }
        TreeSnapshot { nodes }
    }
}
