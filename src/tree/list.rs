//! Ordered child collections.
//!
//! Each node exclusively owns a [`ChildList`], the canonical order of its
//! children. Sibling links are derived from positions in this list rather
//! than stored, so no mutation can leave a stale sibling pointer behind.
//!
//! [`NodeList`] is the read-only view handed out to callers. It borrows the
//! parent's storage directly, so it always reflects the current children:
//! fetching it again after a mutation observes the new state.

use super::NodeId;

/// Owned storage for a node's children, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildList(Vec<NodeId>);

impl ChildList {
    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the child at `index`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.0.get(index).copied()
    }

    /// Returns the position of `id`, or `None` if it is not a member.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.0.iter().position(|&c| c == id)
    }

    /// Returns `true` if `id` is a member.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.0.contains(&id)
    }

    /// The first child.
    #[must_use]
    pub fn first(&self) -> Option<NodeId> {
        self.0.first().copied()
    }

    /// The last child.
    #[must_use]
    pub fn last(&self) -> Option<NodeId> {
        self.0.last().copied()
    }

    /// The children as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[NodeId] {
        &self.0
    }

    /// Iterates over the children in order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, NodeId>> {
        self.0.iter().copied()
    }

    // Mutation is reserved to the tree engine, which keeps `parent` links
    // in step with membership.

    pub(crate) fn insert(&mut self, index: usize, id: NodeId) {
        self.0.insert(index, id);
    }

    pub(crate) fn push(&mut self, id: NodeId) {
        self.0.push(id);
    }

    pub(crate) fn remove(&mut self, index: usize) -> NodeId {
        self.0.remove(index)
    }

    pub(crate) fn replace(&mut self, index: usize, id: NodeId) -> NodeId {
        std::mem::replace(&mut self.0[index], id)
    }

    pub(crate) fn splice(&mut self, index: usize, ids: &[NodeId]) {
        self.0.splice(index..index, ids.iter().copied());
    }

    pub(crate) fn take(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.0)
    }
}

impl<'a> IntoIterator for &'a ChildList {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A live, index-addressable view of a node's children.
///
/// Out-of-range queries return `None`; no method on a `NodeList` fails.
///
/// # Examples
///
/// ```
/// use domcore::Dom;
///
/// let mut dom = Dom::new();
/// let doc = dom.create_document();
/// let list = dom.create_element(doc, "ul").unwrap();
/// let item = dom.create_element(doc, "li").unwrap();
/// dom.append_child(list, item).unwrap();
///
/// let children = dom.child_nodes(list);
/// assert_eq!(children.length(), 1);
/// assert_eq!(children.item(0), Some(item));
/// assert_eq!(children.item(1), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NodeList<'a> {
    items: &'a [NodeId],
}

impl<'a> NodeList<'a> {
    pub(crate) fn new(list: &'a ChildList) -> Self {
        Self {
            items: list.as_slice(),
        }
    }

    /// The number of nodes in the list.
    #[must_use]
    pub fn length(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the `index`th node, or `None` if `index` is out of range.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<NodeId> {
        self.items.get(index).copied()
    }

    /// Returns the position of `id` in the list.
    #[must_use]
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.items.iter().position(|&c| c == id)
    }

    /// Returns `true` if `id` is in the list.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.items.contains(&id)
    }

    /// Iterates over the nodes in order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'a, NodeId>> {
        self.items.iter().copied()
    }
}

impl<'a> IntoIterator for NodeList<'a> {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter().copied()
    }
}
