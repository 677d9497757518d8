//! Arena-based document tree.
//!
//! All nodes live in a contiguous `Vec<NodeData>` owned by a [`Dom`], and are
//! referenced by [`NodeId`], a newtype over `NonZeroU32`. One `Dom` may hold
//! any number of documents; each node records the document that created it,
//! and the mutation engine refuses to connect nodes of different documents.
//!
//! A parent exclusively owns the ordered [`ChildList`] of its children. The
//! `parent` field of a child is a plain id, never an owning reference, and
//! sibling links are derived from positions in the parent's list.
//!
//! Detached nodes stay allocated until the `Dom` is dropped.

pub mod attributes;
pub mod character_data;
pub mod clone;
pub mod grammar;
pub mod list;
pub mod mutation;
mod node;
pub mod snapshot;

pub use attributes::NamedNodeMap;
pub use list::{ChildList, NodeList};
pub use node::NodeKind;
pub use snapshot::{SnapshotNode, TreeSnapshot};

use std::num::NonZeroU32;

use crate::error::DomError;
use crate::util::dom_string::DomString;
use crate::util::names::is_valid_name;

/// A typed index into the node arena.
///
/// `NodeId` is a newtype over `NonZeroU32`, so `Option<NodeId>` has the same
/// size as `NodeId`. Ids are only meaningful for the `Dom` that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[repr(transparent)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    /// Creates a `NodeId` from a raw arena index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 0 or does not fit in a `u32`.
    #[allow(clippy::expect_used)]
    fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index).expect("node arena exceeds u32::MAX entries");
        Self(NonZeroU32::new(raw).expect("NodeId index must be non-zero"))
    }

    fn as_index(self) -> usize {
        self.0.get() as usize
    }

    /// Converts this `NodeId` to its raw, always non-zero, `u32`.
    #[must_use]
    pub fn into_raw(self) -> u32 {
        self.0.get()
    }

    /// Creates a `NodeId` from a raw `u32`, if non-zero.
    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }
}

/// Storage for a single node in the arena.
///
/// Fields are readable through [`Dom::node`]; they change only through `Dom`
/// operations, which keep them consistent.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// The node's kind. Immutable.
    pub kind: NodeKind,
    /// The node's name. Immutable.
    pub name: DomString,
    /// The node's value; `None` for kinds without a value.
    pub value: Option<DomString>,
    /// Read-only nodes reject every mutation.
    pub read_only: bool,
    /// The document that created this node; `None` for documents.
    pub owner: Option<NodeId>,
    /// Parent node, if attached.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: ChildList,
    /// Attribute nodes, in insertion order. Only elements have any.
    pub attributes: Vec<NodeId>,
    /// For attribute nodes, the element whose attribute map holds them.
    pub owner_element: Option<NodeId>,
}

impl NodeData {
    fn new(kind: NodeKind, name: DomString, value: Option<DomString>) -> Self {
        Self {
            kind,
            name,
            value,
            read_only: false,
            owner: None,
            parent: None,
            children: ChildList::default(),
            attributes: Vec::new(),
            owner_element: None,
        }
    }

    /// A copy of the node's own fields: never its links.
    fn detached_copy(&self) -> Self {
        Self {
            kind: self.kind,
            name: self.name.clone(),
            value: self.value.clone(),
            read_only: self.read_only,
            owner: self.owner,
            parent: None,
            children: ChildList::default(),
            attributes: Vec::new(),
            owner_element: None,
        }
    }
}

/// Construction parameters for [`Dom::create_node`].
///
/// # Examples
///
/// ```
/// use domcore::{Dom, NodeInit, NodeKind};
///
/// let mut dom = Dom::new();
/// let doc = dom.create_document();
/// let text = dom
///     .create_node(doc, NodeInit::new(NodeKind::Text).value("frozen").read_only(true))
///     .unwrap();
/// assert!(dom.is_read_only(text));
/// ```
#[derive(Debug, Clone)]
pub struct NodeInit {
    kind: NodeKind,
    name: DomString,
    value: Option<DomString>,
    read_only: bool,
}

impl NodeInit {
    /// Starts a node of the given kind, named after its fixed name if it has one.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            name: kind.fixed_name().map(DomString::from).unwrap_or_default(),
            value: None,
            read_only: false,
        }
    }

    /// Sets the name. Ignored for kinds with a fixed name.
    #[must_use]
    pub fn name(mut self, name: impl Into<DomString>) -> Self {
        if self.kind.fixed_name().is_none() {
            self.name = name.into();
        }
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn value(mut self, value: impl Into<DomString>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Marks the node read-only.
    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }
}

/// An arena of documents and their nodes.
///
/// All tree operations go through `&Dom` (navigation) or `&mut Dom`
/// (mutation), so the borrow checker serializes mutation of every document
/// the arena holds.
///
/// # Examples
///
/// ```
/// use domcore::Dom;
///
/// let mut dom = Dom::new();
/// let doc = dom.create_document();
/// let root = dom.create_element(doc, "root").unwrap();
/// dom.append_child(doc, root).unwrap();
/// assert_eq!(dom.document_element(doc), Some(root));
/// ```
#[derive(Debug, Clone)]
pub struct Dom {
    /// The node arena. Index 0 is unused (placeholder for `NonZeroU32`).
    nodes: Vec<NodeData>,
}

impl Dom {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Creates an empty arena with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.saturating_add(1));
        // Index 0: placeholder (NodeId uses NonZeroU32)
        nodes.push(NodeData::new(NodeKind::Document, DomString::new(), None));
        Self { nodes }
    }

    /// Returns a reference to the `NodeData` for the given node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this `Dom`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.as_index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.as_index()]
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let index = self.nodes.len();
        self.nodes.push(data);
        NodeId::from_index(index)
    }

    /// Returns the number of nodes allocated in the arena, attached or not.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1 // subtract placeholder at index 0
    }

    // --- Creation ---

    /// Creates a new, empty document node.
    pub fn create_document(&mut self) -> NodeId {
        let name = DomString::from("#document");
        let id = self.alloc(NodeData::new(NodeKind::Document, name, None));
        tracing::trace!(document = ?id, "created document");
        id
    }

    /// Creates a node owned by `document`.
    ///
    /// Every kind-specific factory funnels through here.
    ///
    /// # Errors
    ///
    /// - `WrongDocument` if `document` is not a document node.
    /// - `NotSupported` if `init` describes a document; use
    ///   [`create_document`](Dom::create_document).
    /// - `InvalidCharacter` if the kind carries its own name and the name is
    ///   not a valid XML name.
    /// - `NoDataAllowed` if a value is given for a kind without a value.
    pub fn create_node(&mut self, document: NodeId, init: NodeInit) -> Result<NodeId, DomError> {
        if self.node(document).kind != NodeKind::Document {
            return Err(DomError::wrong_document("owner is not a document node"));
        }
        let NodeInit {
            kind,
            name,
            value,
            read_only,
        } = init;
        if kind == NodeKind::Document {
            return Err(DomError::not_supported(
                "documents are created with create_document",
            ));
        }
        if kind.fixed_name().is_none() && !is_valid_name(name.as_str()) {
            return Err(DomError::invalid_character(format!(
                "'{name}' is not a valid XML name"
            )));
        }
        let value = match (kind.has_value(), value) {
            (true, value) => Some(value.unwrap_or_default()),
            (false, None) => None,
            (false, Some(_)) => {
                return Err(DomError::no_data_allowed(format!(
                    "{kind:?} nodes carry no value"
                )))
            }
        };

        let mut data = NodeData::new(kind, name, value);
        data.read_only = read_only;
        data.owner = Some(document);
        let id = self.alloc(data);
        tracing::trace!(node = ?id, ?kind, "created node");
        Ok(id)
    }

    /// Creates an element.
    ///
    /// # Errors
    ///
    /// `InvalidCharacter` if `tag_name` is not a valid XML name, `WrongDocument`
    /// if `document` is not a document.
    pub fn create_element(&mut self, document: NodeId, tag_name: &str) -> Result<NodeId, DomError> {
        self.create_node(document, NodeInit::new(NodeKind::Element).name(tag_name))
    }

    /// Creates an empty document fragment.
    ///
    /// # Errors
    ///
    /// `WrongDocument` if `document` is not a document.
    pub fn create_document_fragment(&mut self, document: NodeId) -> Result<NodeId, DomError> {
        self.create_node(document, NodeInit::new(NodeKind::DocumentFragment))
    }

    /// Creates a text node.
    ///
    /// # Errors
    ///
    /// `WrongDocument` if `document` is not a document.
    pub fn create_text_node(&mut self, document: NodeId, data: &str) -> Result<NodeId, DomError> {
        self.create_node(document, NodeInit::new(NodeKind::Text).value(data))
    }

    /// Creates a comment.
    ///
    /// # Errors
    ///
    /// `WrongDocument` if `document` is not a document.
    pub fn create_comment(&mut self, document: NodeId, data: &str) -> Result<NodeId, DomError> {
        self.create_node(document, NodeInit::new(NodeKind::Comment).value(data))
    }

    /// Creates a CDATA section.
    ///
    /// # Errors
    ///
    /// `WrongDocument` if `document` is not a document.
    pub fn create_cdata_section(&mut self, document: NodeId, data: &str) -> Result<NodeId, DomError> {
        self.create_node(document, NodeInit::new(NodeKind::CData).value(data))
    }

    /// Creates a processing instruction named after its target.
    ///
    /// # Errors
    ///
    /// `InvalidCharacter` if `target` is not a valid XML name.
    pub fn create_processing_instruction(
        &mut self,
        document: NodeId,
        target: &str,
        data: &str,
    ) -> Result<NodeId, DomError> {
        self.create_node(
            document,
            NodeInit::new(NodeKind::ProcessingInstruction)
                .name(target)
                .value(data),
        )
    }

    /// Creates an attribute with an empty value.
    ///
    /// # Errors
    ///
    /// `InvalidCharacter` if `name` is not a valid XML name.
    pub fn create_attribute(&mut self, document: NodeId, name: &str) -> Result<NodeId, DomError> {
        self.create_node(document, NodeInit::new(NodeKind::Attribute).name(name))
    }

    /// Creates an entity reference.
    ///
    /// # Errors
    ///
    /// `InvalidCharacter` if `name` is not a valid XML name.
    pub fn create_entity_reference(
        &mut self,
        document: NodeId,
        name: &str,
    ) -> Result<NodeId, DomError> {
        self.create_node(document, NodeInit::new(NodeKind::EntityReference).name(name))
    }

    /// Creates a document type node.
    ///
    /// # Errors
    ///
    /// `InvalidCharacter` if `name` is not a valid XML name.
    pub fn create_document_type(&mut self, document: NodeId, name: &str) -> Result<NodeId, DomError> {
        self.create_node(document, NodeInit::new(NodeKind::DocumentType).name(name))
    }

    /// Creates an entity node.
    ///
    /// # Errors
    ///
    /// `InvalidCharacter` if `name` is not a valid XML name.
    pub fn create_entity(&mut self, document: NodeId, name: &str) -> Result<NodeId, DomError> {
        self.create_node(document, NodeInit::new(NodeKind::Entity).name(name))
    }

    /// Creates a notation node.
    ///
    /// # Errors
    ///
    /// `InvalidCharacter` if `name` is not a valid XML name.
    pub fn create_notation(&mut self, document: NodeId, name: &str) -> Result<NodeId, DomError> {
        self.create_node(document, NodeInit::new(NodeKind::Notation).name(name))
    }

    // --- Node properties ---

    /// Returns the kind of a node.
    #[must_use]
    pub fn node_kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    /// Returns the name of a node.
    #[must_use]
    pub fn node_name(&self, id: NodeId) -> &DomString {
        &self.node(id).name
    }

    /// Returns the value of a node, or `None` for kinds without a value.
    #[must_use]
    pub fn node_value(&self, id: NodeId) -> Option<&DomString> {
        self.node(id).value.as_ref()
    }

    /// Replaces the value of a node.
    ///
    /// # Errors
    ///
    /// - `NoModificationAllowed` if the node is read-only.
    /// - `NoDataAllowed` if the node's kind carries no value.
    pub fn set_node_value(&mut self, id: NodeId, value: impl Into<DomString>) -> Result<(), DomError> {
        let node = self.node_mut(id);
        if node.read_only {
            return Err(DomError::no_modification_allowed("node is read-only"));
        }
        if !node.kind.has_value() {
            return Err(DomError::no_data_allowed(format!(
                "{:?} nodes carry no value",
                node.kind
            )));
        }
        node.value = Some(value.into());
        tracing::trace!(node = ?id, "set node value");
        Ok(())
    }

    /// Returns `true` if the node rejects mutation.
    #[must_use]
    pub fn is_read_only(&self, id: NodeId) -> bool {
        self.node(id).read_only
    }

    /// Returns the document that created the node, or `None` for a document.
    #[must_use]
    pub fn owner_document(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).owner
    }

    /// Returns the document whose tree the node belongs to: the owner
    /// document, or the node itself if it is a document.
    #[must_use]
    pub fn tree_document(&self, id: NodeId) -> NodeId {
        self.node(id).owner.unwrap_or(id)
    }

    /// Returns the single element child of a document, if any.
    #[must_use]
    pub fn document_element(&self, document: NodeId) -> Option<NodeId> {
        self.children(document)
            .find(|&id| self.node(id).kind == NodeKind::Element)
    }

    // --- Navigation ---

    /// Returns the parent of a node.
    #[must_use]
    pub fn parent_node(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Returns a live view of a node's children.
    #[must_use]
    pub fn child_nodes(&self, id: NodeId) -> NodeList<'_> {
        NodeList::new(&self.node(id).children)
    }

    /// Returns the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).children.first()
    }

    /// Returns the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).children.last()
    }

    /// Returns the node immediately preceding this one in its parent.
    #[must_use]
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let (siblings, index) = self.position_in_parent(id)?;
        index.checked_sub(1).and_then(|i| siblings.get(i))
    }

    /// Returns the node immediately following this one in its parent.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let (siblings, index) = self.position_in_parent(id)?;
        siblings.get(index + 1)
    }

    fn position_in_parent(&self, id: NodeId) -> Option<(&ChildList, usize)> {
        let parent = self.node(id).parent?;
        let siblings = &self.node(parent).children;
        siblings.position(id).map(|index| (siblings, index))
    }

    /// Returns an iterator over the children of a node.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            inner: self.node(id).children.iter(),
        }
    }

    /// Returns an iterator over a node and its ancestors (walking up to root).
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            dom: self,
            next: Some(id),
        }
    }

    /// Returns an iterator over all descendants of a node (depth-first,
    /// document order, excluding the node itself).
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            dom: self,
            stack: vec![(id, 0)],
        }
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

// --- Iterators ---

/// Iterator over the children of a node.
pub struct Children<'a> {
    inner: std::iter::Copied<std::slice::Iter<'a, NodeId>>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

/// Iterator over a node and its ancestors.
pub struct Ancestors<'a> {
    dom: &'a Dom,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.dom.node(current).parent;
        Some(current)
    }
}

/// Depth-first iterator over all descendants of a node.
pub struct Descendants<'a> {
    dom: &'a Dom,
    /// Open nodes and the index of the next child to visit in each.
    stack: Vec<(NodeId, usize)>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, index) = self.stack.last_mut()?;
            if let Some(child) = self.dom.node(*node).children.get(*index) {
                *index += 1;
                self.stack.push((child, 0));
                return Some(child);
            }
            self.stack.pop();
        }
    }
}
