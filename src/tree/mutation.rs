//! The mutation engine: insert, append, replace and remove children.
//!
//! Every operation validates all of its preconditions before touching the
//! tree, so a failed call leaves every node exactly as it was. Preconditions
//! are checked in a fixed order, and the first failure wins:
//!
//! 1. `NoModificationAllowed`: the parent is read-only, or the node that
//!    would lose a child is (the new child's current parent, or the new child
//!    itself when it is a fragment about to be emptied).
//! 2. `WrongDocument`: the new child belongs to another document's tree.
//! 3. `NotFound`: the reference (or replaced) child is not a child of the parent.
//! 4. `HierarchyRequest`: the hierarchy grammar forbids the insertion, or the
//!    new child is the parent or one of its ancestors.
//!
//! Inserting a document fragment inserts its children, in order, and leaves
//! the fragment empty. The checks above run once over the fragment's whole
//! child list before any child moves, so every child is validated in release
//! builds too. The per-child re-check during the move is a `debug_assert!`
//! that guards this equivalence.

use super::grammar::{allows_child, max_children};
use super::{Dom, NodeId, NodeKind};
use crate::error::DomError;

fn rejected(op: &'static str, err: DomError) -> DomError {
    tracing::debug!(op, code = %err.code(), reason = err.message(), "mutation rejected");
    err
}

impl Dom {
    /// Inserts `new_child` before `ref_child` among the children of `parent`.
    ///
    /// With `ref_child` of `None`, appends at the end. If `new_child` is
    /// already in a tree it is moved. If it is a document fragment, its
    /// children are moved instead and the fragment is returned, empty.
    ///
    /// Returns `new_child`.
    ///
    /// # Errors
    ///
    /// See the module documentation for the checks and their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use domcore::Dom;
    ///
    /// let mut dom = Dom::new();
    /// let doc = dom.create_document();
    /// let ul = dom.create_element(doc, "ul").unwrap();
    /// let second = dom.create_element(doc, "li").unwrap();
    /// let first = dom.create_element(doc, "li").unwrap();
    /// dom.append_child(ul, second).unwrap();
    /// dom.insert_before(ul, first, Some(second)).unwrap();
    /// assert_eq!(dom.first_child(ul), Some(first));
    /// ```
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        ref_child: Option<NodeId>,
    ) -> Result<NodeId, DomError> {
        self.insert("insert_before", parent, new_child, ref_child)
    }

    /// Appends `new_child` as the last child of `parent`.
    ///
    /// Equivalent to [`insert_before`](Dom::insert_before) with no reference
    /// node. Returns `new_child`.
    ///
    /// # Errors
    ///
    /// See the module documentation for the checks and their order.
    pub fn append_child(&mut self, parent: NodeId, new_child: NodeId) -> Result<NodeId, DomError> {
        self.insert("append_child", parent, new_child, None)
    }

    /// Replaces `old_child` with `new_child` in the children of `parent`.
    ///
    /// `new_child` takes `old_child`'s position; a fragment's children are
    /// spliced into that position in order. Returns the removed `old_child`.
    ///
    /// # Errors
    ///
    /// See the module documentation; `NotFound` applies to `old_child`.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> Result<NodeId, DomError> {
        self.check_replace(parent, new_child, old_child)
            .map_err(|e| rejected("replace_child", e))?;

        if new_child == old_child {
            return Ok(old_child);
        }

        if self.node(new_child).kind == NodeKind::DocumentFragment {
            let moved = self.node_mut(new_child).children.take();
            let index = self.child_index(parent, old_child);
            self.node_mut(parent).children.remove(index);
            self.node_mut(parent).children.splice(index, &moved);
            for &child in &moved {
                self.node_mut(child).parent = Some(parent);
            }
        } else {
            self.detach(new_child);
            // Detaching may have shifted old_child's position.
            let index = self.child_index(parent, old_child);
            self.node_mut(parent).children.replace(index, new_child);
            self.node_mut(new_child).parent = Some(parent);
        }
        self.node_mut(old_child).parent = None;

        tracing::trace!(?parent, ?new_child, ?old_child, "replace_child");
        Ok(old_child)
    }

    /// Removes `old_child` from the children of `parent` and returns it.
    ///
    /// # Errors
    ///
    /// - `NoModificationAllowed` if `parent` is read-only.
    /// - `NotFound` if `old_child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, old_child: NodeId) -> Result<NodeId, DomError> {
        let check = if self.node(parent).read_only {
            Err(DomError::no_modification_allowed("parent is read-only"))
        } else if self.node(old_child).parent != Some(parent) {
            Err(DomError::not_found("node is not a child of this parent"))
        } else {
            Ok(())
        };
        check.map_err(|e| rejected("remove_child", e))?;

        self.detach(old_child);
        tracing::trace!(?parent, ?old_child, "remove_child");
        Ok(old_child)
    }

    /// Returns `true` if the node has any children.
    #[must_use]
    pub fn has_child_nodes(&self, id: NodeId) -> bool {
        !self.node(id).children.is_empty()
    }

    fn insert(
        &mut self,
        op: &'static str,
        parent: NodeId,
        new_child: NodeId,
        ref_child: Option<NodeId>,
    ) -> Result<NodeId, DomError> {
        self.check_insert(parent, new_child, ref_child)
            .map_err(|e| rejected(op, e))?;

        if ref_child == Some(new_child) {
            return Ok(new_child);
        }

        if self.node(new_child).kind == NodeKind::DocumentFragment {
            let moved = self.node_mut(new_child).children.take();
            for child in moved {
                self.node_mut(child).parent = None;
                debug_assert!(
                    self.check_insert(parent, child, ref_child).is_ok(),
                    "fragment child failed re-validation"
                );
                self.link_before(parent, child, ref_child);
            }
        } else {
            self.detach(new_child);
            self.link_before(parent, new_child, ref_child);
        }

        tracing::trace!(op, ?parent, ?new_child, ?ref_child, "inserted");
        Ok(new_child)
    }

    fn check_insert(
        &self,
        parent: NodeId,
        new_child: NodeId,
        ref_child: Option<NodeId>,
    ) -> Result<(), DomError> {
        self.check_modifiable(parent, new_child)?;
        self.check_same_document(parent, new_child)?;
        if let Some(reference) = ref_child {
            if self.node(reference).parent != Some(parent) {
                return Err(DomError::not_found(
                    "reference node is not a child of this parent",
                ));
            }
        }
        self.check_hierarchy(parent, new_child, None)
    }

    fn check_replace(
        &self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> Result<(), DomError> {
        self.check_modifiable(parent, new_child)?;
        self.check_same_document(parent, new_child)?;
        if self.node(old_child).parent != Some(parent) {
            return Err(DomError::not_found(
                "replaced node is not a child of this parent",
            ));
        }
        self.check_hierarchy(parent, new_child, Some(old_child))
    }

    fn check_modifiable(&self, parent: NodeId, new_child: NodeId) -> Result<(), DomError> {
        if self.node(parent).read_only {
            return Err(DomError::no_modification_allowed("parent is read-only"));
        }
        let child = self.node(new_child);
        let loser = if child.kind == NodeKind::DocumentFragment {
            Some(new_child)
        } else {
            child.parent
        };
        if loser.is_some_and(|id| self.node(id).read_only) {
            return Err(DomError::no_modification_allowed(
                "node would be moved out of a read-only parent",
            ));
        }
        Ok(())
    }

    fn check_same_document(&self, parent: NodeId, new_child: NodeId) -> Result<(), DomError> {
        if self.tree_document(parent) == self.tree_document(new_child) {
            Ok(())
        } else {
            Err(DomError::wrong_document(
                "node was created by a different document",
            ))
        }
    }

    /// Validates the grammar for inserting `new_child` under `parent`, with
    /// `replaced` (if any) leaving at the same time.
    fn check_hierarchy(
        &self,
        parent: NodeId,
        new_child: NodeId,
        replaced: Option<NodeId>,
    ) -> Result<(), DomError> {
        if self.ancestors(parent).any(|id| id == new_child) {
            return Err(DomError::hierarchy_request(
                "node is the parent or one of its ancestors",
            ));
        }

        let parent_kind = self.node(parent).kind;
        let mut incoming = Vec::new();
        self.collect_incoming(new_child, &mut incoming);

        for &id in &incoming {
            let kind = self.node(id).kind;
            if !allows_child(parent_kind, kind) {
                return Err(DomError::hierarchy_request(format!(
                    "{parent_kind:?} nodes cannot contain {kind:?} nodes"
                )));
            }
        }

        for &id in &incoming {
            let kind = self.node(id).kind;
            let Some(limit) = max_children(parent_kind, kind) else {
                continue;
            };
            // Children that stay in place: not replaced, not being re-inserted.
            let staying = self
                .children(parent)
                .filter(|&c| Some(c) != replaced && !incoming.contains(&c))
                .filter(|&c| self.node(c).kind == kind)
                .count();
            let arriving = incoming
                .iter()
                .filter(|&&c| self.node(c).kind == kind)
                .count();
            if staying + arriving > limit {
                return Err(DomError::hierarchy_request(format!(
                    "{parent_kind:?} nodes allow at most {limit} {kind:?} child"
                )));
            }
        }
        Ok(())
    }

    /// Collects the nodes an insertion would actually attach: the node
    /// itself, or a fragment's children (expanded recursively).
    fn collect_incoming(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if self.node(id).kind == NodeKind::DocumentFragment {
            for child in self.children(id) {
                self.collect_incoming(child, out);
            }
        } else {
            out.push(id);
        }
    }

    fn child_index(&self, parent: NodeId, child: NodeId) -> usize {
        self.node(parent)
            .children
            .position(child)
            .unwrap_or_else(|| unreachable!("validated child missing from its parent"))
    }

    /// Links an unattached node before `reference`, or at the end.
    pub(crate) fn link_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        debug_assert!(self.node(child).parent.is_none(), "child is still attached");
        let children = &mut self.node_mut(parent).children;
        match reference.and_then(|r| children.position(r)) {
            Some(index) => children.insert(index, child),
            None => children.push(child),
        }
        self.node_mut(child).parent = Some(parent);
    }

    /// Detaches a node from its parent, if it has one.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).parent else {
            return;
        };
        let index = self.child_index(parent, id);
        self.node_mut(parent).children.remove(index);
        self.node_mut(id).parent = None;
    }
}
