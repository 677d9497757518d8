//! Node cloning.

use super::{Dom, NodeId, NodeKind};
use crate::error::DomError;

impl Dom {
    /// Returns a duplicate of `id`, owned by the same document and unattached.
    ///
    /// A shallow clone copies the node's kind, name, value and read-only
    /// flag, but never its children or attributes. A deep clone also clones
    /// every attribute and child, recursively, under the new node.
    ///
    /// # Errors
    ///
    /// `NotSupported` if `id` is a document node.
    ///
    /// # Examples
    ///
    /// ```
    /// use domcore::Dom;
    ///
    /// let mut dom = Dom::new();
    /// let doc = dom.create_document();
    /// let p = dom.create_element(doc, "p").unwrap();
    /// let t = dom.create_text_node(doc, "hi").unwrap();
    /// dom.append_child(p, t).unwrap();
    ///
    /// let shallow = dom.clone_node(p, false).unwrap();
    /// assert!(!dom.has_child_nodes(shallow));
    ///
    /// let deep = dom.clone_node(p, true).unwrap();
    /// assert_eq!(dom.child_nodes(deep).length(), 1);
    /// assert_ne!(dom.first_child(deep), Some(t));
    /// ```
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> Result<NodeId, DomError> {
        if self.node(id).kind == NodeKind::Document {
            return Err(DomError::not_supported("document nodes cannot be cloned"));
        }
        let copy = if deep {
            self.clone_subtree(id)
        } else {
            self.copy_node(id)
        };
        tracing::trace!(source = ?id, clone = ?copy, deep, "clone_node");
        Ok(copy)
    }

    /// Copies a subtree using an explicit stack of `(source, copy)` pairs.
    fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        let root = self.copy_node(id);
        let mut pending = vec![(id, root)];

        while let Some((source, copy)) = pending.pop() {
            let attributes = self.node(source).attributes.clone();
            for attr in attributes {
                let attr_copy = self.copy_node(attr);
                self.node_mut(attr_copy).owner_element = Some(copy);
                self.node_mut(copy).attributes.push(attr_copy);
                pending.push((attr, attr_copy));
            }

            // Linked in order here, so the pop order below does not matter.
            let children: Vec<NodeId> = self.children(source).collect();
            for child in children {
                let child_copy = self.copy_node(child);
                self.link_before(copy, child_copy, None);
                pending.push((child, child_copy));
            }
        }
        root
    }

    fn copy_node(&mut self, id: NodeId) -> NodeId {
        let data = self.node(id).detached_copy();
        self.alloc(data)
    }
}
