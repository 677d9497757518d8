//! Attribute maps.
//!
//! Attributes are nodes in their own right, but they are associated with
//! an element rather than being its children: they never appear in a child
//! list and never have a parent. Each element holds its attributes in an
//! ordered map keyed by name, exposed as a [`NamedNodeMap`].

use super::{Dom, NodeId, NodeKind};
use crate::error::DomError;
use crate::util::dom_string::DomString;
use crate::util::names::is_valid_name;

/// A read-only view of an element's attributes, addressable by name or index.
#[derive(Debug, Clone, Copy)]
pub struct NamedNodeMap<'a> {
    dom: &'a Dom,
    items: &'a [NodeId],
}

impl<'a> NamedNodeMap<'a> {
    /// The number of attributes.
    #[must_use]
    pub fn length(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the `index`th attribute, or `None` if out of range.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<NodeId> {
        self.items.get(index).copied()
    }

    /// Looks up an attribute node by name.
    #[must_use]
    pub fn get_named_item(&self, name: &str) -> Option<NodeId> {
        self.items
            .iter()
            .copied()
            .find(|&id| self.dom.node(id).name == *name)
    }

    /// Iterates over the attribute nodes in order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'a, NodeId>> {
        self.items.iter().copied()
    }
}

impl Dom {
    /// Returns the attributes of a node. Empty for non-elements.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> NamedNodeMap<'_> {
        NamedNodeMap {
            dom: self,
            items: &self.node(id).attributes,
        }
    }

    /// Returns the element an attribute node is attached to.
    #[must_use]
    pub fn owner_element(&self, attr: NodeId) -> Option<NodeId> {
        self.node(attr).owner_element
    }

    /// Returns the attribute node named `name` on `element`.
    #[must_use]
    pub fn get_attribute_node(&self, element: NodeId, name: &str) -> Option<NodeId> {
        self.attributes(element).get_named_item(name)
    }

    /// Returns the value of the attribute named `name` on `element`.
    #[must_use]
    pub fn get_attribute(&self, element: NodeId, name: &str) -> Option<&DomString> {
        self.get_attribute_node(element, name)
            .and_then(|attr| self.node(attr).value.as_ref())
    }

    /// Adds `attr` to the attributes of `element`, replacing any attribute
    /// with the same name.
    ///
    /// Returns the replaced attribute, now detached, or `None`. Setting an
    /// attribute that is already on this element returns it unchanged.
    ///
    /// # Errors
    ///
    /// - `NoModificationAllowed` if `element` is read-only.
    /// - `HierarchyRequest` if `element` is not an element or `attr` is not
    ///   an attribute.
    /// - `WrongDocument` if `attr` belongs to another document.
    /// - `InUseAttribute` if `attr` is attached to another element.
    pub fn set_named_item(
        &mut self,
        element: NodeId,
        attr: NodeId,
    ) -> Result<Option<NodeId>, DomError> {
        self.check_attribute_host(element)?;
        if self.tree_document(element) != self.tree_document(attr) {
            return Err(DomError::wrong_document(
                "attribute was created by a different document",
            ));
        }
        if self.node(attr).kind != NodeKind::Attribute {
            return Err(DomError::hierarchy_request("node is not an attribute"));
        }
        match self.node(attr).owner_element {
            Some(owner) if owner == element => return Ok(Some(attr)),
            Some(_) => {
                return Err(DomError::in_use_attribute(
                    "attribute is in use by another element",
                ))
            }
            None => {}
        }

        let name = self.node(attr).name.clone();
        let existing = self.get_attribute_node(element, name.as_str());
        self.node_mut(attr).owner_element = Some(element);
        let replaced = match existing {
            Some(old) => {
                let attributes = &mut self.node_mut(element).attributes;
                if let Some(slot) = attributes.iter_mut().find(|id| **id == old) {
                    *slot = attr;
                }
                self.node_mut(old).owner_element = None;
                Some(old)
            }
            None => {
                self.node_mut(element).attributes.push(attr);
                None
            }
        };
        tracing::trace!(?element, ?attr, ?replaced, "set_named_item");
        Ok(replaced)
    }

    /// Removes the attribute named `name` from `element` and returns it.
    ///
    /// # Errors
    ///
    /// - `NoModificationAllowed` if `element` is read-only.
    /// - `HierarchyRequest` if `element` is not an element.
    /// - `NotFound` if there is no such attribute.
    pub fn remove_named_item(&mut self, element: NodeId, name: &str) -> Result<NodeId, DomError> {
        self.check_attribute_host(element)?;
        let Some(attr) = self.get_attribute_node(element, name) else {
            return Err(DomError::not_found(format!("no attribute named '{name}'")));
        };
        self.node_mut(element).attributes.retain(|&id| id != attr);
        self.node_mut(attr).owner_element = None;
        tracing::trace!(?element, ?attr, "remove_named_item");
        Ok(attr)
    }

    /// Sets the value of the attribute `name` on `element`, creating the
    /// attribute if needed.
    ///
    /// # Errors
    ///
    /// - `NoModificationAllowed` if `element` or the existing attribute is
    ///   read-only.
    /// - `HierarchyRequest` if `element` is not an element.
    /// - `InvalidCharacter` if `name` is not a valid XML name.
    ///
    /// # Examples
    ///
    /// ```
    /// use domcore::Dom;
    ///
    /// let mut dom = Dom::new();
    /// let doc = dom.create_document();
    /// let a = dom.create_element(doc, "a").unwrap();
    /// dom.set_attribute(a, "href", "/home").unwrap();
    /// assert_eq!(dom.get_attribute(a, "href").unwrap(), "/home");
    /// ```
    pub fn set_attribute(
        &mut self,
        element: NodeId,
        name: &str,
        value: impl Into<DomString>,
    ) -> Result<(), DomError> {
        self.check_attribute_host(element)?;
        if !is_valid_name(name) {
            return Err(DomError::invalid_character(format!(
                "'{name}' is not a valid XML name"
            )));
        }
        if let Some(attr) = self.get_attribute_node(element, name) {
            return self.set_node_value(attr, value);
        }
        let document = self.tree_document(element);
        let attr = self.create_attribute(document, name)?;
        self.node_mut(attr).value = Some(value.into());
        self.set_named_item(element, attr)?;
        Ok(())
    }

    /// Removes the attribute `name` from `element`. Missing names are ignored.
    ///
    /// # Errors
    ///
    /// - `NoModificationAllowed` if `element` is read-only.
    /// - `HierarchyRequest` if `element` is not an element.
    pub fn remove_attribute(&mut self, element: NodeId, name: &str) -> Result<(), DomError> {
        match self.remove_named_item(element, name) {
            Err(e) if e.code() == crate::error::ExceptionCode::NotFound => Ok(()),
            other => other.map(|_| ()),
        }
    }

    fn check_attribute_host(&self, element: NodeId) -> Result<(), DomError> {
        let node = self.node(element);
        if node.read_only {
            return Err(DomError::no_modification_allowed("element is read-only"));
        }
        if node.kind != NodeKind::Element {
            return Err(DomError::hierarchy_request("only elements have attributes"));
        }
        Ok(())
    }
}
