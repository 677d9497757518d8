//! Node type definitions.
//!
//! The `NodeKind` enum is the closed set of node types in a document tree,
//! corresponding to the DOM Level 1 `NodeType` constants. Unlike a payload
//! enum, it is a plain tag: the name, value and navigation links of a node
//! live in `NodeData`.

/// The kind of a node.
///
/// Discriminants match the DOM `nodeType` codes (`ELEMENT_NODE` = 1 through
/// `NOTATION_NODE` = 12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum NodeKind {
    /// An element, e.g. `<div>`.
    Element = 1,
    /// An attribute of an element. Never a child of another node.
    Attribute = 2,
    /// Character data inside an element or attribute.
    Text = 3,
    /// A CDATA section, e.g. `<![CDATA[...]]>`.
    CData = 4,
    /// An unexpanded entity reference, e.g. `&amp;`.
    EntityReference = 5,
    /// An entity declared in the document type.
    Entity = 6,
    /// A processing instruction, e.g. `<?target data?>`.
    ProcessingInstruction = 7,
    /// A comment, e.g. `<!-- ... -->`.
    Comment = 8,
    /// The document node. Never a child of another node.
    Document = 9,
    /// A document type declaration, e.g. `<!DOCTYPE html>`.
    DocumentType = 10,
    /// A lightweight container whose children are spliced into the target
    /// on insertion. Never a child of another node.
    DocumentFragment = 11,
    /// A notation declared in the document type.
    Notation = 12,
}

impl NodeKind {
    /// All kinds in `nodeType` order.
    pub const ALL: [Self; 12] = [
        Self::Element,
        Self::Attribute,
        Self::Text,
        Self::CData,
        Self::EntityReference,
        Self::Entity,
        Self::ProcessingInstruction,
        Self::Comment,
        Self::Document,
        Self::DocumentType,
        Self::DocumentFragment,
        Self::Notation,
    ];

    /// Returns the DOM `nodeType` code.
    #[must_use]
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Looks up a kind by its `nodeType` code.
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }

    /// The fixed `nodeName` for kinds that do not carry their own name.
    #[must_use]
    pub fn fixed_name(self) -> Option<&'static str> {
        match self {
            Self::Document => Some("#document"),
            Self::DocumentFragment => Some("#document-fragment"),
            Self::Text => Some("#text"),
            Self::Comment => Some("#comment"),
            Self::CData => Some("#cdata-section"),
            _ => None,
        }
    }

    /// Whether nodes of this kind carry a `nodeValue`.
    #[must_use]
    pub fn has_value(self) -> bool {
        matches!(
            self,
            Self::Attribute | Self::Text | Self::CData | Self::Comment | Self::ProcessingInstruction
        )
    }

    /// Whether this kind supports character-data editing.
    #[must_use]
    pub fn is_character_data(self) -> bool {
        matches!(self, Self::Text | Self::CData | Self::Comment)
    }

    /// Whether a node of this kind may ever have a parent.
    ///
    /// Documents, fragments and attributes are never children.
    #[must_use]
    pub fn can_have_parent(self) -> bool {
        !matches!(self, Self::Document | Self::DocumentFragment | Self::Attribute)
    }
}
