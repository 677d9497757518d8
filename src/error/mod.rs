//! Error types for tree operations.
//!
//! Every fallible operation in this crate returns a [`DomError`] carrying one
//! of the ten [`ExceptionCode`]s defined by DOM Level 1. The set is closed:
//! no operation invents a code outside it.
//!
//! The tree engine itself raises only [`ExceptionCode::HierarchyRequest`],
//! [`ExceptionCode::WrongDocument`], [`ExceptionCode::NoModificationAllowed`]
//! and [`ExceptionCode::NotFound`]. The remaining codes come from node
//! factories, attribute maps and character-data editing.

use std::borrow::Cow;
use std::fmt;

/// The closed set of DOM exception codes.
///
/// Discriminants match the numeric `ExceptionCode` constants from DOM Level 1
/// (`INDEX_SIZE_ERR` = 1 through `INUSE_ATTRIBUTE_ERR` = 10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum ExceptionCode {
    /// An index or size is negative or greater than the allowed value.
    IndexSize = 1,
    /// The specified range of text does not fit into a `DomString`.
    StringSize = 2,
    /// A node is inserted somewhere it doesn't belong.
    HierarchyRequest = 3,
    /// A node is used in a different document than the one that created it.
    WrongDocument = 4,
    /// An invalid character is specified, such as in a name.
    InvalidCharacter = 5,
    /// Data is specified for a node which does not support data.
    NoDataAllowed = 6,
    /// An attempt is made to modify an object where modifications are not allowed.
    NoModificationAllowed = 7,
    /// A node is referenced in a context where it does not exist.
    NotFound = 8,
    /// The implementation does not support the requested object or operation.
    NotSupported = 9,
    /// An attribute is added that is already in use elsewhere.
    InUseAttribute = 10,
}

impl ExceptionCode {
    /// All codes in numeric order.
    pub const ALL: [Self; 10] = [
        Self::IndexSize,
        Self::StringSize,
        Self::HierarchyRequest,
        Self::WrongDocument,
        Self::InvalidCharacter,
        Self::NoDataAllowed,
        Self::NoModificationAllowed,
        Self::NotFound,
        Self::NotSupported,
        Self::InUseAttribute,
    ];

    /// Returns the numeric code.
    #[must_use]
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Looks up a code by its numeric value.
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Returns the constant name used by the DOM recommendation.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::IndexSize => "INDEX_SIZE_ERR",
            Self::StringSize => "DOMSTRING_SIZE_ERR",
            Self::HierarchyRequest => "HIERARCHY_REQUEST_ERR",
            Self::WrongDocument => "WRONG_DOCUMENT_ERR",
            Self::InvalidCharacter => "INVALID_CHARACTER_ERR",
            Self::NoDataAllowed => "NO_DATA_ALLOWED_ERR",
            Self::NoModificationAllowed => "NO_MODIFICATION_ALLOWED_ERR",
            Self::NotFound => "NOT_FOUND_ERR",
            Self::NotSupported => "NOT_SUPPORTED_ERR",
            Self::InUseAttribute => "INUSE_ATTRIBUTE_ERR",
        }
    }
}

impl fmt::Display for ExceptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The error returned by every fallible tree operation.
///
/// Match on [`DomError::code`] to handle a specific failure; the message is
/// for humans only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct DomError {
    code: ExceptionCode,
    message: Cow<'static, str>,
}

impl DomError {
    /// Creates an error with the given code and message.
    pub fn new(code: ExceptionCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The typed discriminant of this error.
    #[must_use]
    pub fn code(&self) -> ExceptionCode {
        self.code
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn index_size(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ExceptionCode::IndexSize, message)
    }

    pub(crate) fn hierarchy_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ExceptionCode::HierarchyRequest, message)
    }

    pub(crate) fn wrong_document(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ExceptionCode::WrongDocument, message)
    }

    pub(crate) fn invalid_character(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ExceptionCode::InvalidCharacter, message)
    }

    pub(crate) fn no_data_allowed(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ExceptionCode::NoDataAllowed, message)
    }

    pub(crate) fn no_modification_allowed(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ExceptionCode::NoModificationAllowed, message)
    }

    pub(crate) fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ExceptionCode::NotFound, message)
    }

    pub(crate) fn not_supported(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ExceptionCode::NotSupported, message)
    }

    pub(crate) fn in_use_attribute(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ExceptionCode::InUseAttribute, message)
    }
}

impl From<DomError> for ExceptionCode {
    fn from(err: DomError) -> Self {
        err.code
    }
}
