//! Editing of text, comment and CDATA content.
//!
//! Offsets and counts are measured in UTF-16 code units, so a character
//! outside the Basic Multilingual Plane counts as two. Ranges that run past
//! the end are clamped; ranges whose ends fall inside a surrogate pair are
//! rejected with `IndexSize`.

use std::ops::Range;

use super::{Dom, NodeId};
use crate::error::DomError;
use crate::util::dom_string::DomString;

impl Dom {
    /// Returns the character data of a text, comment or CDATA node.
    ///
    /// # Errors
    ///
    /// `NotSupported` for other kinds.
    pub fn data(&self, id: NodeId) -> Result<&DomString, DomError> {
        let node = self.node(id);
        match &node.value {
            Some(value) if node.kind.is_character_data() => Ok(value),
            _ => Err(DomError::not_supported(format!(
                "{:?} nodes hold no character data",
                node.kind
            ))),
        }
    }

    /// Returns the length of the character data in UTF-16 code units.
    ///
    /// # Errors
    ///
    /// `NotSupported` for kinds other than text, comment and CDATA.
    pub fn data_length(&self, id: NodeId) -> Result<usize, DomError> {
        self.data(id).map(DomString::len_utf16)
    }

    /// Extracts `count` code units starting at `offset`.
    ///
    /// # Errors
    ///
    /// - `IndexSize` if `offset` is past the end or the range splits a
    ///   surrogate pair.
    /// - `NotSupported` for kinds other than text, comment and CDATA.
    ///
    /// # Examples
    ///
    /// ```
    /// use domcore::Dom;
    ///
    /// let mut dom = Dom::new();
    /// let doc = dom.create_document();
    /// let t = dom.create_text_node(doc, "hello world").unwrap();
    /// assert_eq!(dom.substring_data(t, 6, 100).unwrap(), "world");
    /// ```
    pub fn substring_data(&self, id: NodeId, offset: usize, count: usize) -> Result<String, DomError> {
        let data = self.data(id)?;
        let range = byte_range(data, offset, count)?;
        Ok(data.as_str()[range].to_owned())
    }

    /// Appends `arg` to the character data.
    ///
    /// # Errors
    ///
    /// `NoModificationAllowed` if the node is read-only, `NotSupported` for
    /// kinds other than text, comment and CDATA.
    pub fn append_data(&mut self, id: NodeId, arg: &str) -> Result<(), DomError> {
        self.edit_data(id, "append_data", |data| {
            data.as_mut_string().push_str(arg);
            Ok(())
        })
    }

    /// Inserts `arg` at `offset`.
    ///
    /// # Errors
    ///
    /// - `NoModificationAllowed` if the node is read-only.
    /// - `NotSupported` for kinds other than text, comment and CDATA.
    /// - `IndexSize` if `offset` is past the end or splits a surrogate pair.
    pub fn insert_data(&mut self, id: NodeId, offset: usize, arg: &str) -> Result<(), DomError> {
        self.edit_data(id, "insert_data", |data| {
            let at = data.byte_offset(offset).ok_or_else(|| out_of_range(offset))?;
            data.as_mut_string().insert_str(at, arg);
            Ok(())
        })
    }

    /// Removes `count` code units starting at `offset`.
    ///
    /// # Errors
    ///
    /// Same as [`replace_data`](Dom::replace_data).
    pub fn delete_data(&mut self, id: NodeId, offset: usize, count: usize) -> Result<(), DomError> {
        self.edit_data(id, "delete_data", |data| {
            let range = byte_range(data, offset, count)?;
            data.as_mut_string().replace_range(range, "");
            Ok(())
        })
    }

    /// Replaces `count` code units starting at `offset` with `arg`.
    ///
    /// # Errors
    ///
    /// - `NoModificationAllowed` if the node is read-only.
    /// - `NotSupported` for kinds other than text, comment and CDATA.
    /// - `IndexSize` if `offset` is past the end or the range splits a
    ///   surrogate pair.
    pub fn replace_data(
        &mut self,
        id: NodeId,
        offset: usize,
        count: usize,
        arg: &str,
    ) -> Result<(), DomError> {
        self.edit_data(id, "replace_data", |data| {
            let range = byte_range(data, offset, count)?;
            data.as_mut_string().replace_range(range, arg);
            Ok(())
        })
    }

    fn edit_data(
        &mut self,
        id: NodeId,
        op: &'static str,
        edit: impl FnOnce(&mut DomString) -> Result<(), DomError>,
    ) -> Result<(), DomError> {
        let node = self.node_mut(id);
        let kind = node.kind;
        let result = if node.read_only {
            Err(DomError::no_modification_allowed("node is read-only"))
        } else {
            match node.value.as_mut() {
                Some(value) if kind.is_character_data() => edit(value),
                _ => Err(DomError::not_supported(format!(
                    "{kind:?} nodes hold no character data"
                ))),
            }
        };
        match &result {
            Ok(()) => tracing::trace!(op, node = ?id, "edited character data"),
            Err(err) => tracing::debug!(op, code = %err.code(), reason = err.message(), "rejected"),
        }
        result
    }
}

/// Maps a UTF-16 `(offset, count)` pair to a byte range, clamping the end.
fn byte_range(data: &DomString, offset: usize, count: usize) -> Result<Range<usize>, DomError> {
    let start = data.byte_offset(offset).ok_or_else(|| out_of_range(offset))?;
    let end_units = offset.saturating_add(count).min(data.len_utf16());
    let end = data
        .byte_offset(end_units)
        .ok_or_else(|| out_of_range(end_units))?;
    Ok(start..end)
}

fn out_of_range(offset: usize) -> DomError {
    DomError::index_size(format!(
        "offset {offset} is out of range or splits a surrogate pair"
    ))
}
