//! Comment annotations attached to sections and entries
//!
//! A comment never floats free in the final model: the parser attributes
//! every `;` line (or trailing `;` fragment) to a section or an entry, and
//! the serializer replays it from there. The position tag records where the
//! comment sat relative to its owner's declaration so the replay is exact.

use serde::{Deserialize, Serialize};

/// Placement of a comment relative to the line it annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentPosition {
    /// Stands alone on a line before its owner's declaration.
    Before,
    /// Shares the line with its owner's declaration (a trailing comment on a
    /// `[section]` or `key=value` line).
    Middle,
    /// Stands alone on a line immediately after its owner's declaration,
    /// before the next blank line or content.
    After,
}

/// A single comment, stored exactly as it appeared in the source.
///
/// `text` is everything after the `;` marker, verbatim (including any space
/// that followed the marker). `pad` counts the whitespace characters between
/// the start of the line (or, for Middle comments, the end of the value) and
/// the `;` marker; it is replayed on write so that untouched lines come back
/// byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub position: CommentPosition,
    pub pad: usize,
}

impl Comment {
    pub fn new(text: impl Into<String>, position: CommentPosition, pad: usize) -> Self {
        Comment {
            text: text.into(),
            position,
            pad,
        }
    }

    /// Two comments are the same annotation when text and position match.
    /// `pad` is formatting, not identity.
    pub fn same_annotation(&self, other: &Comment) -> bool {
        self.text == other.text && self.position == other.position
    }

    /// Render this comment as a standalone line (Before/After positions).
    pub fn to_line(&self) -> String {
        format!("{};{}", " ".repeat(self.pad), self.text)
    }

    /// Render this comment as a trailing fragment (Middle position).
    pub fn to_trailer(&self) -> String {
        self.to_line()
    }
}

/// Attach `comment` to `comments` unless the same annotation is already
/// present. Returns true when the comment was actually added.
pub(crate) fn attach(comments: &mut Vec<Comment>, comment: Comment) -> bool {
    if comments.iter().any(|c| c.same_annotation(&comment)) {
        return false;
    }
    comments.push(comment);
    true
}
