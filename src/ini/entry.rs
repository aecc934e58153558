//! A single key line inside a section

use serde::{Deserialize, Serialize};

use super::comment::{self, Comment, CommentPosition};

/// Sort rank meaning "no pattern matched / not being sorted".
pub(crate) const UNRANKED: usize = usize::MAX;

fn unranked() -> usize {
    UNRANKED
}

/// One `key=value` (or bare `key`) line.
///
/// An entry keeps its identity across overwrites: setting an existing key
/// replaces the value but leaves the entry's position and comments alone.
/// `value` is `None` when the source line had no `=` at all, which is
/// distinct from `Some("")` (a line ending in `=`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    pub value: Option<String>,
    pub comments: Vec<Comment>,
    /// Number of blank lines that followed this entry in the source.
    pub blank_lines_after: usize,
    /// Transient rank used by pattern sorting; reset to unranked afterwards.
    #[serde(skip, default = "unranked")]
    pub(crate) sort_rank: usize,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Entry {
            key: key.into(),
            value,
            comments: Vec::new(),
            blank_lines_after: 0,
            sort_rank: UNRANKED,
        }
    }

    /// Attach a comment unless the same annotation is already present.
    pub fn attach(&mut self, comment: Comment) -> bool {
        comment::attach(&mut self.comments, comment)
    }

    /// Comments at a given position, in attachment order.
    pub fn comments_at(&self, position: CommentPosition) -> impl Iterator<Item = &Comment> {
        self.comments.iter().filter(move |c| c.position == position)
    }
}
