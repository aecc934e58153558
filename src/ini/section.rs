//! A named `[section]` and its ordered entries

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::comment::{self, Comment, CommentPosition};
use super::entry::{Entry, UNRANKED};

/// A `[name]` block: ordered, key-unique entries plus the comments and
/// trailing blank run attributed to the header line itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub entries: Vec<Entry>,
    pub comments: Vec<Comment>,
    /// Number of blank lines that followed the `[name]` line in the source.
    pub blank_lines_after: usize,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Section {
            name: name.into(),
            entries: Vec::new(),
            comments: Vec::new(),
            blank_lines_after: 0,
        }
    }

    pub fn find(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.key == key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    /// Set `key` to `value`, overwriting in place when the key exists
    /// (identity, position, and comments of the entry are preserved) and
    /// appending a new entry otherwise. Returns the index of the entry.
    pub fn set(&mut self, key: &str, value: Option<String>) -> usize {
        match self.position(key) {
            Some(index) => {
                self.entries[index].value = value;
                index
            }
            None => {
                self.entries.push(Entry::new(key, value));
                self.entries.len() - 1
            }
        }
    }

    /// Remove the entry with `key`. Returns true when something was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.position(key) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Attach a comment to the section header unless already present.
    pub fn attach(&mut self, comment: Comment) -> bool {
        comment::attach(&mut self.comments, comment)
    }

    /// Comments at a given position, in attachment order.
    pub fn comments_at(&self, position: CommentPosition) -> impl Iterator<Item = &Comment> {
        self.comments.iter().filter(move |c| c.position == position)
    }

    /// Stable multi-key sort: each entry is ranked by the index of the first
    /// pattern its key matches, unmatched keys sink to the end, and ties keep
    /// their prior relative order. Ranks are reset afterwards so a later sort
    /// starts clean.
    pub(crate) fn sort_by_patterns(&mut self, patterns: &[Regex]) {
        for entry in &mut self.entries {
            entry.sort_rank = patterns
                .iter()
                .position(|p| p.is_match(&entry.key))
                .unwrap_or(UNRANKED);
        }
        self.entries.sort_by_key(|e| e.sort_rank);
        for entry in &mut self.entries {
            entry.sort_rank = UNRANKED;
        }
    }
}
