//! The document root and its query/mutation API
//!
//! A `Document` owns its sections transitively and is the only type callers
//! normally touch: construction (empty or parsed), every query and mutation,
//! and serialization all go through it. Lookups are linear scans in insertion
//! order, which is the iteration order everywhere; target files are at most a
//! few thousand lines, so no index structure is kept.
//!
//! Every mutating operation marks the document dirty. The flag clears on a
//! successful parse or save, so callers can skip rewriting untouched files.

use std::path::PathBuf;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::comment::Comment;
use super::section::Section;
use super::value;

/// An ordered, name-unique collection of sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub sections: Vec<Section>,
    /// Path the document was loaded from, if any; `save` writes back here.
    pub source_path: Option<PathBuf>,
    #[serde(skip)]
    pub(crate) dirty: bool,
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

impl Document {
    /// An empty document with no backing file.
    pub fn new() -> Self {
        Document {
            sections: Vec::new(),
            source_path: None,
            dirty: false,
        }
    }

    /// True when the document has been mutated since the last parse or save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ---- section queries ----------------------------------------------

    pub fn find_section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn find_section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name == name)
    }

    pub fn section_index(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.name == name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section_index(name).is_some()
    }

    /// Section names in stored order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    // ---- value queries --------------------------------------------------

    /// The raw value of `key` in `section`, if the entry exists and its
    /// source line had an `=`.
    pub fn get_value(&self, section: &str, key: &str) -> Option<&str> {
        self.find_section(section)
            .and_then(|s| s.find(key))
            .and_then(|e| e.value.as_deref())
    }

    /// Look up a value, falling back to `default` on any miss: missing
    /// section, missing key, or a bare key with no value.
    pub fn get<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.get_value(section, key).unwrap_or(default)
    }

    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        value::bool_or(self.get_value(section, key), default)
    }

    pub fn get_u8(&self, section: &str, key: &str, default: u8) -> u8 {
        value::parse_or(self.get_value(section, key), default)
    }

    pub fn get_i16(&self, section: &str, key: &str, default: i16) -> i16 {
        value::parse_or(self.get_value(section, key), default)
    }

    pub fn get_i32(&self, section: &str, key: &str, default: i32) -> i32 {
        value::parse_or(self.get_value(section, key), default)
    }

    pub fn get_i64(&self, section: &str, key: &str, default: i64) -> i64 {
        value::parse_or(self.get_value(section, key), default)
    }

    pub fn get_f32(&self, section: &str, key: &str, default: f32) -> f32 {
        value::parse_or(self.get_value(section, key), default)
    }

    pub fn get_f64(&self, section: &str, key: &str, default: f64) -> f64 {
        value::parse_or(self.get_value(section, key), default)
    }

    // ---- key mutations ----------------------------------------------------

    /// Set `section.key = value`, creating the section and/or the key when
    /// absent. An existing entry keeps its position and comments.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.dirty = true;
        let section = self.section_entry(section);
        section.set(key, Some(value.into()));
    }

    /// Remove `key` from `section`. Returns true when an entry was removed.
    pub fn remove_key(&mut self, section: &str, key: &str) -> bool {
        self.dirty = true;
        match self.find_section_mut(section) {
            Some(s) => s.remove(key),
            None => false,
        }
    }

    /// Rename `key` to `new_key` in place. Fails (returns false) when the
    /// entry is missing or the new name would collide with an existing key.
    pub fn rename_key(&mut self, section: &str, key: &str, new_key: &str) -> bool {
        self.dirty = true;
        let Some(s) = self.find_section_mut(section) else {
            return false;
        };
        if s.find(new_key).is_some() {
            return false;
        }
        match s.find_mut(key) {
            Some(entry) => {
                entry.key = new_key.to_string();
                true
            }
            None => false,
        }
    }

    /// Reinsert `key` at `index` within its section, clamped to the valid
    /// range. Returns true when the entry exists.
    pub fn set_key_position(&mut self, section: &str, key: &str, index: usize) -> bool {
        self.dirty = true;
        let Some(s) = self.find_section_mut(section) else {
            return false;
        };
        let Some(from) = s.position(key) else {
            return false;
        };
        let entry = s.entries.remove(from);
        let to = index.min(s.entries.len());
        s.entries.insert(to, entry);
        true
    }

    /// Stable multi-key sort of a section's entries by regex patterns: an
    /// entry's rank is the index of the first pattern its key matches,
    /// unmatched keys keep their relative order at the end. Patterns that
    /// fail to compile never match. Returns true when the section exists.
    pub fn sort_section_keys(&mut self, section: &str, patterns: &[&str]) -> bool {
        self.dirty = true;
        let compiled: Vec<Regex> = patterns.iter().filter_map(|p| Regex::new(p).ok()).collect();
        match self.find_section_mut(section) {
            Some(s) => {
                s.sort_by_patterns(&compiled);
                true
            }
            None => false,
        }
    }

    // ---- section mutations -------------------------------------------

    /// Append a new section, or re-open the existing one of that name.
    pub fn add_section(&mut self, name: &str) -> &mut Section {
        self.dirty = true;
        self.section_entry(name)
    }

    /// Remove a whole section. Returns true when something was removed.
    pub fn remove_section(&mut self, name: &str) -> bool {
        self.dirty = true;
        match self.section_index(name) {
            Some(index) => {
                self.sections.remove(index);
                true
            }
            None => false,
        }
    }

    /// Rename a section in place. Fails (returns false) when the section is
    /// missing or the new name would collide with an existing section.
    pub fn rename_section(&mut self, name: &str, new_name: &str) -> bool {
        self.dirty = true;
        if self.has_section(new_name) {
            return false;
        }
        match self.find_section_mut(name) {
            Some(s) => {
                s.name = new_name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn move_section_first(&mut self, name: &str) -> bool {
        self.move_section_to(name, 0)
    }

    pub fn move_section_last(&mut self, name: &str) -> bool {
        self.move_section_to(name, usize::MAX)
    }

    /// Reinsert a section at `index`, clamped to the valid range.
    pub fn move_section_to(&mut self, name: &str, index: usize) -> bool {
        self.dirty = true;
        let Some(from) = self.section_index(name) else {
            return false;
        };
        let section = self.sections.remove(from);
        let to = index.min(self.sections.len());
        self.sections.insert(to, section);
        true
    }

    // ---- compositing ---------------------------------------------------

    /// Layer `other` over this document: new sections are appended whole, new
    /// keys are appended, existing keys take `other`'s value, and comments
    /// from `other`'s entries are unioned in (by text and position). This is
    /// the primitive used to apply override files.
    pub fn merge(&mut self, other: &Document) {
        self.dirty = true;
        for other_section in &other.sections {
            match self.find_section_mut(&other_section.name) {
                None => self.sections.push(other_section.clone()),
                Some(section) => {
                    for other_entry in &other_section.entries {
                        match section.find_mut(&other_entry.key) {
                            Some(entry) => {
                                entry.value = other_entry.value.clone();
                                for comment in &other_entry.comments {
                                    entry.attach(comment.clone());
                                }
                            }
                            None => section.entries.push(other_entry.clone()),
                        }
                    }
                }
            }
        }
    }

    /// Replace a section's entries with synthetic zero-based numeric keys,
    /// one per value. The section is created when absent; its comments and
    /// blank run are left alone.
    pub fn replace_section_with_values<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirty = true;
        let section = self.section_entry(name);
        section.entries.clear();
        for (index, value) in values.into_iter().enumerate() {
            section.set(&index.to_string(), Some(value.into()));
        }
    }

    /// Replace a section's entries with explicit key/value pairs. Later
    /// duplicates of a key overwrite earlier ones, preserving uniqueness.
    pub fn replace_section_with_pairs<I, K, V>(&mut self, name: &str, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.dirty = true;
        let section = self.section_entry(name);
        section.entries.clear();
        for (key, value) in pairs {
            section.set(&key.into(), Some(value.into()));
        }
    }

    // ---- internals ----------------------------------------------------

    /// Existing section of that name, or a freshly appended one.
    pub(crate) fn section_entry(&mut self, name: &str) -> &mut Section {
        let index = match self.section_index(name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    /// Attach a comment to a section header. Creates the section when absent.
    pub fn comment_section(&mut self, name: &str, comment: Comment) -> bool {
        self.dirty = true;
        self.section_entry(name).attach(comment)
    }

    /// Attach a comment to an entry. Returns false when the entry is missing
    /// or the annotation is already present.
    pub fn comment_key(&mut self, section: &str, key: &str, comment: Comment) -> bool {
        self.dirty = true;
        match self.find_section_mut(section).and_then(|s| s.find_mut(key)) {
            Some(entry) => entry.attach(comment),
            None => false,
        }
    }
}
