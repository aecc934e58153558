//! Serializer inverting the parser's attribution
//!
//! The writer walks the document in stored order and replays each owner's
//! comments and blank run exactly where the parser found them: Before
//! comments above the declaration, the single Middle comment on the
//! declaration line, After comments below it, then the blank run. With
//! comments and blank preservation enabled, output of an unmodified parse is
//! byte-identical to the input for the supported constructs.

use serde::{Deserialize, Serialize};

use super::comment::CommentPosition;
use super::document::Document;
use super::entry::Entry;
use super::section::Section;

/// Output controls for [Document::render] and the save entry points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteOptions {
    /// Emit comments at all. Off strips every comment from the output.
    pub comments: bool,
    /// Sections whose blank-line runs are preserved. `None` preserves them
    /// for every section; sections not on the list get a single blank line
    /// after their last entry as a separator instead.
    pub blank_lines_for: Option<Vec<String>>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            comments: true,
            blank_lines_for: None,
        }
    }
}

impl WriteOptions {
    pub fn preserves_blanks(&self, section: &str) -> bool {
        match &self.blank_lines_for {
            None => true,
            Some(names) => names.iter().any(|n| n == section),
        }
    }
}

impl Document {
    /// Render the document to INI text. Every line, including the last, is
    /// terminated with `\n`. Rendering is infallible; file output goes
    /// through the loader.
    pub fn render(&self, options: &WriteOptions) -> String {
        let mut lines: Vec<String> = Vec::new();
        for section in &self.sections {
            render_section(&mut lines, section, options);
        }
        let mut out = lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

fn render_section(lines: &mut Vec<String>, section: &Section, options: &WriteOptions) {
    if options.comments {
        for comment in section.comments_at(CommentPosition::Before) {
            lines.push(comment.to_line());
        }
    }

    let mut header = format!("[{}]", section.name);
    if options.comments {
        if let Some(comment) = section.comments_at(CommentPosition::Middle).next() {
            header.push_str(&comment.to_trailer());
        }
    }
    lines.push(header);

    if options.comments {
        for comment in section.comments_at(CommentPosition::After) {
            lines.push(comment.to_line());
        }
    }

    let preserve = options.preserves_blanks(&section.name);
    if preserve {
        for _ in 0..section.blank_lines_after {
            lines.push(String::new());
        }
    }

    let last = section.entries.len().saturating_sub(1);
    for (index, entry) in section.entries.iter().enumerate() {
        render_entry(lines, entry, options);
        if preserve {
            for _ in 0..entry.blank_lines_after {
                lines.push(String::new());
            }
        } else if index == last {
            // Separator between this section and the next.
            lines.push(String::new());
        }
    }
}

fn render_entry(lines: &mut Vec<String>, entry: &Entry, options: &WriteOptions) {
    if options.comments {
        for comment in entry.comments_at(CommentPosition::Before) {
            lines.push(comment.to_line());
        }
    }

    let mut line = match &entry.value {
        Some(value) => format!("{}={}", entry.key, value),
        None => entry.key.clone(),
    };
    if options.comments {
        if let Some(comment) = entry.comments_at(CommentPosition::Middle).next() {
            line.push_str(&comment.to_trailer());
        }
    }
    lines.push(line);

    if options.comments {
        for comment in entry.comments_at(CommentPosition::After) {
            lines.push(comment.to_line());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_document_is_empty() {
        let doc = Document::new();
        assert_eq!(doc.render(&WriteOptions::default()), "");
    }

    #[test]
    fn test_render_bare_key_without_equals() {
        let doc = Document::parse_text("[S]\nflag\n");
        assert_eq!(doc.render(&WriteOptions::default()), "[S]\nflag\n");
    }

    #[test]
    fn test_strip_comments() {
        let doc = Document::parse_text("; top\n[S] ; mid\nk=v ; inline\n; after\n");
        let options = WriteOptions {
            comments: false,
            ..WriteOptions::default()
        };
        assert_eq!(doc.render(&options), "[S]\nk=v\n");
    }

    #[test]
    fn test_blank_preservation_allow_list() {
        let doc = Document::parse_text("[A]\nx=1\n\n\n[B]\ny=2\n\n\n");
        let options = WriteOptions {
            comments: true,
            blank_lines_for: Some(vec!["B".to_string()]),
        };
        // A collapses its run to the single separator, B keeps its run.
        assert_eq!(doc.render(&options), "[A]\nx=1\n\n[B]\ny=2\n\n\n");
    }

    #[test]
    fn test_middle_comment_replayed_with_pad() {
        let doc = Document::parse_text("[S]\nk=v  ; two spaces\n");
        assert_eq!(
            doc.render(&WriteOptions::default()),
            "[S]\nk=v  ; two spaces\n"
        );
    }
}
