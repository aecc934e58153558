//! Single-pass parser with comment and blank-line attribution
//!
//! The grammar itself is trivial; the work is attribution. Each comment and
//! blank-line run must end up owned by the right section or entry so the
//! writer can replay it in place, and that attribution depends on context the
//! grammar alone does not carry: whether the previous meaningful line was a
//! section header, whether the previous line was blank, and which entry was
//! touched last. The parser keeps exactly that state, plus a buffer of
//! comments seen after a blank line (or before any section), which is flushed
//! onto the next section header.
//!
//! The parser is deliberately lenient: lines that match nothing, and key
//! lines outside any section, are dropped without error so hand-edited files
//! always load. Known limitation: the first `;` on a key line always starts a
//! trailing comment, so a value that legitimately contains a semicolon is cut
//! short; the format defines no escaping, and this mirrors the behavior of
//! the files in the wild.

use once_cell::sync::Lazy;
use regex::Regex;

use super::comment::{Comment, CommentPosition};
use super::document::Document;

static SECTION_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([^\]]*)\](.*)$").expect("section header pattern"));

/// Classification of one raw source line.
#[derive(Debug, PartialEq)]
pub(crate) enum LineKind<'a> {
    Blank,
    /// `pad` is the whitespace before the `;`, `text` everything after it.
    Comment { pad: usize, text: &'a str },
    /// `name` is the text between the brackets, `trailer` whatever followed
    /// the closing bracket (possibly a Middle comment).
    SectionHeader { name: &'a str, trailer: &'a str },
    /// Any other non-blank line; payload is the trimmed line.
    KeyLine { payload: &'a str },
}

/// Classify a raw line. Order matters: blank, comment, header, then anything
/// else is treated as a key line.
pub(crate) fn classify_line(raw: &str) -> LineKind<'_> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if let Some(text) = trimmed.strip_prefix(';') {
        let pad = raw.len() - raw.trim_start().len();
        return LineKind::Comment { pad, text };
    }
    if let Some(caps) = SECTION_HEADER.captures(trimmed) {
        let name = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let trailer = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        return LineKind::SectionHeader { name, trailer };
    }
    LineKind::KeyLine { payload: trimmed }
}

/// Split a trailing `;` comment off a line fragment. Returns the payload with
/// the pre-comment whitespace removed, plus the comment's pad and text.
fn split_trailing_comment(fragment: &str) -> (&str, Option<(usize, &str)>) {
    match fragment.find(';') {
        None => (fragment, None),
        Some(at) => {
            let payload = &fragment[..at];
            let text = &fragment[at + 1..];
            let pad = payload.len() - payload.trim_end().len();
            (payload.trim_end(), Some((pad, text)))
        }
    }
}

/// Forward-pass parse state. `current` and `last_entry` are indices into the
/// document under construction, so attribution never holds a borrow across
/// lines.
struct ParseState {
    doc: Document,
    current: Option<usize>,
    last_entry: Option<(usize, usize)>,
    previous_blank: bool,
    previous_header: bool,
    /// Comments seen after a blank line or before any section; flushed onto
    /// the next section header, dropped at end of input.
    pending: Vec<Comment>,
}

impl ParseState {
    fn new() -> Self {
        ParseState {
            doc: Document::new(),
            current: None,
            last_entry: None,
            previous_blank: false,
            previous_header: false,
            pending: Vec::new(),
        }
    }

    fn process_line(&mut self, raw: &str) {
        match classify_line(raw) {
            LineKind::Blank => {
                self.blank_line();
                self.previous_blank = true;
                return;
            }
            LineKind::Comment { pad, text } => self.comment_line(pad, text),
            LineKind::SectionHeader { name, trailer } => self.section_line(name, trailer),
            LineKind::KeyLine { payload } => self.key_line(payload),
        }
        self.previous_blank = false;
    }

    /// Blank lines belong to the section when the previous meaningful line
    /// was its header, else to the last entry. Leading blanks before any
    /// owner are not preserved.
    fn blank_line(&mut self) {
        if self.previous_header {
            if let Some(s) = self.current {
                self.doc.sections[s].blank_lines_after += 1;
                return;
            }
        }
        if let Some((s, e)) = self.last_entry {
            self.doc.sections[s].entries[e].blank_lines_after += 1;
        }
    }

    fn comment_line(&mut self, pad: usize, text: &str) {
        if self.previous_blank || self.current.is_none() {
            self.pending
                .push(Comment::new(text, CommentPosition::Before, pad));
        } else if self.previous_header {
            if let Some(s) = self.current {
                self.doc.sections[s].attach(Comment::new(text, CommentPosition::After, pad));
            }
        } else if let Some((s, e)) = self.last_entry {
            self.doc.sections[s].entries[e]
                .attach(Comment::new(text, CommentPosition::After, pad));
        } else {
            self.pending
                .push(Comment::new(text, CommentPosition::Before, pad));
        }
    }

    /// A header re-opens an existing section in place; its position in the
    /// document is never changed by a later re-declaration.
    fn section_line(&mut self, name: &str, trailer: &str) {
        let index = match self.doc.section_index(name) {
            Some(index) => index,
            None => {
                self.doc.sections.push(super::section::Section::new(name));
                self.doc.sections.len() - 1
            }
        };
        if let (_, Some((pad, text))) = split_trailing_comment(trailer) {
            self.doc.sections[index].attach(Comment::new(text, CommentPosition::Middle, pad));
        }
        for comment in self.pending.drain(..) {
            super::comment::attach(&mut self.doc.sections[index].comments, comment);
        }
        self.current = Some(index);
        self.last_entry = None;
        self.previous_header = true;
    }

    /// Key lines outside any section are dropped. An existing key is
    /// overwritten in place, keeping its position and comments.
    fn key_line(&mut self, payload: &str) {
        let Some(s) = self.current else {
            return;
        };
        let (payload, middle) = split_trailing_comment(payload);
        let (key, value) = match payload.find('=') {
            Some(at) => (
                payload[..at].trim(),
                Some(payload[at + 1..].trim().to_string()),
            ),
            None => (payload.trim(), None),
        };
        let e = self.doc.sections[s].set(key, value);
        if let Some((pad, text)) = middle {
            self.doc.sections[s].entries[e].attach(Comment::new(
                text,
                CommentPosition::Middle,
                pad,
            ));
        }
        self.last_entry = Some((s, e));
        self.previous_header = false;
    }

    fn finish(self) -> Document {
        // Comments still pending at end of input have no owner and are
        // dropped, as are leading blanks before the first section.
        self.doc
    }
}

impl Document {
    /// Parse a document from source text. Line endings may be LF or CRLF.
    /// Parsing never fails: malformed lines are skipped (see module docs).
    pub fn parse_text(text: &str) -> Document {
        let mut state = ParseState::new();
        for line in text.lines() {
            state.process_line(line);
        }
        state.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_line_ordering() {
        assert_eq!(classify_line("   "), LineKind::Blank);
        assert_eq!(
            classify_line("  ; note"),
            LineKind::Comment {
                pad: 2,
                text: " note"
            }
        );
        assert_eq!(
            classify_line("[Colors] ; c"),
            LineKind::SectionHeader {
                name: "Colors",
                trailer: " ; c"
            }
        );
        assert_eq!(
            classify_line("Red=255"),
            LineKind::KeyLine { payload: "Red=255" }
        );
    }

    #[test]
    fn test_split_trailing_comment_captures_pad() {
        let (payload, comment) = split_trailing_comment("Red=255  ; hot");
        assert_eq!(payload, "Red=255");
        assert_eq!(comment, Some((2, " hot")));

        let (payload, comment) = split_trailing_comment("Red=255");
        assert_eq!(payload, "Red=255");
        assert_eq!(comment, None);
    }

    #[test]
    fn test_key_line_without_section_is_dropped() {
        let doc = Document::parse_text("orphan=1\n[S]\nk=2\n");
        assert!(doc.get_value("S", "orphan").is_none());
        assert_eq!(doc.get("S", "k", ""), "2");
        assert_eq!(doc.sections.len(), 1);
    }

    #[test]
    fn test_bare_key_has_no_value() {
        let doc = Document::parse_text("[S]\nflag\n");
        let entry = doc.find_section("S").unwrap().find("flag").unwrap();
        assert_eq!(entry.value, None);
    }

    #[test]
    fn test_redeclared_section_reopens_in_place() {
        let doc = Document::parse_text("[A]\nx=1\n[B]\ny=2\n[A]\nz=3\n");
        let names: Vec<&str> = doc.section_names().collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(doc.get("A", "z", ""), "3");
    }

    #[test]
    fn test_duplicate_key_overwrites_in_place() {
        let doc = Document::parse_text("[A]\nx=1\n; trailing\nx=2\n");
        let section = doc.find_section("A").unwrap();
        assert_eq!(section.entries.len(), 1);
        assert_eq!(section.entries[0].value.as_deref(), Some("2"));
        // The comment attached after the first declaration survives.
        assert_eq!(section.entries[0].comments.len(), 1);
    }

    #[test]
    fn test_comment_attribution_by_context() {
        let source = "; file header\n\
                      [A]\n\
                      ; about A\n\
                      x=1 ; inline\n\
                      ; after x\n";
        let doc = Document::parse_text(source);
        let section = doc.find_section("A").unwrap();

        // "; file header" was buffered and flushed onto [A] as Before.
        assert!(section
            .comments_at(CommentPosition::Before)
            .any(|c| c.text == " file header"));
        // "; about A" directly follows the header, so it is the section's.
        assert!(section
            .comments_at(CommentPosition::After)
            .any(|c| c.text == " about A"));

        let entry = section.find("x").unwrap();
        assert!(entry
            .comments_at(CommentPosition::Middle)
            .any(|c| c.text == " inline"));
        assert!(entry
            .comments_at(CommentPosition::After)
            .any(|c| c.text == " after x"));
    }

    #[test]
    fn test_blank_lines_attributed_to_header_then_entry() {
        let doc = Document::parse_text("[A]\n\n\nx=1\n\ny=2\n");
        let section = doc.find_section("A").unwrap();
        assert_eq!(section.blank_lines_after, 2);
        assert_eq!(section.find("x").unwrap().blank_lines_after, 1);
        assert_eq!(section.find("y").unwrap().blank_lines_after, 0);
    }

    #[test]
    fn test_comment_between_header_and_blank_keeps_header_ownership() {
        // The comment line is transparent to the header flag, so the blank
        // still belongs to the section.
        let doc = Document::parse_text("[A]\n; c\n\nx=1\n");
        let section = doc.find_section("A").unwrap();
        assert_eq!(section.blank_lines_after, 1);
    }

    #[test]
    fn test_semicolon_in_value_is_cut_short() {
        // Known limitation: no escaping exists, the first ';' wins.
        let doc = Document::parse_text("[S]\nmsg=hello; world\n");
        assert_eq!(doc.get("S", "msg", ""), "hello");
    }

    #[test]
    fn test_crlf_input() {
        let doc = Document::parse_text("[S]\r\nk=v\r\n");
        assert_eq!(doc.get("S", "k", ""), "v");
    }

    #[test]
    fn test_parse_is_clean() {
        let doc = Document::parse_text("[S]\nk=v\n");
        assert!(!doc.is_dirty());
    }
}
