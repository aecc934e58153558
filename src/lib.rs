//! # inikeep
//!
//! A round-trip-preserving parser and editor for INI-style configuration
//! files (bracketed sections, `key=value` lines, free-standing keys,
//! `;` comments, blank lines).
//!
//! The point of this crate is that saving a document reproduces every piece
//! of original formatting the caller did not explicitly change: comment text,
//! comment placement, the whitespace before each `;`, blank-line runs, and
//! key/section ordering. See the [ini module](ini) for the document model and
//! the parse/serialize entry points.

pub mod ini;

pub use ini::{Comment, CommentPosition, Document, Entry, IniError, Section, WriteOptions};
