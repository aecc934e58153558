//! INI document model, parser, and serializer
//!
//! The model is a plain ownership tree: a [Document] owns [Section]s, a
//! section owns [Entry]s, and both sections and entries own the [Comment]s
//! attributed to them by the parser. Iteration order is insertion order
//! everywhere; lookups are linear scans over that order.
//!
//! Parsing lives in [parsing], the inverse walk in [writing], file access in
//! [loader], and string-to-typed-value coercion in [value].

pub mod comment;
pub mod document;
pub mod entry;
pub mod loader;
pub mod parsing;
pub mod section;
pub mod value;
pub mod writing;

pub use comment::{Comment, CommentPosition};
pub use document::Document;
pub use entry::Entry;
pub use loader::{ErrorSink, IniError};
pub use section::Section;
pub use writing::WriteOptions;
