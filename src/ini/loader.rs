//! File access and the error surface
//!
//! The store itself never touches the filesystem or logs; this module is the
//! one place that reads and writes, and failures are surfaced once, as
//! messages, to the caller. Callers that want to observe failures without
//! threading `Result`s through (a UI status bar, a batch summary) can pass an
//! error sink to the `_reporting` variants; the sink sees the same message
//! the error carries.

use std::fmt;
use std::fs;
use std::path::Path;

use super::document::Document;
use super::writing::WriteOptions;

/// Errors from loading or saving a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IniError {
    /// IO failure reading or writing a file; carries the surfaced message.
    Io(String),
    /// Save was requested but the document has no backing path.
    NoPath,
}

impl fmt::Display for IniError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IniError::Io(msg) => write!(f, "IO error: {}", msg),
            IniError::NoPath => write!(f, "document has no source path"),
        }
    }
}

impl std::error::Error for IniError {}

impl From<std::io::Error> for IniError {
    fn from(err: std::io::Error) -> Self {
        IniError::Io(err.to_string())
    }
}

/// Optional observer for I/O failure messages.
pub type ErrorSink<'a> = &'a dyn Fn(&str);

fn report(sink: Option<ErrorSink<'_>>, err: &IniError) {
    if let Some(sink) = sink {
        sink(&err.to_string());
    }
}

/// Read the full text of a file.
pub fn read_text(path: &Path) -> Result<String, IniError> {
    Ok(fs::read_to_string(path)?)
}

/// Write text to a file, single-shot, no retry. On failure the previous
/// file contents are whatever the OS left; the error message says why.
pub fn write_text(path: &Path, contents: &str) -> Result<(), IniError> {
    Ok(fs::write(path, contents)?)
}

impl Document {
    /// Parse the file at `path`. On failure no document is produced and the
    /// error carries the IO message.
    pub fn load(path: impl AsRef<Path>) -> Result<Document, IniError> {
        Document::load_reporting(path, None)
    }

    /// As [Document::load], additionally passing any failure message to
    /// `sink` before returning it.
    pub fn load_reporting(
        path: impl AsRef<Path>,
        sink: Option<ErrorSink<'_>>,
    ) -> Result<Document, IniError> {
        let path = path.as_ref();
        let text = read_text(path).map_err(|e| {
            report(sink, &e);
            e
        })?;
        let mut doc = Document::parse_text(&text);
        doc.source_path = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Write the document back to the path it was loaded from. Clears the
    /// dirty flag only on success.
    pub fn save(&mut self, options: &WriteOptions) -> Result<(), IniError> {
        match self.source_path.clone() {
            Some(path) => self.save_as(path, options),
            None => Err(IniError::NoPath),
        }
    }

    /// Write the document to `path` and adopt it as the source path. Clears
    /// the dirty flag only on success.
    pub fn save_as(
        &mut self,
        path: impl AsRef<Path>,
        options: &WriteOptions,
    ) -> Result<(), IniError> {
        self.save_reporting(path, options, None)
    }

    /// As [Document::save_as], additionally passing any failure message to
    /// `sink` before returning it.
    pub fn save_reporting(
        &mut self,
        path: impl AsRef<Path>,
        options: &WriteOptions,
        sink: Option<ErrorSink<'_>>,
    ) -> Result<(), IniError> {
        let path = path.as_ref();
        let text = self.render(options);
        write_text(path, &text).map_err(|e| {
            report(sink, &e);
            e
        })?;
        self.source_path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_load_missing_file_reports_and_errors() {
        let seen = RefCell::new(Vec::new());
        let sink = |msg: &str| seen.borrow_mut().push(msg.to_string());
        let result = Document::load_reporting("definitely/not/here.ini", Some(&sink));
        assert!(matches!(result, Err(IniError::Io(_))));
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_save_without_path_is_no_path() {
        let mut doc = Document::parse_text("[S]\nk=v\n");
        let result = doc.save(&WriteOptions::default());
        assert_eq!(result, Err(IniError::NoPath));
    }
}
