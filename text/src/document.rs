//! The text container a stream loads into
//!
//! [`TextSink`] is the seam between [`crate::DocumentOutputStream`] and whatever owns
//! the text. [`Document`] is the plain in-memory implementation used by the CLI and
//! the tests.

use crate::newline::{convert_line_endings, NewlineKind};
use std::borrow::Cow;

/// Append-only text target with dirty tracking
pub trait TextSink {
    /// Append already validated and normalized text.
    fn append(&mut self, text: &str);

    fn is_modified(&self) -> bool;

    fn set_modified(&mut self, modified: bool);
}

/// An in-memory document with `\n` line breaks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    modified: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of lines, counting an empty document as a single empty line.
    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count() + 1
    }

    /// The document text with line breaks rendered in the given convention.
    pub fn text_with_line_endings(&self, kind: NewlineKind) -> Cow<'_, str> {
        convert_line_endings(&self.text, kind)
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl TextSink for Document {
    fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.text.push_str(text);
        self.modified = true;
    }

    fn is_modified(&self) -> bool {
        self.modified
    }

    fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }
}
