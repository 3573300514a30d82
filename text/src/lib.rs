//! Text loading crate for Plume
//!
//! This crate turns a file's raw bytes into an editor document. Bytes arrive in
//! arbitrary chunks from whatever is reading the file, and are decoded, validated,
//! and stored with `\n` line breaks while the source's newline convention is
//! recorded so it can be restored on save.
//!
//! The key components are:
//! - [`output_stream::DocumentOutputStream`] - Incremental UTF-8 decoder and newline normalizer
//! - [`newline::NewlineKind`] - The detected line separator convention
//! - [`document::TextSink`] - The text container a stream appends to, with [`document::Document`]
//!   as the in-memory implementation
//! - [`options::StreamOptions`] - Trailing newline and mixed newline handling

pub mod document;
pub mod error;
pub mod newline;
pub mod options;
pub mod output_stream;

pub use document::{Document, TextSink};
pub use error::StreamError;
pub use newline::{convert_line_endings, NewlineKind};
pub use options::{MixedNewlines, StreamOptions};
pub use output_stream::{DocumentOutputStream, StreamObserver};
