//! Streaming text loader with newline normalization
//!
//! [`DocumentOutputStream`] receives a file's bytes in arbitrarily sized chunks and
//! appends them to a [`TextSink`] as UTF-8 text with every line break stored as `\n`.
//! The first separator seen in the stream decides the document's [`NewlineKind`].
//!
//! Chunks may split a multi-byte character or a `\r\n` pair. Those bytes are held
//! back until the next write (or [`close`](DocumentOutputStream::close)) resolves
//! them, so the loaded text and the detected kind never depend on chunk boundaries.
//!
//! The last separator emitted is also held back, as a deferred separator rather than
//! as bytes, because closing the stream drops a single trailing line break.

use crate::{
    document::TextSink,
    error::{
        AlreadyClosedSnafu, InvalidUtf8Snafu, StreamError, TruncatedUtf8Snafu,
        WriteAfterCloseSnafu,
    },
    newline::NewlineKind,
    options::{MixedNewlines, StreamOptions},
};
use smallvec::SmallVec;
use snafu::ensure;
use std::{borrow::Cow, fmt, io};

/// Receives notable events from a [`DocumentOutputStream`]
pub trait StreamObserver {
    /// Called once, when the first separator in the stream fixes the newline kind.
    fn on_newline_kind_locked(&mut self, kind: NewlineKind);

    /// Called once, for the first separator that differs from the locked kind.
    fn on_mixed_newline(&mut self, _kind: NewlineKind) {}
}

/// Writes a byte stream into a document, normalizing line breaks to `\n`
pub struct DocumentOutputStream<'a, D: TextSink> {
    document: &'a mut D,
    options: StreamOptions,
    observer: Option<&'a mut dyn StreamObserver>,

    /// Bytes that cannot be interpreted yet: an incomplete UTF-8 sequence, or a lone
    /// `\r` that may be the start of `\r\n`.
    residual: SmallVec<[u8; 4]>,

    /// A separator already consumed but not yet emitted. It is emitted as `\n` as
    /// soon as anything follows it, and may be dropped on close.
    deferred: Option<NewlineKind>,

    newline_kind: NewlineKind,
    mixed: bool,
    bytes_written: usize,
    chars_written: usize,
    closed: bool,
}

impl<'a, D: TextSink> DocumentOutputStream<'a, D> {
    pub fn new(document: &'a mut D) -> Self {
        Self::with_options(document, StreamOptions::default())
    }

    pub fn with_options(document: &'a mut D, options: StreamOptions) -> Self {
        Self {
            document,
            options,
            observer: None,
            residual: SmallVec::new(),
            deferred: None,
            newline_kind: NewlineKind::Unknown,
            mixed: false,
            bytes_written: 0,
            chars_written: 0,
            closed: false,
        }
    }

    pub fn with_observer(mut self, observer: &'a mut dyn StreamObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Feed the next chunk of the stream.
    ///
    /// Everything that can be interpreted is appended to the document in a single
    /// append. Always consumes the whole chunk.
    ///
    /// # Errors
    ///
    /// [`StreamError::InvalidUtf8`] if the chunk contains bytes that cannot be part
    /// of valid UTF-8, and [`StreamError::WriteAfterClose`] once the stream is closed.
    /// Neither the document nor the stream changes on error.
    pub fn write(&mut self, chunk: &[u8]) -> Result<usize, StreamError> {
        ensure!(!self.closed, WriteAfterCloseSnafu);
        if chunk.is_empty() {
            return Ok(0);
        }

        let joined: Cow<'_, [u8]> = if self.residual.is_empty() {
            Cow::Borrowed(chunk)
        } else {
            let mut joined = Vec::with_capacity(self.residual.len() + chunk.len());
            joined.extend_from_slice(&self.residual);
            joined.extend_from_slice(chunk);
            Cow::Owned(joined)
        };

        let stream_offset = self.bytes_written - self.residual.len();
        let (mut text, mut held) = split_incomplete_utf8(&joined).map_err(|valid_up_to| {
            InvalidUtf8Snafu {
                offset: stream_offset + valid_up_to,
            }
            .build()
        })?;

        // A final `\r` is only a CR separator if the next byte is not `\n`.
        if held.is_empty() && text.ends_with('\r') {
            let split = text.len() - 1;
            held = &joined[split..];
            text = &text[..split];
        }

        let output = self.normalize(text);
        self.residual = SmallVec::from_slice(held);
        self.bytes_written += chunk.len();

        tracing::trace!(
            len = chunk.len(),
            emitted = output.len(),
            residual = self.residual.len(),
            "stream write"
        );

        self.document.append(&output);
        Ok(chunk.len())
    }

    /// Finish the stream.
    ///
    /// Resolves any held-back `\r`, drops a single trailing separator of the detected
    /// kind (unless disabled in [`StreamOptions`]), and marks the document unmodified.
    ///
    /// # Errors
    ///
    /// [`StreamError::TruncatedUtf8`] if the stream ends inside a multi-byte
    /// character. The stream stays open so the missing bytes can still be written.
    /// [`StreamError::AlreadyClosed`] on a second close.
    pub fn close(&mut self) -> Result<(), StreamError> {
        ensure!(!self.closed, AlreadyClosedSnafu);

        let mut output = String::new();
        if !self.residual.is_empty() {
            ensure!(
                self.residual.as_slice() == b"\r",
                TruncatedUtf8Snafu {
                    len: self.residual.len()
                }
            );
            self.residual.clear();
            self.push_separator(&mut output, NewlineKind::Cr, "\r");
        }

        if let Some(kind) = self.deferred.take() {
            let trailing = self.options.trim_trailing_newline && kind == self.newline_kind;
            if !trailing {
                output.push('\n');
                self.chars_written += 1;
            }
        }

        self.closed = true;
        self.document.append(&output);
        self.document.set_modified(false);

        tracing::debug!(
            bytes = self.bytes_written,
            chars = self.chars_written,
            newline = %self.newline_kind,
            mixed = self.mixed,
            "stream closed"
        );
        Ok(())
    }

    /// The newline kind of the stream, or [`NewlineKind::Unknown`] if no separator
    /// has been seen.
    pub fn detect_newline_type(&self) -> NewlineKind {
        self.newline_kind
    }

    /// Whether a separator other than the detected kind has been seen.
    pub fn has_mixed_newlines(&self) -> bool {
        self.mixed
    }

    /// Total bytes accepted by [`write`](Self::write).
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Total characters appended to the document.
    pub fn chars_written(&self) -> usize {
        self.chars_written
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn options(&self) -> &StreamOptions {
        &self.options
    }

    pub fn document(&self) -> &D {
        self.document
    }

    fn normalize(&mut self, text: &str) -> String {
        let mut output = String::with_capacity(text.len() + 1);
        let mut rest = text;

        while let Some(index) = rest.find(|c: char| c == '\r' || c == '\n') {
            let Some((kind, len)) = NewlineKind::at_start(&rest.as_bytes()[index..]) else {
                break;
            };
            self.push_content(&mut output, &rest[..index]);
            self.push_separator(&mut output, kind, &rest[index..index + len]);
            rest = &rest[index + len..];
        }
        self.push_content(&mut output, rest);

        output
    }

    fn push_content(&mut self, output: &mut String, content: &str) {
        if content.is_empty() {
            return;
        }
        self.emit_deferred(output);
        output.push_str(content);
        self.chars_written += content.chars().count();
    }

    fn push_separator(&mut self, output: &mut String, kind: NewlineKind, raw: &str) {
        self.emit_deferred(output);

        if !self.newline_kind.is_known() {
            self.newline_kind = kind;
            tracing::debug!(newline = %kind, "newline kind detected");
            if let Some(observer) = self.observer.as_mut() {
                observer.on_newline_kind_locked(kind);
            }
        } else if kind != self.newline_kind && !self.mixed {
            self.mixed = true;
            tracing::warn!(
                detected = %self.newline_kind,
                found = %kind,
                "stream mixes newline kinds"
            );
            if let Some(observer) = self.observer.as_mut() {
                observer.on_mixed_newline(kind);
            }
        }

        if kind == self.newline_kind || self.options.mixed_newlines == MixedNewlines::Normalize {
            self.deferred = Some(kind);
        } else {
            output.push_str(raw);
            self.chars_written += raw.len();
        }
    }

    fn emit_deferred(&mut self, output: &mut String) {
        if self.deferred.take().is_some() {
            output.push('\n');
            self.chars_written += 1;
        }
    }
}

/// Split `bytes` into its valid UTF-8 text and a trailing incomplete sequence.
///
/// Returns the offset of the first invalid byte if the input is malformed anywhere
/// other than a truncated final character.
fn split_incomplete_utf8(bytes: &[u8]) -> Result<(&str, &[u8]), usize> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok((text, &[][..])),
        Err(err) if err.error_len().is_none() => {
            let (valid, tail) = bytes.split_at(err.valid_up_to());
            let text = std::str::from_utf8(valid).map_err(|err| err.valid_up_to())?;
            Ok((text, tail))
        },
        Err(err) => Err(err.valid_up_to()),
    }
}

impl<D: TextSink> io::Write for DocumentOutputStream<'_, D> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(DocumentOutputStream::write(self, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<D: TextSink + fmt::Debug> fmt::Debug for DocumentOutputStream<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentOutputStream")
            .field("document", &self.document)
            .field("options", &self.options)
            .field("residual", &self.residual)
            .field("deferred", &self.deferred)
            .field("newline_kind", &self.newline_kind)
            .field("mixed", &self.mixed)
            .field("bytes_written", &self.bytes_written)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
