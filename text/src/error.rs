//! Errors produced by [`crate::DocumentOutputStream`]

use snafu::Snafu;
use std::io;

/// Errors that can occur while streaming text into a document
///
/// A failed call never applies partial output: the document and the stream are left
/// exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum StreamError {
    /// Bytes that can never form valid UTF-8, no matter what follows
    #[snafu(display("Invalid UTF-8 at byte {offset} of the stream"))]
    InvalidUtf8 { offset: usize },

    /// The stream was closed in the middle of a multi-byte character
    #[snafu(display("Stream ended inside an incomplete {len}-byte UTF-8 sequence"))]
    TruncatedUtf8 { len: usize },

    #[snafu(display("Cannot write to a closed stream"))]
    WriteAfterClose,

    #[snafu(display("Stream is already closed"))]
    AlreadyClosed,
}

impl StreamError {
    /// Whether the input was not valid UTF-8.
    pub fn is_encoding(&self) -> bool {
        matches!(
            self,
            StreamError::InvalidUtf8 { .. } | StreamError::TruncatedUtf8 { .. }
        )
    }

    /// Whether the operation was not legal in the stream's current state.
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            StreamError::WriteAfterClose | StreamError::AlreadyClosed
        )
    }
}

impl From<StreamError> for io::Error {
    fn from(err: StreamError) -> Self {
        let kind = if err.is_encoding() {
            io::ErrorKind::InvalidData
        } else {
            io::ErrorKind::BrokenPipe
        };
        io::Error::new(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_errors() {
        assert!(StreamError::InvalidUtf8 { offset: 3 }.is_encoding());
        assert!(StreamError::TruncatedUtf8 { len: 2 }.is_encoding());
        assert!(StreamError::WriteAfterClose.is_invalid_state());
        assert!(StreamError::AlreadyClosed.is_invalid_state());
        assert!(!StreamError::AlreadyClosed.is_encoding());
    }

    #[test]
    fn converts_to_io_error_kinds() {
        let err: io::Error = StreamError::InvalidUtf8 { offset: 0 }.into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let err: io::Error = StreamError::WriteAfterClose.into();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(err.to_string(), "Cannot write to a closed stream");
    }
}
