//! Newline conventions
//!
//! A loaded document always stores line breaks as a single `\n`. The convention the
//! source file used is tracked separately as a [`NewlineKind`] so the text can be
//! rendered back the way it came in when it is saved.

use serde::{Deserialize, Serialize};
use snafu::Snafu;
use std::{borrow::Cow, fmt, str::FromStr};

/// The byte sequence a source stream uses to separate lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewlineKind {
    /// No separator has been observed yet.
    #[default]
    Unknown,
    /// `\n`
    Lf,
    /// A lone `\r`
    Cr,
    /// `\r\n`
    CrLf,
}

impl NewlineKind {
    /// The separator bytes for this kind.
    ///
    /// [`NewlineKind::Unknown`] renders as `\n`, the canonical in-memory separator.
    pub fn as_str(self) -> &'static str {
        match self {
            NewlineKind::Unknown | NewlineKind::Lf => "\n",
            NewlineKind::Cr => "\r",
            NewlineKind::CrLf => "\r\n",
        }
    }

    pub fn is_known(self) -> bool {
        self != NewlineKind::Unknown
    }

    /// Classify the separator at the start of `text`.
    ///
    /// Returns the kind and its length in bytes, or [`None`] if `text` does not
    /// start with `\r` or `\n`. A `\r` at the very end of `text` is reported as
    /// [`NewlineKind::Cr`]; callers streaming input must decide for themselves
    /// whether more bytes could turn it into `\r\n`.
    pub(crate) fn at_start(text: &[u8]) -> Option<(NewlineKind, usize)> {
        match text {
            [b'\r', b'\n', ..] => Some((NewlineKind::CrLf, 2)),
            [b'\r', ..] => Some((NewlineKind::Cr, 1)),
            [b'\n', ..] => Some((NewlineKind::Lf, 1)),
            _ => None,
        }
    }
}

impl fmt::Display for NewlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NewlineKind::Unknown => "unknown",
            NewlineKind::Lf => "lf",
            NewlineKind::Cr => "cr",
            NewlineKind::CrLf => "crlf",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing a [`NewlineKind`] from an unrecognized name.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(display("unknown newline kind {name:?}, expected one of: lf, cr, crlf, unknown"))]
pub struct ParseNewlineKindError {
    name: String,
}

impl FromStr for NewlineKind {
    type Err = ParseNewlineKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lf" | "unix" => Ok(NewlineKind::Lf),
            "cr" | "mac" => Ok(NewlineKind::Cr),
            "crlf" | "windows" | "dos" => Ok(NewlineKind::CrLf),
            "unknown" | "default" => Ok(NewlineKind::Unknown),
            _ => Err(ParseNewlineKindError {
                name: s.to_string(),
            }),
        }
    }
}

/// Render `\n`-separated text with the given line endings.
///
/// The input is expected to use `\n` only, as a loaded document does. Returns the
/// input unchanged (borrowed) when the target is `\n` or the text has no line breaks.
pub fn convert_line_endings(text: &str, kind: NewlineKind) -> Cow<'_, str> {
    match kind {
        NewlineKind::Unknown | NewlineKind::Lf => Cow::Borrowed(text),
        _ if !text.contains('\n') => Cow::Borrowed(text),
        _ => Cow::Owned(text.replace('\n', kind.as_str())),
    }
}
