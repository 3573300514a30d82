//! Stream behavior settings

use serde::Deserialize;

/// How separators that differ from the detected [`crate::NewlineKind`] are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MixedNewlines {
    /// Fold every separator to `\n`.
    #[default]
    Normalize,
    /// Keep differing separators as literal text. Only the detected kind is folded.
    Preserve,
}

/// Settings for a [`crate::DocumentOutputStream`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamOptions {
    pub mixed_newlines: MixedNewlines,

    /// Drop a single trailing separator when the stream is closed.
    ///
    /// A text file's final newline terminates its last line rather than starting a
    /// new, empty one, so it is not part of the loaded content.
    pub trim_trailing_newline: bool,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            mixed_newlines: MixedNewlines::default(),
            trim_trailing_newline: true,
        }
    }
}
