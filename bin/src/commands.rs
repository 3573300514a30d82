pub mod inspect;
pub mod normalize;

use anyhow::{Context, Result};
use plume_text::{Document, DocumentOutputStream, NewlineKind, StreamOptions};
use std::{
    fs::File,
    io::{ErrorKind, Read},
    path::Path,
};

/// A file loaded through [`DocumentOutputStream`]
#[derive(Debug)]
pub struct Loaded {
    pub document: Document,
    pub newline_kind: NewlineKind,
    pub mixed_newlines: bool,
    pub bytes: usize,
    pub chars: usize,
}

/// Read `path` in `chunk_size` pieces and stream it into a new document.
pub fn load_file(path: &Path, options: &StreamOptions, chunk_size: usize) -> Result<Loaded> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let mut document = Document::new();
    let mut stream = DocumentOutputStream::with_options(&mut document, options.clone());
    let mut buf = vec![0; chunk_size.max(1)];

    loop {
        let len = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(len) => len,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            },
        };
        stream
            .write(&buf[..len])
            .with_context(|| format!("Failed to load {}", path.display()))?;
    }
    stream
        .close()
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let newline_kind = stream.detect_newline_type();
    let mixed_newlines = stream.has_mixed_newlines();
    let bytes = stream.bytes_written();
    let chars = stream.chars_written();

    tracing::info!(
        path = %path.display(),
        newline = %newline_kind,
        bytes,
        "loaded file"
    );

    Ok(Loaded {
        document,
        newline_kind,
        mixed_newlines,
        bytes,
        chars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_file_in_small_chunks() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("notes.txt");
        std::fs::write(&path, "caf\u{e9}\r\nbar\r\n").unwrap();

        let loaded = load_file(&path, &StreamOptions::default(), 1).unwrap();
        assert_eq!(loaded.document.text(), "caf\u{e9}\nbar");
        assert_eq!(loaded.newline_kind, NewlineKind::CrLf);
        assert!(!loaded.mixed_newlines);
        assert_eq!(loaded.bytes, 12);
        assert_eq!(loaded.chars, 8);
    }

    #[test]
    fn reports_invalid_utf8_with_path() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("binary.dat");
        std::fs::write(&path, b"ok\n\xff\xfe").unwrap();

        let err = load_file(&path, &StreamOptions::default(), 4).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Failed to load"));
        assert!(message.contains("Invalid UTF-8 at byte 3"));
    }

    #[test]
    fn reports_missing_file() {
        let tmp = tempdir().unwrap();
        let err = load_file(&tmp.path().join("missing.txt"), &StreamOptions::default(), 4)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }
}
