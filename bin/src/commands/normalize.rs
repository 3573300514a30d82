//! Rewrite a file with consistent line endings.
//!
//! The file is loaded through the document stream, which drops its trailing line
//! break, and rendered back with every line terminated, including the last. An empty
//! document renders as an empty file.

use super::load_file;
use crate::{cli::NormalizeArgs, config::Config};
use anyhow::{Context, Result};
use plume_text::{Document, NewlineKind};
use std::{io::Write, path::Path};

pub fn run(args: NormalizeArgs, config: &Config, out: &mut impl Write) -> Result<()> {
    let chunk_size = args.chunk_size.unwrap_or(config.chunk_size);
    let loaded = load_file(&args.file, &config.stream, chunk_size)?;

    let target = match args.to {
        Some(kind) if kind.is_known() => kind,
        _ if loaded.newline_kind.is_known() => loaded.newline_kind,
        _ => NewlineKind::Lf,
    };
    let rendered = render(&loaded.document, target);

    match args.output {
        Some(path) => {
            write_atomic(&path, rendered.as_bytes())?;
            tracing::info!(
                from = %loaded.newline_kind,
                to = %target,
                "wrote {}",
                path.display()
            );
        },
        None => out.write_all(rendered.as_bytes())?,
    }
    Ok(())
}

fn render(document: &Document, kind: NewlineKind) -> String {
    let mut rendered = document.text_with_line_endings(kind).into_owned();
    if !document.is_empty() {
        rendered.push_str(kind.as_str());
    }
    rendered
}

/// Write to a temp file next to `path`, then rename over it.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp_file = tempfile::NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temp file in {}", parent_dir.display()))?;
    tmp_file
        .write_all(contents)
        .context("Failed to write to temp file")?;
    tmp_file
        .persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
