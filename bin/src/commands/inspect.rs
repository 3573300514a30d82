use super::load_file;
use crate::{cli::InspectArgs, config::Config};
use anyhow::Result;
use std::io::Write;

pub fn run(args: InspectArgs, config: &Config, out: &mut impl Write) -> Result<()> {
    let chunk_size = args.chunk_size.unwrap_or(config.chunk_size);
    let loaded = load_file(&args.file, &config.stream, chunk_size)?;

    writeln!(out, "file:    {}", args.file.display())?;
    writeln!(out, "newline: {}", loaded.newline_kind)?;
    writeln!(
        out,
        "mixed:   {}",
        if loaded.mixed_newlines { "yes" } else { "no" }
    )?;
    writeln!(out, "lines:   {}", loaded.document.line_count())?;
    writeln!(out, "chars:   {}", loaded.chars)?;
    writeln!(out, "bytes:   {}", loaded.bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn inspect(contents: &[u8], chunk_size: usize) -> String {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("input.txt");
        std::fs::write(&path, contents).unwrap();

        let mut out = Vec::new();
        let args = InspectArgs {
            file: path,
            chunk_size: Some(chunk_size),
        };
        run(args, &Config::default(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn reports_crlf_file() {
        let report = inspect(b"hello\r\nhow\r\nare\r\nyou\r\n", 3);
        assert!(report.contains("newline: crlf\n"));
        assert!(report.contains("mixed:   no\n"));
        assert!(report.contains("lines:   4\n"));
        assert!(report.contains("chars:   17\n"));
        assert!(report.contains("bytes:   22\n"));
    }

    #[test]
    fn reports_mixed_file() {
        let report = inspect(b"a\nb\r\nc", 2);
        assert!(report.contains("newline: lf\n"));
        assert!(report.contains("mixed:   yes\n"));
        assert!(report.contains("lines:   3\n"));
    }

    #[test]
    fn reports_empty_file() {
        let report = inspect(b"", 8);
        assert!(report.contains("newline: unknown\n"));
        assert!(report.contains("lines:   1\n"));
        assert!(report.contains("bytes:   0\n"));
    }
}
