use clap::{Args, Parser, Subcommand};
use plume_text::NewlineKind;
use std::path::PathBuf;

/// Load text files through the document stream and report or rewrite their line endings
#[derive(Debug, Parser)]
#[command(name = "plume", author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the discovered `.plume/config.toml`
    #[arg(long, global = true, env = "PLUME_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log file path, or a directory to place the log file in
    #[arg(long, global = true, env = "PLUME_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report a file's newline kind and size once loaded
    Inspect(InspectArgs),
    /// Rewrite a file with consistent line endings
    Normalize(NormalizeArgs),
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    pub file: PathBuf,

    /// Bytes per stream write, overriding the config
    #[arg(long)]
    pub chunk_size: Option<usize>,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    pub file: PathBuf,

    /// Target line endings: lf, cr or crlf. Defaults to the file's own
    #[arg(long)]
    pub to: Option<NewlineKind>,

    /// Write here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Bytes per stream write, overriding the config
    #[arg(long)]
    pub chunk_size: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_normalize_target() {
        let cli = Cli::parse_from([
            "plume",
            "normalize",
            "notes.txt",
            "--to",
            "crlf",
            "-o",
            "out.txt",
        ]);
        match cli.command {
            Command::Normalize(args) => {
                assert_eq!(args.file, PathBuf::from("notes.txt"));
                assert_eq!(args.to, Some(NewlineKind::CrLf));
                assert_eq!(args.output, Some(PathBuf::from("out.txt")));
            },
            other => panic!("expected normalize, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_newline_name() {
        let result = Cli::try_parse_from(["plume", "normalize", "notes.txt", "--to", "lfcr"]);
        assert!(result.is_err());
    }
}
