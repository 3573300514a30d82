use clap::Parser;
use plume_bin::cli::Cli;
use plume_log::LogConfig;

fn main() {
    let cli = Cli::parse();

    let log_guard = match plume_log::init(LogConfig {
        log_file_path: cli.log_file.clone(),
    }) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {e}");
            None
        },
    };

    let result = plume_bin::run(cli, &mut std::io::stdout().lock());

    // `exit` skips destructors, so flush the log file first.
    drop(log_guard);

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
