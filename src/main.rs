use clap::Parser;
use dudu::cli::commands::Cli;
use dudu::io::{config_io, logging};

fn main() {
    let cli = Cli::parse();

    // Logging is best effort; the app works without a log file
    let guard = logging::init_logging().ok().map(|(_, guard)| guard);

    let config = config_io::load_config();
    if let Err(e) = dudu::tui::run(cli.file_to_open(), config) {
        tracing::error!(error = %e, "exiting with error");
        drop(guard);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
