use clap::Parser;
use quill_bin::{cli::Cli, commands};
use quill_core::{paths, Config};
use quill_log::LogConfig;
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();

    let _log_guard = match quill_log::init(LogConfig {
        log_file_path: cli.log_file.clone(),
    }) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        },
    };

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let discovered = paths::discover(&cwd);
    let config =
        Config::load_with_overrides(cli.config.as_deref(), discovered.config_path.as_deref())
            .unwrap_or_else(|e| {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            });

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = commands::handle(cli.command, &config, &mut stdout) {
        eprintln!("Command failed: {}", e);
        std::process::exit(1);
    }
}
