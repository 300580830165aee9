//! Command-line interface entry point for `sogrim`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use sogrim::config::Config;
use sogrim::info;
use sogrim::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let success = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults)
        }
        Command::Validate {
            row,
            history,
            edit,
            json,
        } => commands::validate::run(&row, history.as_deref(), edit, json, &config),
        Command::Check {
            input_files,
            output,
            format,
            no_export,
        } => commands::check::run(&input_files, &output, format, no_export, &config, verbose),
        Command::Warnings {
            input_file,
            catalog,
        } => commands::warnings::run(&input_file, catalog.as_deref(), &config),
        Command::Report {
            input_file,
            output,
            format,
            warnings,
            catalog,
        } => commands::report::run(
            &input_file,
            output.as_deref(),
            &format,
            warnings.as_deref(),
            catalog.as_deref(),
            &config,
        ),
    };

    if !success {
        std::process::exit(1);
    }
}
