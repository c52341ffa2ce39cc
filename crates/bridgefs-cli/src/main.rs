//! bridgefs CLI - confined archive extraction and bridge file operations
//! from the command line.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use bridgefs_core::Bridge;
use bridgefs_core::BridgeConfig;
use clap::Parser;
use cli::Cli;
use cli::Commands;
use tracing::Level;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let formatter = output::create_formatter(&cli);
    let show_progress = !cli.json && !cli.quiet;

    match &cli.command {
        Commands::Unzip(args) => {
            let bridge = bridge_for(&cli, Some(args.ignore_permissions));
            commands::extract::unzip(&bridge, args, &*formatter, show_progress)
        }
        Commands::UntarGz(args) => {
            let bridge = bridge_for(&cli, Some(args.ignore_permissions));
            commands::extract::untar_gz(&bridge, args, &*formatter, show_progress)
        }
        Commands::Gunzip(args) => {
            commands::extract::gunzip(&bridge_for(&cli, None), args, &*formatter)
        }
        Commands::Read(args) => commands::fs::read(&bridge_for(&cli, None), args, &*formatter),
        Commands::Write(args) => commands::fs::write(&bridge_for(&cli, None), args, &*formatter),
        Commands::Mv(args) => commands::fs::mv(&bridge_for(&cli, None), args, &*formatter),
        Commands::Cp(args) => commands::fs::cp(&bridge_for(&cli, None), args, &*formatter),
        Commands::Rm(args) => commands::fs::rm(&bridge_for(&cli, None), args, &*formatter),
        Commands::Mkdir(args) => commands::fs::mkdir(&bridge_for(&cli, None), args, &*formatter),
        Commands::Ls(args) => commands::fs::ls(&bridge_for(&cli, None), args, &*formatter),
        Commands::Exists(args) => commands::fs::exists(&bridge_for(&cli, None), args, &*formatter),
        Commands::Abspath(args) => {
            commands::fs::abspath(&bridge_for(&cli, None), args, &*formatter)
        }
        Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout stays clean for results and JSON.
fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn bridge_for(cli: &Cli, ignore_permissions: Option<bool>) -> Bridge {
    let mut config = BridgeConfig::from_env();
    if let Some(base_dir) = &cli.base_dir {
        config = config.with_base_dir(base_dir);
    }
    if let Some(ignore) = ignore_permissions {
        config = config.with_preserve_permissions(!ignore);
    }
    Bridge::new(config)
}
