// file: src/main.rs
// version: 1.0.0
// guid: 61f45c01-8e83-448c-a7d2-9b983d7ff7bf

//! Custom Logging demo - configures a logger and logs one message per level

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use custom_logging::{
    cli::{args::Cli, args::Commands, commands::*},
    ConsoleSetup, FileSetup, LoggerRegistry,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let registry = LoggerRegistry::new();

    let logger = match cli.command {
        Commands::Setup {
            name,
            settings,
            handlers,
            log_file,
        } => {
            // Diagnostics go to the logger being configured
            init_diagnostics(registry.get_logger(name.as_deref()), cli.verbose, cli.quiet)?;
            setup_command(
                &registry,
                name.as_deref(),
                settings,
                handlers.into_iter().map(Into::into).collect(),
                log_file,
            )
            .context("Failed to setup logging, aborting")?
        }
        Commands::Quick {
            name,
            console_output,
            console_level,
            console_color,
            console_template,
            no_console,
            log_file,
            file_level,
            file_color,
            file_template,
            file_datefmt,
            truncate,
        } => {
            init_diagnostics(registry.get_logger(name.as_deref()), cli.verbose, cli.quiet)?;

            let console = (!no_console).then(|| ConsoleSetup {
                output: console_output,
                level: console_level,
                color: console_color,
                template: console_template,
            });
            let logfile = log_file.map(|path| FileSetup {
                path,
                level: file_level,
                color: file_color,
                template: file_template,
                datefmt: file_datefmt,
                truncate,
            });

            quick_command(&registry, name, console, logfile)
                .context("Failed to setup logging, aborting")?
        }
    };

    emit_samples(&logger);

    if !cli.quiet {
        eprintln!(
            "{} logger '{}' with {} handler(s)",
            "configured".green().bold(),
            logger.name(),
            logger.handlers().len()
        );
    }

    Ok(())
}
