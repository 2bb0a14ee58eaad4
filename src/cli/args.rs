// file: src/cli/args.rs
// version: 1.0.1
// guid: b083fbc2-9646-4796-ba87-dd3b0d76114d

//! Command line argument definitions

use crate::handler::HandlerKind;
use crate::oneshot::{DEFAULT_CONSOLE_TEMPLATE, DEFAULT_LOGFILE_DATE_FORMAT, DEFAULT_LOGFILE_TEMPLATE};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "custom-logging-demo")]
#[command(about = "Configure a logger and emit one message per severity level")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show the library's own configuration diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress the configuration summary and library diagnostics
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble a logger from handler kinds and default settings
    Setup {
        /// Logger name; the root logger when omitted
        #[arg(short, long)]
        name: Option<String>,

        /// Settings file (YAML, JSON or TOML) replacing the bundled defaults
        #[arg(short, long, env = "CUSTOM_LOGGING_SETTINGS")]
        settings: Option<PathBuf>,

        /// Handler kinds to attach; a single stream handler when omitted
        #[arg(long = "handler", value_enum)]
        handlers: Vec<HandlerArg>,

        /// Log file path for file and rotating file handlers
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Configure console and log file output from explicit parameters
    Quick {
        /// Logger name; the root logger when omitted
        #[arg(short, long)]
        name: Option<String>,

        /// Console stream: stdout or stderr
        #[arg(long, default_value = "stdout")]
        console_output: String,

        #[arg(long, default_value = "debug")]
        console_level: String,

        #[arg(long)]
        console_color: bool,

        #[arg(long, default_value = DEFAULT_CONSOLE_TEMPLATE)]
        console_template: String,

        /// Skip console output entirely
        #[arg(long)]
        no_console: bool,

        #[arg(long)]
        log_file: Option<PathBuf>,

        #[arg(long, default_value = "debug")]
        file_level: String,

        #[arg(long)]
        file_color: bool,

        #[arg(long, default_value = DEFAULT_LOGFILE_TEMPLATE)]
        file_template: String,

        #[arg(long, default_value = DEFAULT_LOGFILE_DATE_FORMAT)]
        file_datefmt: String,

        /// Truncate the log file instead of appending
        #[arg(long)]
        truncate: bool,
    },
}

/// Handler kind argument for CLI
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum HandlerArg {
    Stream,
    File,
    RotatingFile,
}

impl From<HandlerArg> for HandlerKind {
    fn from(arg: HandlerArg) -> Self {
        match arg {
            HandlerArg::Stream => HandlerKind::Stream,
            HandlerArg::File => HandlerKind::File,
            HandlerArg::RotatingFile => HandlerKind::RotatingFile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_are_documented() {
        use clap::CommandFactory;

        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("Show the library's own configuration diagnostics"));
        assert!(help.contains("Suppress the configuration summary"));
    }

    #[test]
    fn test_parse_setup_command() {
        let cli = Cli::try_parse_from([
            "custom-logging-demo",
            "setup",
            "--name",
            "demo",
            "--handler",
            "stream",
            "--handler",
            "rotating-file",
        ])
        .unwrap();

        match cli.command {
            Commands::Setup { name, handlers, .. } => {
                assert_eq!(name.as_deref(), Some("demo"));
                let kinds: Vec<HandlerKind> = handlers.into_iter().map(Into::into).collect();
                assert_eq!(kinds, vec![HandlerKind::Stream, HandlerKind::RotatingFile]);
            }
            _ => panic!("expected setup command"),
        }
    }

    #[test]
    fn test_parse_quick_defaults() {
        let cli = Cli::try_parse_from(["custom-logging-demo", "quick", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Quick {
                console_output,
                console_template,
                log_file,
                ..
            } => {
                assert_eq!(console_output, "stdout");
                assert_eq!(console_template, DEFAULT_CONSOLE_TEMPLATE);
                assert!(log_file.is_none());
            }
            _ => panic!("expected quick command"),
        }
    }
}
