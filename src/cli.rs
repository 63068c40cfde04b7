//! CLI argument definitions using clap with subcommand architecture

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stylefix")]
#[command(about = "CSS lint and auto-fix service backed by stylelint", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "9747", env = "STYLEFIX_PORT")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1", env = "STYLEFIX_HOST")]
        host: String,
    },

    /// Lint a file (or stdin) once and print the report as JSON
    Check {
        /// File to lint; reads stdin when omitted
        file: Option<PathBuf>,

        /// Source syntax: css or html
        #[arg(long, default_value = "css")]
        syntax: String,

        /// Re-serialization style: compact or nested
        #[arg(long)]
        output_style: Option<String>,

        /// JSON file with the rule mapping; a small built-in set when omitted
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}
