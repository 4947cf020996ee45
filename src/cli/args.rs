//! CLI argument definitions using clap
//!
//! Commands:
//! - logickb repl
//! - logickb list
//! - logickb add <STATEMENT>
//! - logickb delete <ID>
//! - logickb infer <QUERY> [--method <METHOD>] [--format text|html]
//! - logickb truth-table [--format text|html]
//! - logickb check <STATEMENT>

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::client::InferenceMethod;
use crate::config::Overrides;

/// logickb - propositional-logic knowledge base client
#[derive(Parser, Debug)]
#[command(name = "logickb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://127.0.0.1:5000
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Inference method: truth-table, modus-ponens or resolution
    #[arg(long, global = true)]
    pub method: Option<InferenceMethod>,

    /// Minimum log severity: trace, info, warn, error or fatal
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Defaults to `repl`
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive session
    Repl,

    /// Print the statements in the knowledge base
    List,

    /// Validate and add a statement
    Add {
        /// Statement text; alternate operator glyphs are normalized
        statement: String,
    },

    /// Delete a statement by id
    Delete { id: String },

    /// Ask whether QUERY follows from the knowledge base
    Infer {
        query: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the truth table of the knowledge base
    TruthTable {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Normalize and validate a statement without contacting the server
    Check { statement: String },
}

/// How a result panel is printed
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain terminal text
    #[default]
    Text,
    /// Escaped HTML fragment
    Html,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Repl)
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            server_url: self.server.clone(),
            method: self.method,
            log_level: self.log_level.clone(),
        }
    }
}
