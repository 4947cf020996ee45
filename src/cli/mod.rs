//! CLI module for the knowledge-base client
//!
//! Provides:
//! - repl: interactive session emulating the page
//! - list / add / delete: knowledge-base maintenance
//! - infer / truth-table: read-only queries
//! - check: offline statement validation

mod args;
mod commands;
mod errors;
mod io;
mod repl;

pub use args::{Cli, Command, OutputFormat};
pub use commands::{add, check, connect, delete, infer, list, run, run_command, truth_table};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{render_page, render_statements, EMPTY_PLACEHOLDER};
pub use repl::{parse_line, run_repl, ReplCommand};
