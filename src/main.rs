//! logickb CLI entry point
//!
//! All logic is delegated to the CLI module; this only maps a failure to a
//! message on stderr and a non-zero exit code.

use logickb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
