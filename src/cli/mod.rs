// CLI module
// Public interface for the command-line client

mod commands;

pub use commands::{print_result, run, Cli, Command};
