// remoto - command-line client for the control server

use clap::{CommandFactory, Parser};
use std::process;

use remoto::cli::{self, Cli};

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr, and only when asked for; stdout belongs to
    // the OK/ERROR output contract.
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            // clap renders help/usage itself; pin the exit codes to the
            // 0-on-help, 1-on-error contract.
            let code = if error.use_stderr() { 1 } else { 0 };
            let _ = error.print();
            process::exit(code);
        }
    };

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        process::exit(0);
    };

    process::exit(cli::run(command).await);
}
