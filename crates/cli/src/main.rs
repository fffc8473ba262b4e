use clap::Parser;
use fzsl::{Cli, exit_code};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize tracing based on RUST_LOG env var; stdout is reserved for candidates
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}
