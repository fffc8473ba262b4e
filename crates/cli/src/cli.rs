use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{init_command, list_command, scan_command, select_command};

/// Fuzzy path searching for shells: pick a scanner and list candidate paths
#[derive(Parser, Debug)]
#[command(name = "fzsl")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    FZSL_CONFIG=path  Configuration file\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seconds a scanner command may run before it is killed; 0 waits forever
    #[arg(short, long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Ignore invalid scanner sections instead of failing
    #[arg(long, global = true)]
    pub skip_invalid: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print candidate paths for a directory
    #[command(visible_alias = "s")]
    Scan {
        /// Directory to scan (defaults to the current directory)
        path: Option<PathBuf>,

        /// Use this scanner instead of detecting one
        #[arg(short, long)]
        scanner: Option<String>,

        /// Consider scanners with a negative priority during detection
        #[arg(short, long)]
        all: bool,

        /// Print a JSON object with scanner, working directory and candidates
        #[arg(long)]
        json: bool,
    },
    /// Show which scanner would be used for a directory
    Select {
        /// Directory to check (defaults to the current directory)
        path: Option<PathBuf>,

        /// Consider scanners with a negative priority
        #[arg(short, long)]
        all: bool,

        /// List every applicable scanner instead of only the winner
        #[arg(short, long)]
        verbose: bool,
    },
    /// List configured scanners, highest priority first
    #[command(visible_alias = "ls")]
    List {
        /// Print scanners as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the default configuration file
    Init {
        /// Where to write it (defaults to the user configuration directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let global = self.global;
        match self.command {
            Commands::Scan {
                path,
                scanner,
                all,
                json,
            } => scan_command(&global, path.as_deref(), scanner.as_deref(), all, json),
            Commands::Select { path, all, verbose } => {
                select_command(&global, path.as_deref(), all, verbose)
            }
            Commands::List { json } => list_command(&global, json),
            Commands::Init { path, force } => init_command(path.as_deref(), force),
        }
    }
}
