mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "riplog")]
#[command(version, about = "Validate CD rip logs for admission into a trusted collection", long_about = None)]
struct Cli {
    /// Log resolver and parser decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check rip logs against the acceptance policy
    Check {
        /// Log files, or directories to scan for *.log files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        sources: commands::Sources,
    },

    /// Show which reference drive a drive name resolves to
    Drive {
        /// Drive name as printed in a rip log
        name: String,

        #[command(flatten)]
        sources: commands::Sources,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Command::Check { paths, sources } => commands::check::run(paths, sources),
        Command::Drive { name, sources } => commands::drive::run(name, sources),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "riplog", &mut io::stdout());
            Ok(())
        }
    }
}
