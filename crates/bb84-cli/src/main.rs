//! BB84 Command-Line Interface
//!
//! Runs simulated BB84 key exchanges and reports the sifted key.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{run, stats, version};

/// BB84 - simulated quantum key distribution
#[derive(Parser)]
#[command(name = "bb84")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (YAML); defaults to ~/.bb84/config.yaml if present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one key exchange
    Run {
        /// Number of qubits to exchange
        #[arg(short = 'n', long, value_parser = bb84_core::parse_qubit_count, allow_negative_numbers = true)]
        qubits: Option<usize>,

        /// Seed for the random source
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Measure sifted-key yield over many rounds
    Stats {
        /// Number of rounds
        #[arg(short, long)]
        rounds: Option<usize>,

        /// Qubits per round
        #[arg(short = 'n', long, value_parser = bb84_core::parse_qubit_count, allow_negative_numbers = true)]
        qubits: Option<usize>,

        /// Seed for the random source
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show version information
    Version,
}

/// Output format for round results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    Table,
    /// Full round record as JSON
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();

    // Execute command
    let result = match cli.command {
        Commands::Run {
            qubits,
            seed,
            format,
        } => run::execute(config, qubits, seed, format).await,

        Commands::Stats {
            rounds,
            qubits,
            seed,
        } => stats::execute(config, rounds, qubits, seed).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
