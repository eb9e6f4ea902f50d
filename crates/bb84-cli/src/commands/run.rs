//! Run command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use bb84_core::{Round, spawn_round};

use super::common::{load_config, print_round};
use crate::OutputFormat;

/// JSON shape of a finished round.
#[derive(Serialize)]
struct RoundReport<'a> {
    #[serde(flatten)]
    round: &'a Round,
    sifted_indices: Vec<usize>,
    qber: f64,
}

/// Execute the run command.
pub async fn execute(
    config_path: Option<&Path>,
    qubits: Option<usize>,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let config = load_config(config_path)?;
    let num_qubits = qubits.unwrap_or(config.num_qubits);
    config.check_qubits(num_qubits)?;
    let seed = seed.or(config.seed);

    if format == OutputFormat::Table {
        println!(
            "{} Exchanging {} qubits{}",
            style("→").cyan().bold(),
            style(num_qubits).yellow(),
            seed.map(|s| format!(" (seed {s})")).unwrap_or_default()
        );
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Running simulation...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let round = spawn_round(num_qubits, seed).join().await;
    spinner.finish_and_clear();
    let round = round?;

    match format {
        OutputFormat::Table => print_round(&round),
        OutputFormat::Json => {
            let report = RoundReport {
                round: &round,
                sifted_indices: round.sifted_indices(),
                qber: round.qber(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
