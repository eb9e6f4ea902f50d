//! Stats command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use bb84_core::{collect_yield_with, task_rng};

use super::common::{load_config, print_stats};

/// Execute the stats command.
pub async fn execute(
    config_path: Option<&Path>,
    rounds: Option<usize>,
    qubits: Option<usize>,
    seed: Option<u64>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let rounds = rounds.unwrap_or(config.stats_rounds);
    let num_qubits = qubits.unwrap_or(config.stats_qubits);
    config.check_qubits(num_qubits)?;
    let seed = seed.or(config.seed);

    println!(
        "{} Sampling {} rounds of {} qubits",
        style("→").cyan().bold(),
        style(rounds).yellow(),
        style(num_qubits).yellow()
    );

    let bar = ProgressBar::new(rounds as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} rounds ({eta})")?
            .progress_chars("█▉▊▋▌▍▎▏ "),
    );

    let progress = bar.clone();
    let stats = tokio::task::spawn_blocking(move || {
        let mut rng = task_rng(seed);
        collect_yield_with(rounds, num_qubits, &mut rng, |done| {
            progress.set_position(done as u64);
        })
    })
    .await
    .context("Statistics task failed")??;
    bar.finish_and_clear();

    print_stats(&stats);
    Ok(())
}
