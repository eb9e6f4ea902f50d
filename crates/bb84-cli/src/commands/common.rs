//! Shared helpers for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;

use bb84_core::{Round, SimulationConfig, YieldStats, format_bits};

/// Default configuration file location (~/.bb84/config.yaml).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bb84").join("config.yaml"))
}

/// Load configuration: an explicit file must exist, the default file is
/// used only when present. Environment overrides apply in both cases.
pub fn load_config(explicit: Option<&Path>) -> Result<SimulationConfig> {
    let file = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => default_config_path().filter(|p| p.exists()),
    };

    if let Some(path) = &file {
        tracing::debug!("Loading configuration from {}", path.display());
    }

    SimulationConfig::load(file.as_deref()).context("Failed to load configuration")
}

/// Print the three sequences of a round, plus the sifting summary.
pub fn print_round(round: &Round) {
    println!(
        "\n{} Round complete ({} qubits):",
        style("✓").green().bold(),
        round.len()
    );
    println!(
        "  Alice's qubits: {}",
        style(format_bits(round.alice_outcomes())).cyan()
    );
    println!(
        "  Bob's bits:     {}",
        style(format_bits(round.bob_outcomes())).cyan()
    );
    println!(
        "  Shared Key:     {}",
        style(format_bits(round.shared_key())).green().bold()
    );

    let bases: String = round
        .alice_bases()
        .iter()
        .zip(round.bob_bases())
        .map(|(a, b)| if a == b { '|' } else { ' ' })
        .collect();
    let alice: String = round.alice_bases().iter().map(|b| b.symbol()).collect();
    let bob: String = round.bob_bases().iter().map(|b| b.symbol()).collect();
    println!("\n  Alice bases: {}", style(alice).dim());
    println!("               {}", style(bases).dim());
    println!("  Bob bases:   {}", style(bob).dim());

    println!(
        "\n  Sifted: {} of {} positions, QBER {:.2}%",
        style(round.shared_key().len()).yellow(),
        round.len(),
        round.qber() * 100.0
    );
}

/// Print yield statistics.
pub fn print_stats(stats: &YieldStats) {
    println!(
        "\n{} Yield over {} rounds of {} qubits:",
        style("✓").green().bold(),
        stats.rounds(),
        stats.num_qubits()
    );
    println!(
        "  Mean key length: {:>10.4}  (expected {:.1})",
        stats.mean(),
        stats.expected_mean()
    );
    println!(
        "  Std deviation:   {:>10.4}  (expected {:.4})",
        stats.std_dev(),
        stats.expected_std_dev()
    );
    if let (Some(min), Some(max)) = (stats.min(), stats.max()) {
        println!("  Range:           {min} .. {max}");
    }
    println!("  Sift fraction:   {:>10.4}", stats.sift_fraction());

    let verdict = if stats.within_sigmas(3.0) {
        style("within 3σ of N/2").green()
    } else {
        style("outside 3σ of N/2").red()
    };
    println!("  Mean is {verdict}");
}
