//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - simulated BB84 quantum key distribution",
        style("bb84").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  bb84-core  Channel simulation, sifting and round execution");
    println!("  bb84-cli   Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
