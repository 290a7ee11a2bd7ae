//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - ansatz energy minimisation by simulated annealing",
        style("annealq").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  annealq-core  Pauli algebra, ansatz expansion and annealing optimizer");
    println!("  annealq-cli   Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/annealq/annealq").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
