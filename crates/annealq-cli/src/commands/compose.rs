//! Compose command implementation.

use anyhow::Result;

use annealq_core::cache::ComposeCache;
use annealq_core::format::{CompositionRow, composition_table, format_complex};

use super::common::load_hamiltonian;
use super::output::Reporter;

/// Execute the compose command.
pub fn execute(hamiltonian: &str, log_file: Option<&str>) -> Result<()> {
    let mut out = Reporter::new(log_file)?;
    let data = load_hamiltonian(hamiltonian)?;

    let cache = ComposeCache::default();
    let rows = composition_table(&data.catalog, &cache)?;

    out.section(&format!(
        "Compositions of {} Pauli strings ({} pairs)",
        data.catalog.len(),
        rows.len()
    ))?;
    render_compositions(&mut out, &rows)
}

/// Print a composition table.
pub fn render_compositions(out: &mut Reporter, rows: &[CompositionRow]) -> Result<()> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                format!("σ_{}", r.left),
                format!("σ_{}", r.right),
                format_complex(r.coeff),
                format!("σ_{}", r.product),
            ]
        })
        .collect();
    out.table(&["Left", "Right", "Phase", "Product"], &cells)
}
