//! Run command implementation.

use anyhow::{Context, Result};
use console::style;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use annealq_core::annealing::{shifted_angles, total_iterations};
use annealq_core::config::AnnealingConfig;
use annealq_core::format::{composition_table, format_complex, format_hamiltonian, format_number};
use annealq_core::hamiltonian::{HamiltonianData, MIN_SWEEP_TERMS};
use annealq_core::sweep::{OptimizationResult, Optimizer};

use super::common::{BarObserver, TuningArgs, create_progress_bar, load_hamiltonian, resolve_config};
use super::compose::render_compositions;
use super::output::Reporter;

/// Execute the run command.
pub fn execute(
    hamiltonian: &str,
    generators: Option<&str>,
    tuning: &TuningArgs,
    show_compositions: bool,
    export: Option<&str>,
    log_file: Option<&str>,
) -> Result<()> {
    let mut out = Reporter::new(log_file)?;
    let config = resolve_config(tuning)?;
    let data = load_hamiltonian(hamiltonian)?;
    info!(path = hamiltonian, terms = data.hamiltonian.n_terms(), "loaded Hamiltonian");

    out.header("annealq: ansatz optimization by simulated annealing")?;
    print_hamiltonian(&mut out, &data)?;

    let optimizer = Optimizer::new(data.hamiltonian.clone(), config.clone())?;

    if show_compositions {
        let rows = composition_table(&data.catalog, optimizer.cache())?;
        out.section("Pauli compositions")?;
        render_compositions(&mut out, &rows)?;
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let per_pass = total_iterations(&config);

    let json = match generators {
        Some(path) => {
            let gens = load_hamiltonian(path)?.hamiltonian;
            if gens.is_empty() {
                anyhow::bail!("No generator terms in {path}");
            }
            if gens.n_qubits() != data.hamiltonian.n_qubits() {
                anyhow::bail!(
                    "Generators act on {} qubits, the Hamiltonian on {}",
                    gens.n_qubits(),
                    data.hamiltonian.n_qubits()
                );
            }

            out.section(&format!("Annealing {} generators", gens.n_terms()))?;
            let start = shifted_angles(gens.terms(), &mut rng);
            let bar = create_progress_bar(per_pass, &format!("m = {}", gens.n_terms()))?;
            let result = optimizer.optimize(gens.terms(), &start, &mut rng, &BarObserver(bar.clone()))?;
            bar.finish_and_clear();

            print_result(&mut out, &config, &result)?;
            serde_json::to_string_pretty(&result)?
        }
        None => {
            data.hamiltonian.ensure_min_terms(MIN_SWEEP_TERMS)?;
            let passes = (data.hamiltonian.n_terms() + 1 - MIN_SWEEP_TERMS) as u64;
            out.section(&format!(
                "Sweeping m = {}..={}",
                MIN_SWEEP_TERMS,
                data.hamiltonian.n_terms()
            ))?;

            let bar = create_progress_bar(per_pass * passes, "annealing")?;
            let report = optimizer.sweep(&mut rng, |m| {
                bar.set_message(format!("m = {m}"));
                BarObserver(bar.clone())
            })?;
            bar.finish_and_clear();

            let rows: Vec<Vec<String>> = report
                .entries
                .iter()
                .map(|e| {
                    vec![
                        e.m.to_string(),
                        format!("{:.6}", e.energy),
                        e.outcome.iterations.to_string(),
                        format!("{:.1}%", 100.0 * e.outcome.acceptance_rate(&config)),
                    ]
                })
                .collect();
            out.table(&["m", "Energy", "Iterations", "Accepted"], &rows)?;

            if let Some(best) = report.best() {
                out.section(&format!("Best ansatz (m = {})", best.m))?;
                print_result(&mut out, &config, best)?;
            }
            serde_json::to_string_pretty(&report)?
        }
    };

    let stats = optimizer.cache().statistics();
    out.blank()?;
    out.result(
        "Compose cache",
        format!(
            "{} hits, {} misses ({:.1}% hit rate)",
            stats.hits,
            stats.misses,
            stats.hit_rate()
        ),
    )?;

    if let Some(path) = export {
        std::fs::write(path, json).with_context(|| format!("Failed to write export: {path}"))?;
        out.success(&format!("Result exported to {}", style(path).green()))?;
    }

    Ok(())
}

fn print_hamiltonian(out: &mut Reporter, data: &HamiltonianData) -> Result<()> {
    let h = &data.hamiltonian;
    out.section("Hamiltonian")?;
    out.panel("H", &format_hamiltonian(h))?;
    out.result("Qubits", h.n_qubits())?;
    out.result("Terms", h.n_terms())?;
    out.result("λ = Σ|c|", format_number(h.lambda()))?;
    out.blank()?;

    let rows: Vec<Vec<String>> = h
        .terms()
        .iter()
        .enumerate()
        .map(|(k, t)| {
            vec![
                (k + 1).to_string(),
                format_complex(t.coeff),
                t.pauli.to_string(),
                t.pauli.label(),
            ]
        })
        .collect();
    out.table(&["#", "Coefficient", "σ", "Operator"], &rows)
}

fn print_result(out: &mut Reporter, config: &AnnealingConfig, result: &OptimizationResult) -> Result<()> {
    let rows: Vec<Vec<String>> = result
        .generators
        .iter()
        .zip(&result.angles)
        .enumerate()
        .map(|(k, (g, theta))| {
            vec![
                format!("θ_{}", k + 1),
                format!("{}*σ_{}", format_complex(g.coeff), g.pauli),
                format!("{theta:.6}"),
            ]
        })
        .collect();
    out.table(&["Angle", "Generator", "Value"], &rows)?;
    out.blank()?;

    out.panel("Symbolic ansatz", &result.ansatz.symbolic)?;
    out.panel("Numeric ansatz", &result.ansatz.numeric)?;
    out.blank()?;

    let outcome = &result.outcome;
    let rows = vec![
        vec!["Energy".to_string(), format!("{:.10}", result.energy)],
        vec!["Generators".to_string(), result.m.to_string()],
        vec!["Ansatz terms".to_string(), result.expansion.len().to_string()],
        vec![
            "Temperature levels".to_string(),
            outcome.temperature_levels.to_string(),
        ],
        vec!["Iterations".to_string(), outcome.iterations.to_string()],
        vec![
            "Acceptance rate".to_string(),
            format!("{:.1}%", 100.0 * outcome.acceptance_rate(config)),
        ],
        vec![
            "Best found at T".to_string(),
            format!("{:.3e}", outcome.best_temperature),
        ],
    ];
    out.table(&["Quantity", "Value"], &rows)
}
