//! Schedule command implementation.

use anyhow::Result;
use console::style;

use annealq_core::annealing::{calculate_temp_steps, total_iterations};

use super::common::{TuningArgs, resolve_config};
use super::output::Reporter;

/// Execute the schedule command.
pub fn execute(tuning: &TuningArgs) -> Result<()> {
    let config = resolve_config(tuning)?;
    let mut out = Reporter::new(None)?;

    let levels = calculate_temp_steps(
        config.initial_temperature,
        config.cooling_rate,
        config.minimum_temperature,
    );
    let final_temperature = config.initial_temperature * config.cooling_rate.powi(levels as i32);

    out.section("Cooling schedule")?;
    out.result("Initial temperature", config.initial_temperature)?;
    out.result("Cooling rate", config.cooling_rate)?;
    out.result("Minimum temperature", format!("{:e}", config.minimum_temperature))?;
    out.result("Temperature levels", style(levels).yellow())?;
    out.result("Final temperature", format!("{final_temperature:.3e}"))?;
    out.result("Thermalization steps/level", config.thermalization_steps())?;
    out.result("Main iterations/level", config.iterations_per_temperature)?;
    out.result(
        "Total iterations per pass",
        style(total_iterations(&config)).yellow(),
    )?;
    out.result("Acceptance reference", format!("{:?}", config.acceptance))?;
    out.result("Thermalization", format!("{:?}", config.thermalization))?;
    Ok(())
}
