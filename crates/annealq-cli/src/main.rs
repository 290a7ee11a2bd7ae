//! annealq Command-Line Interface
//!
//! ```text
//! annealq run --hamiltonian h.txt [--generators g.txt] [--seed 42]
//! annealq compose --hamiltonian h.txt
//! annealq schedule --cooling-rate 0.95
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::TuningArgs;
use commands::{compose, run, schedule, version};

/// annealq - ansatz energy minimisation by simulated annealing
#[derive(Parser)]
#[command(name = "annealq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize ansatz angles for a Hamiltonian
    Run {
        /// Hamiltonian file (`<re> <im> <digits>` per line)
        #[arg(short = 'H', long)]
        hamiltonian: String,

        /// Generator file in the same format; sweeps m = 2..=n when omitted
        #[arg(short, long)]
        generators: Option<String>,

        #[command(flatten)]
        tuning: TuningArgs,

        /// Print the composition table of every parsed Pauli string
        #[arg(long)]
        show_compositions: bool,

        /// Write the result as JSON
        #[arg(short, long)]
        export: Option<String>,

        /// Append plain-text output to this file
        #[arg(long)]
        log_file: Option<String>,
    },

    /// Print the composition table of a Hamiltonian's Pauli strings
    Compose {
        /// Hamiltonian file
        #[arg(short = 'H', long)]
        hamiltonian: String,

        /// Append plain-text output to this file
        #[arg(long)]
        log_file: Option<String>,
    },

    /// Show the cooling schedule for a configuration
    Schedule {
        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
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

    // Execute command
    let result = match cli.command {
        Commands::Run {
            hamiltonian,
            generators,
            tuning,
            show_compositions,
            export,
            log_file,
        } => run::execute(
            &hamiltonian,
            generators.as_deref(),
            &tuning,
            show_compositions,
            export.as_deref(),
            log_file.as_deref(),
        ),

        Commands::Compose {
            hamiltonian,
            log_file,
        } => compose::execute(&hamiltonian, log_file.as_deref()),

        Commands::Schedule { tuning } => schedule::execute(&tuning),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
