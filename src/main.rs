//! # sat-oracle
//!
//! Command-line front end for the `sat_oracle` library. It solves boolean
//! expressions over named variables two ways: by enumerating every assignment, and
//! by amplitude-amplification search over an oracle compiled from the expression's
//! CNF, run on a statevector simulator.
//!
//! ## Subcommands
//!
//! -   `solve -e <EXPR>`: full pipeline. The iteration count comes from the
//!     classical solution count unless `--adaptive` is given. `--json` prints the
//!     report as JSON.
//! -   `classical -e <EXPR>`: list satisfying assignments.
//! -   `circuit -e <EXPR> [--iterations K]`: print the compiled oracle and, with
//!     `--iterations`, the full search circuit.
//! -   `batch <DIR>`: solve every expression in the `.sat` files under a directory.
//! -   `completions <SHELL>`: shell completion script.
//!
//! ## Example Invocations
//!
//! ```sh
//! sat-oracle solve -e "(A | B) & ~C"
//! sat-oracle solve -e "A & B & C" --adaptive --seed 7 --stats
//! sat-oracle circuit -e "A | ~B" --iterations 1 --verify
//! sat-oracle batch problems/ --expected
//! ```
//!
//! Bitstrings put variable `i` (in sorted name order) at character `i`.

use crate::command_line::cli::{
    Cli, Commands, run_batch, run_circuit, run_classical, run_solve,
};
use clap::{CommandFactory, Parser};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the `--stats` memory figures.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        std::process::exit(1);
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Solve {
            expression,
            adaptive,
            json,
            common,
        } => run_solve(&expression, adaptive, json, &common),
        Commands::Classical { expression, json } => run_classical(&expression, json),
        Commands::Circuit {
            expression,
            iterations,
            common,
        } => run_circuit(&expression, iterations, &common),
        Commands::Batch {
            path,
            adaptive,
            common,
        } => run_batch(&path, adaptive, &common),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
