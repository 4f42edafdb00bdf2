#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use sat_oracle::config::{
    DEFAULT_BOUND_FACTOR, DEFAULT_GROWTH_FACTOR, DEFAULT_SHOTS, Sampling, SearchConfig,
    SimulatorConfig,
};
use sat_oracle::error::{Error, Result};
use sat_oracle::pipeline::{SolveReport, solve_formula};
use sat_oracle::quantum::amplification::AmplificationEngine;
use sat_oracle::quantum::emulator::ClassicalEmulator;
use sat_oracle::quantum::gate::GateSequence;
use sat_oracle::quantum::oracle::{Oracle, OracleCompiler};
use sat_oracle::quantum::simulator::{DEFAULT_MAX_QUBITS, StatevectorSimulator};
use sat_oracle::sat::assignment::Assignment;
use sat_oracle::sat::evaluator::ClassicalEvaluator;
use sat_oracle::sat::formula::Formula;
use sat_oracle::search::outcome::Strategy;
use sat_oracle::search::sampler::RandomSampler;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the sat-oracle application.
#[derive(Parser, Debug)]
#[command(
    name = "sat-oracle",
    version,
    about = "Solve boolean expressions classically and by amplitude amplification"
)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Log verbosity: -v info, -vv debug, -vvv trace. Warnings only by default.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Run the full pipeline on one expression.
    Solve {
        /// Boolean expression, e.g. "(A | B) & ~C". Operators: & | ~ ! and parentheses.
        #[arg(short, long)]
        expression: String,

        /// Search without using the classical solution count.
        #[arg(long, default_value_t = false)]
        adaptive: bool,

        /// Print the report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// List the satisfying assignments by enumeration.
    Classical {
        #[arg(short, long)]
        expression: String,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the compiled oracle, and the full search circuit when `--iterations` is given.
    Circuit {
        #[arg(short, long)]
        expression: String,

        /// Rounds of oracle and diffuser in the printed circuit.
        #[arg(short, long)]
        iterations: Option<usize>,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every expression in the `.sat` files under a directory.
    /// One expression per line; blank lines and lines starting with `#` are skipped.
    Batch {
        path: PathBuf,

        #[arg(long, default_value_t = false)]
        adaptive: bool,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options shared by the commands that run a search.
#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Shots per backend run.
    #[arg(long, default_value_t = DEFAULT_SHOTS)]
    pub(crate) shots: usize,

    /// Seed for the simulator and the iteration sampler.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Growth factor of the adaptive bound.
    #[arg(long, default_value_t = DEFAULT_GROWTH_FACTOR)]
    pub(crate) growth_factor: f64,

    /// The adaptive search gives up once its bound passes this multiple of sqrt(N).
    #[arg(long, default_value_t = DEFAULT_BOUND_FACTOR)]
    pub(crate) bound_factor: f64,

    /// Ceiling on adaptive attempts.
    #[arg(long)]
    pub(crate) max_attempts: Option<usize>,

    /// Largest circuit the simulator accepts.
    #[arg(long, default_value_t = DEFAULT_MAX_QUBITS)]
    pub(crate) max_qubits: usize,

    /// Apportion the shots by exact outcome probability instead of sampling.
    #[arg(long, default_value_t = false)]
    pub(crate) expected: bool,

    /// Emulate the oracle on every assignment and check it marks exactly the solutions.
    #[arg(long, default_value_t = false)]
    pub(crate) verify: bool,

    /// Print timing, gate and memory statistics.
    #[arg(long, default_value_t = false)]
    pub(crate) stats: bool,
}

impl CommonOptions {
    pub(crate) fn search_config(&self) -> SearchConfig {
        SearchConfig::default()
            .with_shots(self.shots)
            .with_growth_factor(self.growth_factor)
            .with_bound_factor(self.bound_factor)
            .with_max_attempts(self.max_attempts)
            .with_seed(self.seed)
            .validated()
    }

    pub(crate) fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            max_qubits: self.max_qubits,
            sampling: if self.expected {
                Sampling::Expected
            } else {
                Sampling::Shots
            },
            seed: self.seed,
        }
    }
}

const fn strategy(adaptive: bool) -> Strategy {
    if adaptive {
        Strategy::Adaptive
    } else {
        Strategy::Known
    }
}

/// Parses, solves and prints one expression.
///
/// # Errors
///
/// Any pipeline error, or a failed `--verify`.
pub(crate) fn run_solve(
    expression: &str,
    adaptive: bool,
    json: bool,
    common: &CommonOptions,
) -> Result<()> {
    let time = Instant::now();
    let formula = Formula::parse(expression)?;
    let parse_time = time.elapsed();

    let report = solve_and_report(&formula, strategy(adaptive), common, json, parse_time)?;
    if !json {
        print_report(&report);
    }
    Ok(())
}

fn solve_and_report(
    formula: &Formula,
    strategy: Strategy,
    common: &CommonOptions,
    json: bool,
    parse_time: Duration,
) -> Result<SolveReport> {
    let oracle = OracleCompiler::compile(formula.cnf())?;
    if common.verify {
        verify_oracle(&oracle, formula)?;
    }

    let backend = StatevectorSimulator::new(common.simulator_config());
    let sampler = RandomSampler::new(common.seed);

    let time = Instant::now();
    let report = solve_formula(formula, strategy, &common.search_config(), backend, sampler)?;
    let elapsed = time.elapsed();

    if json {
        println!("{}", report.to_json()?);
    }
    if common.stats {
        print_stats(parse_time, elapsed, formula, &oracle, &report);
    }
    Ok(report)
}

/// Checks `oracle` against `formula` by classical emulation.
///
/// # Errors
///
/// [`Error::OracleCheck`] when any assignment is marked wrongly or leaves a qubit dirty.
pub(crate) fn verify_oracle(oracle: &Oracle, formula: &Formula) -> Result<()> {
    let check = ClassicalEmulator::default().check_oracle(oracle, formula)?;
    println!(
        "Oracle verified: {} ({} assignments, {} marked)",
        check.is_sound(),
        check.checked,
        check.marked.len()
    );
    if check.is_sound() {
        return Ok(());
    }
    for bits in &check.mismatched {
        eprintln!("  mismatched: {bits}");
    }
    for bits in &check.dirty {
        eprintln!("  dirty: {bits}");
    }
    Err(Error::OracleCheck {
        mismatched: check.mismatched.len(),
        dirty: check.dirty.len(),
    })
}

/// Prints the classical solutions of one expression.
///
/// # Errors
///
/// Parse errors, or too many variables to enumerate.
pub(crate) fn run_classical(expression: &str, json: bool) -> Result<()> {
    let formula = Formula::parse(expression)?;
    let solutions = ClassicalEvaluator::default().solve(&formula)?;

    if json {
        let value = serde_json::json!({
            "expression": formula.text(),
            "variables": formula.variables().iter().collect_vec(),
            "solutions": solutions,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Variables: {}", formula.variables());
    println!("CNF: {}", formula.cnf());
    println!("Solutions: {}", solutions.len());
    for bits in &solutions {
        let named = Assignment::from_bitstring(bits)
            .map(|a| {
                a.named(formula.variables())
                    .into_iter()
                    .map(|(name, value)| format!("{name}={}", u8::from(value)))
                    .join(" ")
            })
            .unwrap_or_default();
        println!("  {bits}  {named}");
    }
    Ok(())
}

/// Prints the oracle for one expression and, optionally, the full search circuit.
///
/// # Errors
///
/// Parse and oracle errors, or a failed `--verify`.
pub(crate) fn run_circuit(
    expression: &str,
    iterations: Option<usize>,
    common: &CommonOptions,
) -> Result<()> {
    let formula = Formula::parse(expression)?;
    let oracle = OracleCompiler::compile(formula.cnf())?;
    let layout = oracle.layout();

    println!("Variables: {}", formula.variables());
    println!("CNF: {}", formula.cnf());
    println!(
        "Qubits: {} ({} variables, {} clause ancillas)",
        layout.num_qubits(),
        layout.num_vars(),
        layout.num_clauses()
    );

    let gates = oracle.gates();
    println!("\n// oracle: compute");
    print!("{}", oracle.compute());
    println!("// oracle: mark");
    print!("{}", oracle.mark());
    println!(
        "// oracle: uncompute, the {} compute gates reversed",
        oracle.compute().len()
    );
    print_gate_counts("oracle", &gates);

    if let Some(k) = iterations {
        let objective = oracle.objective_qubits().collect_vec();
        let circuit = AmplificationEngine::construct(&gates, &objective, k);
        println!("\n// search circuit, {k} iteration(s)");
        print!("{circuit}");
        print_gate_counts("circuit", circuit.gates());
    }

    if common.verify {
        verify_oracle(&oracle, &formula)?;
    }
    Ok(())
}

fn print_gate_counts(label: &str, gates: &GateSequence) {
    let counts = gates
        .counts()
        .into_iter()
        .map(|(name, n)| format!("{name}={n}"))
        .join(" ");
    println!(
        "// {label}: {} gates, max arity {} [{counts}]",
        gates.len(),
        gates.max_arity()
    );
}

/// Solves every expression found in `.sat` files under `path`.
///
/// Expressions that fail to parse or solve are reported and skipped.
///
/// # Errors
///
/// If `path` is not a directory or a file cannot be read.
pub(crate) fn run_batch(path: &Path, adaptive: bool, common: &CommonOptions) -> Result<()> {
    if !path.is_dir() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("not a directory: {}", path.display()),
        )));
    }

    let (mut solved, mut found, mut failed) = (0_usize, 0_usize, 0_usize);
    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() || file_path.extension().is_none_or(|ext| ext != "sat") {
            continue;
        }

        println!("== {}", file_path.display());
        let contents = std::fs::read_to_string(file_path)?;
        for line in contents
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
        {
            let result = Formula::parse(line).map_err(Error::from).and_then(|formula| {
                solve_and_report(&formula, strategy(adaptive), common, false, Duration::ZERO)
            });
            match result {
                Ok(report) => {
                    solved += 1;
                    found += usize::from(report.found);
                    println!("{}", summary_line(&report));
                }
                Err(e) => {
                    failed += 1;
                    eprintln!("{line}: {e}");
                }
            }
        }
    }

    println!("\n{solved} solved, {found} found, {failed} failed");
    Ok(())
}

fn summary_line(report: &SolveReport) -> String {
    format!(
        "{:<32} M={:<3} {:<9} attempts={:<3} k={:<3} top={}",
        report.expression,
        report.num_solutions,
        if report.found { "FOUND" } else { "NOT FOUND" },
        report.attempts,
        report.iterations_used,
        report.top_measurement.as_deref().unwrap_or("-"),
    )
}

pub(crate) fn print_report(report: &SolveReport) {
    println!("Expression: {}", report.expression);
    println!("Variables: [{}]", report.variables.iter().join(", "));
    println!(
        "Classical solutions ({}): {}",
        report.num_solutions,
        report.classical_solutions.iter().join(", ")
    );
    println!("Strategy: {}", report.strategy);
    println!(
        "Iterations: {}  Attempts: {}  Oracle qubits: {}",
        report.iterations_used, report.attempts, report.oracle_qubits
    );
    println!(
        "Top measurement: {}",
        report.top_measurement.as_deref().unwrap_or("-")
    );

    let total = report.histogram.values().sum::<usize>().max(1);
    println!("Histogram:");
    for (bits, count) in &report.histogram {
        let bar = "#".repeat(count * 40 / total);
        println!("  {bits}  {count:>6}  {bar}");
    }

    match &report.assignment {
        Some(bits) => println!("\nFOUND {bits}"),
        None => println!("\nNOT FOUND"),
    }
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
fn memory_mib() -> Option<(f64, f64)> {
    const MIB: f64 = 1024.0 * 1024.0;
    epoch::advance().ok()?;
    let allocated = stats::allocated::mib().ok()?.read().ok()?;
    let resident = stats::resident::mib().ok()?.read().ok()?;
    Some((allocated as f64 / MIB, resident as f64 / MIB))
}

fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    formula: &Formula,
    oracle: &Oracle,
    report: &SolveReport,
) {
    let gates = oracle.gates();
    let objective = oracle.objective_qubits().collect_vec();
    let circuit = AmplificationEngine::construct(&gates, &objective, report.iterations_used);

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", formula.num_vars());
    stat_line("Clauses", formula.cnf().num_clauses());
    stat_line(
        "Search space",
        formula
            .search_space()
            .map_or_else(|_| "overflow".to_string(), |n| n.to_string()),
    );
    stat_line("Oracle qubits", oracle.num_qubits());
    stat_line("Oracle gates", gates.len());
    stat_line("Max gate arity", gates.max_arity());

    println!("========================[ Search Statistics ]========================");
    stat_line("Strategy", report.strategy);
    stat_line("Attempts", report.attempts);
    stat_line("Iterations (last run)", report.iterations_used);
    stat_line("Circuit gates (last run)", circuit.gates().len());
    if let Some((allocated, resident)) = memory_mib() {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("Search time (s)", format!("{:.3}", elapsed.as_secs_f64()));
    println!("=====================================================================");
}
