#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand, ValueEnum};
use dpll_sat::sat::cnf::Cnf;
use dpll_sat::sat::dimacs::{parse_file, parse_str};
use dpll_sat::sat::dpll::Dpll;
use dpll_sat::sat::solver::{Outcome, SolutionStats, Solver};
use dpll_sat::sat::variable_selection::{JeroslowWangOneSided, JeroslowWangTwoSided};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// File the benchmark mode writes its verdicts to unless told otherwise.
pub(crate) const DEFAULT_BENCH_LOG: &str = "benchmarks-results.log";

/// Defines the command-line interface for the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "dpll-sat",
    version,
    about = "A DPLL SAT solver with Jeroslow-Wang branching",
    args_conflicts_with_subcommands = true
)]
pub(crate) struct Cli {
    /// A DIMACS .cnf file to solve, or a directory of them to benchmark.
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `bench`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a CNF formula provided as plain text.
    Text {
        /// Literal CNF input as a string (e.g. "1 -2 0\n2 3 0").
        /// Each line represents a clause, literals are space-separated, and 0 terminates a clause.
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every .cnf file in a directory, logging one SAT/UNSAT line per
    /// file and reporting the total time.
    Bench {
        /// Directory holding the benchmark inputs.
        #[arg(long)]
        dir: PathBuf,

        /// Where to write the verdicts.
        #[arg(long, default_value = DEFAULT_BENCH_LOG)]
        log: PathBuf,

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

/// Branching heuristic used by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum VariableSelectionType {
    /// Score variables, polarity ignored; try the positive literal first.
    #[default]
    JwTwoSided,
    /// Score literals; try the best literal first.
    JwOneSided,
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Print the parsed formula and timings.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Skip checking a found assignment against the formula.
    #[arg(long, default_value_t = false)]
    pub(crate) no_verify: bool,

    /// Print problem and search statistics after solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) stats: bool,

    #[arg(long, value_enum, default_value_t = VariableSelectionType::JwTwoSided)]
    pub(crate) variable_selection: VariableSelectionType,
}

/// Runs the solver selected by `common` on `cnf`.
pub(crate) fn solve(cnf: &Cnf, common: &CommonOptions) -> (Outcome, Duration, SolutionStats) {
    if common.debug {
        println!("CNF: {cnf}");
        println!("Variables: {}", cnf.num_vars());
        println!("Clauses: {}", cnf.len());
        println!("Literals: {}", cnf.num_literals());
    }

    let time = Instant::now();

    let (outcome, solver_stats) = match common.variable_selection {
        VariableSelectionType::JwTwoSided => {
            run(Dpll::with_selector(cnf.clone(), JeroslowWangTwoSided))
        }
        VariableSelectionType::JwOneSided => {
            run(Dpll::with_selector(cnf.clone(), JeroslowWangOneSided))
        }
    };

    let elapsed = time.elapsed();

    if common.debug {
        println!("Outcome: {outcome:?}");
        println!("Time: {elapsed:?}");
    }

    (outcome, elapsed, solver_stats)
}

fn run<S: Solver>(mut solver: S) -> (Outcome, SolutionStats) {
    let outcome = solver.solve();
    (outcome, solver.stats())
}

/// Checks a found assignment against the formula it came from.
///
/// # Errors
///
/// If some clause has no literal on the trail, which means the solver is
/// broken.
pub(crate) fn verify_solution(cnf: &Cnf, outcome: &Outcome) -> Result<(), String> {
    let Some(trail) = outcome.trail() else {
        return Ok(());
    };

    if cnf.verify(trail) {
        debug!("assignment verified");
        Ok(())
    } else {
        Err(format!("solution failed verification: {trail}"))
    }
}

/// Parses a DIMACS file, solves it and reports the result.
///
/// # Errors
///
/// If the file does not exist, cannot be parsed, or the solution fails
/// verification.
pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("{} does not exist", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    let time = Instant::now();
    let cnf = parse_file(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let parse_time = time.elapsed();

    info!("solving {}", path.display());
    solve_and_report(&cnf, common, parse_time)
}

/// Parses a DIMACS string, solves it and reports the result.
///
/// # Errors
///
/// If the text cannot be parsed or the solution fails verification.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let cnf = parse_str(input).map_err(|e| e.to_string())?;
    let parse_time = time.elapsed();

    solve_and_report(&cnf, common, parse_time)
}

/// Solves `cnf` and prints `SAT` with the assignment sorted by variable, or
/// `UNSAT`.
///
/// # Errors
///
/// If the solution fails verification.
pub(crate) fn solve_and_report(
    cnf: &Cnf,
    common: &CommonOptions,
    parse_time: Duration,
) -> Result<(), String> {
    let (outcome, elapsed, solver_stats) = solve(cnf, common);

    if !common.no_verify {
        verify_solution(cnf, &outcome)?;
    }

    println!("{}", outcome.verdict());
    if let Outcome::Satisfied(trail) = &outcome {
        println!("{trail}");
    }

    if common.stats {
        print_stats(parse_time, elapsed, cnf, &solver_stats);
    }

    Ok(())
}

/// Solves a directory of CNF files.
///
/// Every `.cnf` file under `dir` is solved in file name order and one line,
/// `SAT` or `UNSAT`, is written per file to `log`. The total elapsed time is
/// printed at the end.
///
/// # Errors
///
/// If `dir` is not a directory, the log cannot be written, or any input
/// fails to parse or verify.
pub(crate) fn solve_dir(dir: &Path, log: &Path, common: &CommonOptions) -> Result<(), String> {
    if !dir.is_dir() {
        return Err(format!("Provided path is not a directory: {}", dir.display()));
    }

    println!("Running on benchmarks...");
    let start = Instant::now();

    let file = File::create(log).map_err(|e| format!("{}: {e}", log.display()))?;
    let mut out = BufWriter::new(file);

    for entry in cnf_files(dir) {
        let file_path = entry.path();

        let cnf = parse_file(file_path).map_err(|e| format!("{}: {e}", file_path.display()))?;
        let (outcome, elapsed, _) = solve(&cnf, common);

        if !common.no_verify {
            verify_solution(&cnf, &outcome)?;
        }

        info!(
            "{}: {} in {:.3}s",
            file_path.display(),
            outcome.verdict(),
            elapsed.as_secs_f64()
        );
        writeln!(out, "{}", outcome.verdict()).map_err(|e| format!("{}: {e}", log.display()))?;
    }

    out.flush().map_err(|e| format!("{}: {e}", log.display()))?;

    println!("Execution time: {:.2} seconds", start.elapsed().as_secs_f64());
    Ok(())
}

/// Regular `.cnf` files below `dir`, sorted by file name. Entries that cannot
/// be read are logged and skipped.
fn cnf_files(dir: &Path) -> impl Iterator<Item = walkdir::DirEntry> {
    walkdir::WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| {
            entry
                .map_err(|e| warn!("skipping unreadable entry: {e}"))
                .ok()
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let is_cnf = entry.path().extension().is_some_and(|ext| ext == "cnf");
            if !is_cnf {
                debug!("skipping non-CNF file: {}", entry.path().display());
            }
            is_cnf
        })
}

/// Allocated and resident memory in MiB, if jemalloc reports them.
fn memory_usage() -> Option<(f64, f64)> {
    const MIB: f64 = 1024.0 * 1024.0;

    epoch::advance().ok()?;
    let allocated = stats::allocated::read().ok()?;
    let resident = stats::resident::read().ok()?;

    Some((allocated as f64 / MIB, resident as f64 / MIB))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(parse_time: Duration, elapsed: Duration, cnf: &Cnf, s: &SolutionStats) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", cnf.num_vars());
    stat_line("Clauses", cnf.len());
    stat_line("Literals", cnf.num_literals());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
    stat_line("Max depth", s.max_depth);
    if let Some((allocated, resident)) = memory_usage() {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
