//! # dpll-sat
//!
//! `dpll-sat` decides satisfiability of CNF formulas in DIMACS format with a
//! recursive DPLL search and Jeroslow-Wang branching.
//!
//! ## Usage
//!
//! ```sh
//! dpll-sat problem.cnf                      # solve one file
//! dpll-sat benchmarks/                      # benchmark a directory
//! dpll-sat file --path problem.cnf --stats
//! dpll-sat text --input "1 -2 0\n2 3 0"
//! dpll-sat bench --dir benchmarks --log results.log
//! dpll-sat completions bash
//! ```
//!
//! A satisfiable input prints `SAT` followed by the assignment sorted by
//! variable, e.g. `[-1, 2, 3]`; an unsatisfiable one prints `UNSAT`.
//! Set `RUST_LOG=debug` (or `trace`) to follow the search.

use crate::command_line::cli::{
    Cli, Commands, DEFAULT_BENCH_LOG, solve_dir, solve_file, solve_text,
};
use clap::{CommandFactory, Parser};
use std::path::Path;

mod command_line;

/// Global allocator using `tikv-jemallocator` for potentially better performance
/// and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),
        Some(Commands::Text { input, common }) => solve_text(&input, &common),
        Some(Commands::Bench { dir, log, common }) => solve_dir(&dir, &log, &common),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => match cli.path {
            Some(path) if path.is_dir() => {
                solve_dir(&path, Path::new(DEFAULT_BENCH_LOG), &cli.common)
            }
            Some(path) => solve_file(&path, &cli.common),
            None => Err("No input provided. Use --help for more information.".to_string()),
        },
    }
}
