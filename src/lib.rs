#![warn(missing_docs)]
//! A baseline DPLL SAT solver: unit propagation, Jeroslow-Wang branching and
//! recursive backtracking over immutable formula values.
//!
//! ```
//! use dpll_sat::sat::dimacs::parse_str;
//! use dpll_sat::sat::dpll::Dpll;
//! use dpll_sat::sat::solver::{Outcome, Solver};
//!
//! let cnf = parse_str("1 2 0\n-1 2 0\n-1 -2 0\n").unwrap();
//! let mut solver: Dpll = Solver::new(cnf.clone());
//! match solver.solve() {
//!     Outcome::Satisfied(trail) => assert!(cnf.verify(&trail)),
//!     Outcome::Unsatisfied => unreachable!(),
//! }
//! ```

/// The `sat` module holds the formula model, propagation, branching
/// heuristics, the DPLL search and the DIMACS reader.
pub mod sat;
