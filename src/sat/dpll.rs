//! Defines the DPLL (Davis-Putnam-Logemann-Loveland) SAT solver.
//!
//! The search works on formula values. Each call:
//! 1.  **Propagates** unit clauses to a fixpoint with [`saturate`]. A conflict
//!     fails the branch; an empty formula is a solution.
//! 2.  **Decides** on a literal chosen by the configured
//!     [`VariableSelection`], and recurses on the formula produced by setting
//!     it true.
//! 3.  **Backtracks** when that fails, recursing on the formula produced by
//!     setting it false. The parent formula was never modified, so no undo
//!     is needed beyond trimming the trail.
//!
//! Every decision consumes a variable that still occurs in the formula, so
//! the recursion is at most as deep as the formula has variables.

use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use crate::sat::propagation::{Saturated, propagate_one, saturate};
use crate::sat::solver::{Outcome, SolutionStats, Solver};
use crate::sat::trail::Trail;
use crate::sat::variable_selection::{JeroslowWangTwoSided, VariableSelection};
use log::{debug, trace};

/// A recursive DPLL solver, generic over its branching heuristic.
#[derive(Debug, Clone)]
pub struct Dpll<S: VariableSelection = JeroslowWangTwoSided> {
    /// The formula as given. `solve` works on copies.
    pub cnf: Cnf,
    /// Picks the branching literal at each decision.
    pub selector: S,
    stats: SolutionStats,
}

impl<S: VariableSelection + Default> Solver for Dpll<S> {
    fn new(cnf: Cnf) -> Self {
        Self::with_selector(cnf, S::default())
    }

    /// Runs the search from scratch. Calling it twice yields the same
    /// outcome and the same statistics.
    fn solve(&mut self) -> Outcome {
        self.stats = SolutionStats::default();
        let mut trail = Trail::new();

        let found = self.search(self.cnf.clone(), &mut trail, 0);

        debug!(
            "search finished: sat={found} decisions={} propagations={} conflicts={} depth={}",
            self.stats.decisions,
            self.stats.propagations,
            self.stats.conflicts,
            self.stats.max_depth
        );

        if found {
            Outcome::Satisfied(trail)
        } else {
            Outcome::Unsatisfied
        }
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

impl<S: VariableSelection> Dpll<S> {
    /// A solver for `cnf` that branches with `selector`.
    pub fn with_selector(cnf: Cnf, selector: S) -> Self {
        Self {
            cnf,
            selector,
            stats: SolutionStats::default(),
        }
    }

    /// Searches below `cnf`, extending `trail`. On success the trail holds
    /// the satisfying path; on failure it is left as it was on entry.
    fn search(&mut self, cnf: Cnf, trail: &mut Trail, depth: usize) -> bool {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let Ok(Saturated { cnf, forced }) = saturate(cnf) else {
            self.stats.conflicts += 1;
            trace!("conflict during propagation at depth {depth}");
            return false;
        };

        let entry = trail.len();
        self.stats.propagations += forced.len();
        trail.extend(forced);

        if cnf.is_empty() {
            return true;
        }

        let Some(decision) = self.selector.pick(&cnf) else {
            unreachable!("branching on a formula without literals");
        };
        self.stats.decisions += 1;

        for lit in [decision, decision.negated()] {
            if self.branch(&cnf, lit, trail, depth) {
                return true;
            }
        }

        trail.backtrack_to(entry);
        false
    }

    fn branch(&mut self, cnf: &Cnf, lit: Literal, trail: &mut Trail, depth: usize) -> bool {
        trace!("depth {depth}: trying {lit}");

        let Ok(child) = propagate_one(cnf, lit) else {
            self.stats.conflicts += 1;
            return false;
        };

        let mark = trail.len();
        trail.push(lit);
        if self.search(child, trail, depth + 1) {
            return true;
        }
        trail.backtrack_to(mark);
        false
    }
}
