//! The solver interface and its results.

use crate::sat::cnf::Cnf;
use crate::sat::trail::Trail;

/// Result of a complete search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The formula is satisfiable. The trail lists every literal set true
    /// on the successful path and may be empty for a formula with no
    /// clauses.
    Satisfied(Trail),
    /// Every branch ended in a conflict.
    Unsatisfied,
}

impl Outcome {
    /// The formula was found satisfiable.
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Satisfied(_))
    }

    /// The satisfying trail, if any.
    pub const fn trail(&self) -> Option<&Trail> {
        match self {
            Self::Satisfied(trail) => Some(trail),
            Self::Unsatisfied => None,
        }
    }

    /// Consumes the outcome, returning the satisfying trail, if any.
    pub fn into_trail(self) -> Option<Trail> {
        match self {
            Self::Satisfied(trail) => Some(trail),
            Self::Unsatisfied => None,
        }
    }

    /// `SAT` or `UNSAT`.
    pub const fn verdict(&self) -> &'static str {
        match self {
            Self::Satisfied(_) => "SAT",
            Self::Unsatisfied => "UNSAT",
        }
    }
}

/// Counters collected during one `solve` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// Branching variables chosen.
    pub decisions: usize,
    /// Literals forced by unit propagation.
    pub propagations: usize,
    /// Branches that ended in an empty clause.
    pub conflicts: usize,
    /// Deepest recursion level reached. The root call is depth 0.
    pub max_depth: usize,
}

/// A complete decision procedure for CNF satisfiability.
pub trait Solver {
    /// Creates a solver for `cnf`.
    fn new(cnf: Cnf) -> Self;

    /// Decides the formula. The trail of a satisfied outcome satisfies every
    /// clause.
    fn solve(&mut self) -> Outcome;

    /// Counters from the most recent `solve` call.
    fn stats(&self) -> SolutionStats;
}
