#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Formulas in conjunctive normal form.
//!
//! A [`Cnf`] is a value: once built it is never changed. Unit propagation
//! (see [`crate::sat::propagation`]) produces new formulas from old ones, so
//! the search can go back to a parent formula after a failed branch simply by
//! still holding it.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::literal::{Literal, LiteralError};
use crate::sat::trail::Trail;
use bit_vec::BitVec;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt;

/// A conjunction of clauses, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    clauses: Vec<Clause>,
    /// Largest variable index appearing in any clause.
    num_vars: usize,
}

impl Cnf {
    /// Builds a formula from `clauses`, keeping their order.
    pub fn new(clauses: impl IntoIterator<Item = Clause>) -> Self {
        let clauses = clauses.into_iter().collect_vec();
        let num_vars = clauses
            .iter()
            .flat_map(|c| c.iter())
            .map(|lit| lit.variable() as usize)
            .max()
            .unwrap_or(0);

        Self { clauses, num_vars }
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// No clauses left: the formula is trivially true.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The largest variable index, or 0 for a formula without literals.
    pub const fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// The clauses in order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Iterates over the clauses in order.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Total number of literal occurrences.
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    /// The literal of the first unit clause in scan order.
    pub fn first_unit(&self) -> Option<Literal> {
        self.clauses.iter().find(|c| c.is_unit()).map(|c| c[0])
    }

    /// Some clause has no literals, so the formula cannot be satisfied.
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// Every clause is satisfied under `assignment`.
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|c| c.is_satisfied(assignment))
    }

    /// Some clause has all of its literals false under `assignment`.
    pub fn is_contradicted(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().any(|c| c.is_contradicted(assignment))
    }

    /// Checks that every clause shares at least one literal with `trail`.
    pub fn verify(&self, trail: &Trail) -> bool {
        let lits: FxHashSet<Literal> = trail.iter().copied().collect();
        self.clauses
            .iter()
            .all(|c| c.iter().any(|lit| lits.contains(lit)))
    }

    /// Evaluates the formula under a total model, where bit `v` holds the
    /// value of variable `v`. Missing bits read as false.
    pub fn evaluate(&self, model: &BitVec) -> bool {
        self.clauses.iter().all(|c| {
            c.iter().any(|lit| {
                model.get(lit.variable() as usize).unwrap_or(false) == lit.polarity()
            })
        })
    }
}

impl FromIterator<Clause> for Cnf {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl TryFrom<Vec<Vec<i32>>> for Cnf {
    type Error = LiteralError;

    fn try_from(clauses: Vec<Vec<i32>>) -> Result<Self, Self::Error> {
        clauses.into_iter().map(Clause::try_from).collect()
    }
}

impl fmt::Display for Cnf {
    /// Writes the formula in DIMACS format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            for lit in clause.iter() {
                write!(f, "{lit} ")?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}
