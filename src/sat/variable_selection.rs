#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Branching heuristics.
//!
//! Both selectors implement Jeroslow-Wang scoring: every occurrence of a
//! literal in a clause of length `n` contributes `2^-n`, so literals from
//! short clauses, which are closest to becoming unit or empty, dominate.
//!
//! Scores are accumulated in first-seen order and the first maximum wins, so
//! the branching sequence for a given formula never changes between runs.

use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Chooses the next decision on a formula that still has clauses.
pub trait VariableSelection {
    /// The literal to branch on first; its negation is tried second.
    /// `None` only when `cnf` has no literals at all.
    fn pick(&self, cnf: &Cnf) -> Option<Literal>;
}

/// Weight table keyed by `K`, remembering insertion order.
#[derive(Debug, Clone)]
struct Weights<K> {
    index: FxHashMap<K, usize>,
    entries: Vec<(K, OrderedFloat<f64>)>,
}

impl<K: Copy + Eq + Hash> Weights<K> {
    fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            entries: Vec::new(),
        }
    }

    fn add(&mut self, key: K, weight: f64) {
        let entries = &mut self.entries;
        let slot = *self.index.entry(key).or_insert_with(|| {
            entries.push((key, OrderedFloat(0.0)));
            entries.len() - 1
        });
        let total = &mut self.entries[slot].1;
        *total = OrderedFloat(total.0 + weight);
    }

    /// The first key in insertion order holding the largest weight.
    fn max(&self) -> Option<K> {
        // `max_by_key` keeps the last maximum it sees, so walk backwards.
        self.entries
            .iter()
            .rev()
            .max_by_key(|(_, w)| *w)
            .map(|(k, _)| *k)
    }
}

/// `2^-len`.
fn clause_weight(len: usize) -> f64 {
    0.5_f64.powi(i32::try_from(len).unwrap_or(i32::MAX))
}

fn weigh<K: Copy + Eq + Hash>(cnf: &Cnf, key: impl Fn(Literal) -> K) -> Weights<K> {
    let mut weights = Weights::new();
    for clause in cnf.iter() {
        let w = clause_weight(clause.len());
        for &lit in clause.iter() {
            weights.add(key(lit), w);
        }
    }
    weights
}

/// Two-sided Jeroslow-Wang: the variable whose occurrences, in either
/// polarity, carry the most weight.
pub fn select_variable(cnf: &Cnf) -> Option<Variable> {
    weigh(cnf, Literal::variable).max()
}

/// Two-sided Jeroslow-Wang. Scores variables and tries the positive literal
/// first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JeroslowWangTwoSided;

impl VariableSelection for JeroslowWangTwoSided {
    fn pick(&self, cnf: &Cnf) -> Option<Literal> {
        select_variable(cnf).map(|var| Literal::new(var, true))
    }
}

/// One-sided Jeroslow-Wang. Scores literals separately and tries the best
/// scoring literal first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JeroslowWangOneSided;

impl VariableSelection for JeroslowWangOneSided {
    fn pick(&self, cnf: &Cnf) -> Option<Literal> {
        weigh(cnf, |lit| lit).max()
    }
}
