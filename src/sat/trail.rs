#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The search trail.

use crate::sat::assignment::Assignment;
use crate::sat::literal::Literal;
use bit_vec::BitVec;
use itertools::Itertools;
use std::fmt;

/// Literals made true along the current search path, in the order they were
/// decided or forced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Trail(Vec<Literal>);

impl Trail {
    /// An empty trail.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of literals on the trail.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Nothing decided or forced yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a decided or forced literal.
    pub fn push(&mut self, lit: Literal) {
        self.0.push(lit);
    }

    /// Drops every literal pushed after the trail had length `mark`.
    pub fn backtrack_to(&mut self, mark: usize) {
        self.0.truncate(mark);
    }

    /// The literals in trail order.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.0.iter()
    }

    /// The literals in trail order, as a slice.
    pub fn as_slice(&self) -> &[Literal] {
        &self.0
    }

    /// The literals ordered by ascending variable; ties keep trail order.
    #[must_use]
    pub fn sorted_by_variable(&self) -> Vec<Literal> {
        self.0.iter().copied().sorted_by_key(|l| l.variable()).collect()
    }

    /// The partial assignment the trail describes.
    #[must_use]
    pub fn to_assignment(&self) -> Assignment {
        self.0.iter().copied().collect()
    }

    /// Completes the trail to a total model over `num_vars` variables.
    /// Variables the trail leaves open are set false.
    #[must_use]
    pub fn to_model(&self, num_vars: usize) -> BitVec {
        let mut model = BitVec::from_elem(num_vars + 1, false);
        for lit in &self.0 {
            let idx = lit.variable() as usize;
            if idx < model.len() {
                model.set(idx, lit.polarity());
            }
        }
        model
    }
}

impl Extend<Literal> for Trail {
    fn extend<T: IntoIterator<Item = Literal>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl From<Vec<Literal>> for Trail {
    fn from(lits: Vec<Literal>) -> Self {
        Self(lits)
    }
}

impl IntoIterator for Trail {
    type Item = Literal;
    type IntoIter = std::vec::IntoIter<Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Trail {
    /// Writes the assignment sorted by variable, e.g. `[1, -2, 3]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.sorted_by_variable().iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail(lits: &[i32]) -> Trail {
        lits.iter()
            .map(|&l| Literal::try_from(l).unwrap())
            .collect_vec()
            .into()
    }

    #[test]
    fn test_backtrack_to() {
        let mut t = trail(&[1, -2]);
        let mark = t.len();
        t.push(Literal::new(3, true));
        t.extend([Literal::new(4, false)]);
        assert_eq!(t.len(), 4);
        t.backtrack_to(mark);
        assert_eq!(t, trail(&[1, -2]));
    }

    #[test]
    fn test_display_sorted_by_variable() {
        assert_eq!(trail(&[3, -1, -2]).to_string(), "[-1, -2, 3]");
        assert_eq!(Trail::new().to_string(), "[]");
    }

    #[test]
    fn test_to_model() {
        let model = trail(&[2, -1]).to_model(3);
        assert_eq!(model.len(), 4);
        assert_eq!(model.get(1), Some(false));
        assert_eq!(model.get(2), Some(true));
        assert_eq!(model.get(3), Some(false));
    }

    #[test]
    fn test_to_assignment() {
        let assignment = trail(&[2, -1]).to_assignment();
        assert_eq!(assignment.var_value(1), Some(false));
        assert_eq!(assignment.var_value(2), Some(true));
        assert_eq!(assignment.var_value(3), None);
    }
}
