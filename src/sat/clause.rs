//! Clauses: ordered disjunctions of literals.

use crate::sat::assignment::Assignment;
use crate::sat::literal::{Literal, LiteralError};
use core::ops::Index;
use smallvec::SmallVec;

/// Literal storage for a clause; most clauses fit inline.
pub type LiteralStorage = SmallVec<[Literal; 8]>;

/// A disjunction of literals, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause {
    literals: LiteralStorage,
}

impl Clause {
    /// Builds a clause keeping the literals in the given order.
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: literals.into_iter().collect(),
        }
    }

    /// Number of literals.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// The empty clause, which no assignment satisfies.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Exactly one literal left.
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// Whether `lit` occurs in the clause.
    pub fn contains(&self, lit: Literal) -> bool {
        self.literals.contains(&lit)
    }

    /// The literals in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// A copy of this clause with every occurrence of `lit` removed.
    #[must_use]
    pub fn without(&self, lit: Literal) -> Self {
        Self {
            literals: self.literals.iter().copied().filter(|&l| l != lit).collect(),
        }
    }

    /// Some literal is true under `assignment`.
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.iter()
            .any(|&lit| assignment.literal_value(lit) == Some(true))
    }

    /// Every literal is false under `assignment`. Holds for the empty clause.
    pub fn is_contradicted(&self, assignment: &Assignment) -> bool {
        self.iter()
            .all(|&lit| assignment.literal_value(lit) == Some(false))
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl AsRef<[Literal]> for Clause {
    fn as_ref(&self) -> &[Literal] {
        &self.literals
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl TryFrom<Vec<i32>> for Clause {
    type Error = LiteralError;

    fn try_from(literals: Vec<i32>) -> Result<Self, Self::Error> {
        Self::try_from(literals.as_slice())
    }
}

impl TryFrom<&[i32]> for Clause {
    type Error = LiteralError;

    fn try_from(literals: &[i32]) -> Result<Self, Self::Error> {
        literals.iter().map(|&l| Literal::try_from(l)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(lits: &[i32]) -> Clause {
        Clause::try_from(lits).unwrap()
    }

    fn lit(i: i32) -> Literal {
        Literal::try_from(i).unwrap()
    }

    #[test]
    fn test_new() {
        let clause = clause(&[1, 2, 3]);
        assert_eq!(clause.len(), 3);
        assert!(!clause.is_unit());
        assert_eq!(clause[2], lit(3));
    }

    #[test]
    fn test_iter_keeps_order() {
        let clause = clause(&[3, -1, 2]);
        let lits: Vec<i32> = clause.iter().map(|l| l.to_i32()).collect();
        assert_eq!(lits, vec![3, -1, 2]);
    }

    #[test]
    fn test_without() {
        let original = clause(&[1, -2, 3]);
        let reduced = original.without(lit(-2));
        assert_eq!(reduced, clause(&[1, 3]));
        assert_eq!(original.len(), 3);
        assert!(reduced.without(lit(1)).without(lit(3)).is_empty());
    }

    #[test]
    fn test_contains() {
        let clause = clause(&[1, -2]);
        assert!(clause.contains(lit(-2)));
        assert!(!clause.contains(lit(2)));
    }

    #[test]
    fn test_zero_literal_rejected() {
        assert_eq!(Clause::try_from(vec![1, 0]), Err(LiteralError::Zero));
    }

    #[test]
    fn test_satisfied_and_contradicted() {
        let c = clause(&[1, -2]);

        let assignment: Assignment = [lit(2)].into_iter().collect();
        assert!(!c.is_satisfied(&assignment));
        assert!(!c.is_contradicted(&assignment));

        let assignment: Assignment = [lit(-1), lit(2)].into_iter().collect();
        assert!(c.is_contradicted(&assignment));

        let assignment: Assignment = [lit(-2)].into_iter().collect();
        assert!(c.is_satisfied(&assignment));

        assert!(Clause::default().is_contradicted(&Assignment::default()));
    }
}
