//! Partial truth assignments over variables.

use crate::sat::literal::{Literal, Variable};
use core::ops::Index;

/// The state of one variable.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    /// No value yet.
    #[default]
    Unassigned,
    /// Set to the given value.
    Assigned(bool),
}

impl VarState {
    /// Has a value.
    pub const fn is_assigned(&self) -> bool {
        matches!(self, VarState::Assigned(_))
    }

    /// Has no value.
    pub const fn is_unassigned(&self) -> bool {
        !self.is_assigned()
    }

    /// Assigned `true`.
    pub const fn is_true(&self) -> bool {
        matches!(self, VarState::Assigned(true))
    }

    /// Assigned `false`.
    pub const fn is_false(&self) -> bool {
        matches!(self, VarState::Assigned(false))
    }
}

/// A partial assignment, indexed by variable. Index 0 is unused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(Vec<VarState>);

impl Index<Variable> for Assignment {
    type Output = VarState;

    /// Variables beyond the end of the table read as unassigned.
    fn index(&self, index: Variable) -> &Self::Output {
        const UNASSIGNED: VarState = VarState::Unassigned;
        self.0.get(index as usize).unwrap_or(&UNASSIGNED)
    }
}

impl Assignment {
    /// An assignment over variables `1..=num_vars` with nothing set.
    pub fn new(num_vars: usize) -> Self {
        Self(vec![VarState::Unassigned; num_vars + 1])
    }

    /// Makes `lit` true, growing the table if needed.
    pub fn assign(&mut self, lit: Literal) {
        let idx = lit.variable() as usize;
        if idx >= self.0.len() {
            self.0.resize(idx + 1, VarState::Unassigned);
        }
        self.0[idx] = VarState::Assigned(lit.polarity());
    }

    /// The value of `var`, if it has one.
    pub fn var_value(&self, var: Variable) -> Option<bool> {
        match self[var] {
            VarState::Assigned(b) => Some(b),
            VarState::Unassigned => None,
        }
    }

    /// `Some(true)` if `lit` holds, `Some(false)` if its negation holds.
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.var_value(lit.variable())
            .map(|b| b == lit.polarity())
    }

    /// Number of variables with a value.
    pub fn num_assigned(&self) -> usize {
        self.0.iter().filter(|s| s.is_assigned()).count()
    }
}

impl FromIterator<Literal> for Assignment {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        let mut assignment = Self::default();
        for lit in iter {
            assignment.assign(lit);
        }
        assignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(i: i32) -> Literal {
        Literal::try_from(i).unwrap()
    }

    #[test]
    fn test_literal_value() {
        let assignment: Assignment = [lit(1), lit(-3)].into_iter().collect();

        assert_eq!(assignment.literal_value(lit(1)), Some(true));
        assert_eq!(assignment.literal_value(lit(-1)), Some(false));
        assert_eq!(assignment.literal_value(lit(3)), Some(false));
        assert_eq!(assignment.literal_value(lit(-3)), Some(true));
        assert_eq!(assignment.literal_value(lit(2)), None);
        assert_eq!(assignment.literal_value(lit(100)), None);
    }

    #[test]
    fn test_num_assigned() {
        let mut assignment = Assignment::new(4);
        assert_eq!(assignment.num_assigned(), 0);
        assignment.assign(lit(2));
        assignment.assign(lit(-4));
        assert_eq!(assignment.num_assigned(), 2);
        assert!(assignment[1].is_unassigned());
        assert!(assignment[2].is_true());
        assert!(assignment[4].is_false());
    }
}
