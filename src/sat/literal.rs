#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Signed integer literals.
//!
//! A literal is a non-zero `i32` in DIMACS convention: the magnitude names
//! the variable and the sign its polarity. `3` asserts variable 3 true,
//! `-3` asserts it false.

use core::ops::{Neg, Not};
use std::fmt;

/// A propositional variable, numbered from 1.
pub type Variable = u32;

/// Returned when a zero is used where a literal is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralError {
    /// `0` terminates DIMACS clauses and never names a variable.
    Zero,
    /// `i32::MIN` has no negation in `i32`.
    OutOfRange(i32),
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => write!(f, "0 is not a literal"),
            Self::OutOfRange(value) => write!(f, "literal {value} is out of range"),
        }
    }
}

impl std::error::Error for LiteralError {}

/// A variable together with a polarity, stored as a signed integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(i32);

impl Literal {
    /// Creates the literal for `var` with the given polarity.
    ///
    /// # Panics
    ///
    /// If `var` is 0 or does not fit in an `i32`.
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        assert!(var != 0, "variable 0 does not exist");
        let var = i32::try_from(var).expect("literal variable overflowed");

        if polarity { Self(var) } else { Self(-var) }
    }

    /// The variable this literal talks about.
    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.unsigned_abs()
    }

    /// `true` for a positive literal.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0.is_positive()
    }

    /// The same variable with the opposite polarity.
    #[must_use]
    pub const fn negated(self) -> Self {
        Self(-self.0)
    }

    /// The DIMACS integer for this literal.
    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Literal {
    type Error = LiteralError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Err(LiteralError::Zero),
            i32::MIN => Err(LiteralError::OutOfRange(value)),
            _ => Ok(Self(value)),
        }
    }
}

impl From<Literal> for i32 {
    fn from(literal: Literal) -> Self {
        literal.0
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
