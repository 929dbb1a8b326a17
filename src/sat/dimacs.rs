#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the DIMACS CNF (Conjunctive Normal Form) file format.
//!
//! The format typically includes:
//! - Comment lines starting with 'c'.
//! - A problem line 'p cnf <`num_variables`> <`num_clauses`>'. Its counts are
//!   logged but not enforced; the formula is built from the clauses found.
//! - Clause lines: whitespace-separated non-zero integers terminated by a
//!   single '0'. A line holding only '0' is the empty clause.
//! - An optional '%' line marking end-of-data (used by some benchmark sets).
//!
//! Unlike many readers, a clause line without its terminating '0' is rejected
//! rather than silently accepted.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, LiteralError};
use log::debug;
use std::fmt;
use std::io::{self, BufRead};
use std::path::Path;

/// Reasons a DIMACS input cannot be turned into a formula.
#[derive(Debug)]
pub enum ParseError {
    /// The input could not be read.
    Io(io::Error),
    /// A clause line does not end in `0`.
    MissingTerminator {
        /// 1-based line number.
        line: usize,
    },
    /// A token on a clause line is not an integer.
    InvalidLiteral {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// A `0` appears before the end of a clause line.
    ZeroLiteral {
        /// 1-based line number.
        line: usize,
    },
    /// A literal whose negation does not fit in an `i32`.
    LiteralOutOfRange {
        /// 1-based line number.
        line: usize,
        /// The rejected value.
        value: i32,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read input: {e}"),
            Self::MissingTerminator { line } => {
                write!(f, "line {line}: clause is not terminated by 0")
            }
            Self::InvalidLiteral { line, token } => {
                write!(f, "line {line}: '{token}' is not a literal")
            }
            Self::ZeroLiteral { line } => {
                write!(f, "line {line}: 0 may only terminate a clause")
            }
            Self::LiteralOutOfRange { line, value } => {
                write!(f, "line {line}: literal {value} is out of range")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Parses one clause line. `line` is 1-based and only used for errors.
fn parse_clause(text: &str, line: usize) -> Result<Clause, ParseError> {
    let values = text
        .split_whitespace()
        .map(|token| {
            token.parse::<i32>().map_err(|_| ParseError::InvalidLiteral {
                line,
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let Some((&0, literals)) = values.split_last() else {
        return Err(ParseError::MissingTerminator { line });
    };

    literals
        .iter()
        .map(|&l| {
            Literal::try_from(l).map_err(|e| match e {
                LiteralError::Zero => ParseError::ZeroLiteral { line },
                LiteralError::OutOfRange(value) => ParseError::LiteralOutOfRange { line, value },
            })
        })
        .collect()
}

/// Parses DIMACS formatted data from a `BufRead` source into a `Cnf`.
///
/// # Errors
///
/// [`ParseError::Io`] if reading fails, otherwise the first malformed clause
/// line.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf, ParseError> {
    let mut clauses = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim_start();

        match trimmed.chars().next() {
            None | Some('c') => {}
            Some('p') => debug!("problem line: {}", trimmed.trim_end()),
            Some('%') => break,
            Some(_) => clauses.push(parse_clause(trimmed, idx + 1)?),
        }
    }

    let cnf = Cnf::new(clauses);
    debug!(
        "parsed {} clauses over {} variables",
        cnf.len(),
        cnf.num_vars()
    );
    Ok(cnf)
}

/// Parses a DIMACS string, e.g. `"1 -2 0\n2 3 0"`.
///
/// # Errors
///
/// See [`parse_dimacs`].
pub fn parse_str(input: &str) -> Result<Cnf, ParseError> {
    parse_dimacs(input.as_bytes())
}

/// Parses a DIMACS CNF file specified by its path.
///
/// # Errors
///
/// [`ParseError::Io`] if the file cannot be opened or read, otherwise see
/// [`parse_dimacs`].
pub fn parse_file(file_path: impl AsRef<Path>) -> Result<Cnf, ParseError> {
    let file = std::fs::File::open(file_path)?;
    parse_dimacs(io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use std::io::Cursor;

    fn lits(cnf: &Cnf) -> Vec<Vec<i32>> {
        cnf.iter()
            .map(|c| c.iter().map(|l| l.to_i32()).collect_vec())
            .collect_vec()
    }

    #[test]
    fn test_parse_simple_dimacs() {
        let dimacs_content = "c This is a comment\n\
                              p cnf 3 2\n\
                              1 -2 0\n\
                              2 3 0\n";
        let cnf = parse_dimacs(Cursor::new(dimacs_content)).unwrap();

        assert_eq!(cnf.len(), 2, "Should parse 2 clauses");
        assert_eq!(cnf.num_vars(), 3);
        assert_eq!(lits(&cnf), vec![vec![1, -2], vec![2, 3]]);
    }

    #[test]
    fn test_parse_dimacs_with_empty_lines_and_end_marker() {
        let dimacs_content = "p cnf 2 2\n\
                              \n\
                              1 0\n\
                              \n\
                              -2 0\n\
                              %\n\
                              0\n";
        let cnf = parse_str(dimacs_content).unwrap();
        assert_eq!(lits(&cnf), vec![vec![1], vec![-2]]);
    }

    #[test]
    fn test_parse_dimacs_keeps_literal_order() {
        let cnf = parse_str("  3   -1 2 0\n").unwrap();
        assert_eq!(lits(&cnf), vec![vec![3, -1, 2]]);
    }

    #[test]
    fn test_parse_dimacs_empty_clause() {
        let cnf = parse_str("p cnf 1 1\n0\n").unwrap();
        assert_eq!(cnf.len(), 1);
        assert!(cnf.has_empty_clause());
    }

    #[test]
    fn test_parse_dimacs_no_clauses() {
        let cnf = parse_str("p cnf 0 0\n").unwrap();
        assert!(cnf.is_empty());
        assert_eq!(cnf.num_vars(), 0);
        assert!(parse_str("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_dimacs_missing_terminator() {
        let err = parse_str("1 2 0\n-1 2\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingTerminator { line: 2 }));
        assert_eq!(err.to_string(), "line 2: clause is not terminated by 0");
    }

    #[test]
    fn test_parse_dimacs_malformed_literal() {
        let err = parse_str("1 abc 0\n").unwrap_err();
        match err {
            ParseError::InvalidLiteral { line, token } => {
                assert_eq!(line, 1);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_parse_dimacs_inner_zero() {
        let err = parse_str("c\n1 0 2 0\n").unwrap_err();
        assert!(matches!(err, ParseError::ZeroLiteral { line: 2 }));
    }

    #[test]
    fn test_parse_dimacs_rejects_unnegatable_literal() {
        let err = parse_str("1 0\n-2147483648 1 0\n-1 0\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::LiteralOutOfRange {
                line: 2,
                value: i32::MIN
            }
        ));
        assert_eq!(err.to_string(), "line 2: literal -2147483648 is out of range");

        let cnf = parse_str("2147483647 0\n-2147483647 1 0\n").unwrap();
        assert_eq!(cnf.num_vars(), 2_147_483_647);
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file("/definitely/not/here.cnf").unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }

    #[test]
    fn test_display_round_trip() {
        let cnf = parse_str("1 -2 0\n3 0\n").unwrap();
        assert_eq!(parse_str(&cnf.to_string()).unwrap(), cnf);
    }
}
