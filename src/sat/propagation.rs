#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Boolean constraint propagation over formula values.
//!
//! Setting a literal true removes the clauses it satisfies and strikes its
//! negation from the rest. Neither function touches its input: each returns a
//! fresh [`Cnf`], which is what lets the search retry the other polarity
//! against the untouched parent formula.

use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use std::fmt;

/// Some clause lost its last literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict;

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conflict: a clause became empty")
    }
}

/// A formula with no unit clauses left, plus what it took to get there.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Saturated {
    /// The reduced formula. Empty means every clause was satisfied.
    pub cnf: Cnf,
    /// Literals forced true, in the order they were propagated.
    pub forced: Vec<Literal>,
}

/// Sets `lit` true in `cnf`.
///
/// # Errors
///
/// [`Conflict`] as soon as a clause is emptied; the remaining clauses are
/// not scanned.
pub fn propagate_one(cnf: &Cnf, lit: Literal) -> Result<Cnf, Conflict> {
    let neg = lit.negated();
    let mut clauses = Vec::with_capacity(cnf.len());

    for clause in cnf.iter() {
        if clause.contains(lit) {
            continue;
        }
        if clause.contains(neg) {
            let reduced = clause.without(neg);
            if reduced.is_empty() {
                return Err(Conflict);
            }
            clauses.push(reduced);
        } else {
            clauses.push(clause.clone());
        }
    }

    Ok(Cnf::new(clauses))
}

/// Propagates unit clauses until none are left.
///
/// Units are taken one at a time, always the first unit clause of the
/// current formula.
///
/// # Errors
///
/// [`Conflict`] if `cnf` already holds an empty clause or propagation
/// empties one.
pub fn saturate(cnf: Cnf) -> Result<Saturated, Conflict> {
    if cnf.has_empty_clause() {
        return Err(Conflict);
    }

    let mut cnf = cnf;
    let mut forced = Vec::new();

    while let Some(unit) = cnf.first_unit() {
        cnf = propagate_one(&cnf, unit)?;
        forced.push(unit);
        if cnf.is_empty() {
            break;
        }
    }

    Ok(Saturated { cnf, forced })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::clause::Clause;
    use itertools::Itertools;

    fn cnf(clauses: &[&[i32]]) -> Cnf {
        Cnf::try_from(clauses.iter().map(|c| c.to_vec()).collect_vec()).unwrap()
    }

    fn lit(i: i32) -> Literal {
        Literal::try_from(i).unwrap()
    }

    fn lits(ls: &[i32]) -> Vec<Literal> {
        ls.iter().map(|&l| lit(l)).collect()
    }

    #[test]
    fn test_propagate_removes_satisfied_and_strikes_negation() {
        let f = cnf(&[&[1, 2], &[-1, 3], &[2, 3]]);
        let reduced = propagate_one(&f, lit(1)).unwrap();
        assert_eq!(reduced, cnf(&[&[3], &[2, 3]]));
    }

    #[test]
    fn test_propagate_leaves_input_untouched() {
        let f = cnf(&[&[1, 2], &[-1, 3]]);
        let before = f.clone();
        let _ = propagate_one(&f, lit(-1)).unwrap();
        assert_eq!(f, before);
    }

    #[test]
    fn test_propagate_conflict() {
        let f = cnf(&[&[1, 2], &[-1]]);
        assert_eq!(propagate_one(&f, lit(1)), Err(Conflict));
    }

    #[test]
    fn test_propagate_to_empty_formula() {
        let f = cnf(&[&[1, 2], &[1]]);
        let reduced = propagate_one(&f, lit(1)).unwrap();
        assert!(reduced.is_empty());
    }

    #[test]
    fn test_saturate_chain() {
        let f = cnf(&[&[1], &[-1, 2], &[-2, 3, 4]]);
        let Saturated { cnf: reduced, forced } = saturate(f).unwrap();
        assert_eq!(forced, lits(&[1, 2]));
        assert_eq!(reduced, cnf(&[&[3, 4]]));
    }

    #[test]
    fn test_saturate_takes_units_in_scan_order() {
        let f = cnf(&[&[5, 6], &[-3], &[2], &[3, 5, 7]]);
        let sat = saturate(f).unwrap();
        assert_eq!(sat.forced, lits(&[-3, 2]));
        assert_eq!(sat.cnf, cnf(&[&[5, 6], &[5, 7]]));
    }

    #[test]
    fn test_saturate_conflict() {
        assert_eq!(saturate(cnf(&[&[1], &[-1]])), Err(Conflict));
        assert_eq!(saturate(cnf(&[&[1], &[-1, 2], &[-2]])), Err(Conflict));
    }

    #[test]
    fn test_saturate_empty_clause_is_conflict() {
        let f = Cnf::new(vec![Clause::default()]);
        assert_eq!(saturate(f), Err(Conflict));
    }

    #[test]
    fn test_saturate_satisfies_everything() {
        let sat = saturate(cnf(&[&[1], &[1, 2], &[-2]])).unwrap();
        assert!(sat.cnf.is_empty());
        assert_eq!(sat.forced, lits(&[1, -2]));
    }

    #[test]
    fn test_saturate_empty_formula() {
        let sat = saturate(Cnf::default()).unwrap();
        assert!(sat.cnf.is_empty());
        assert!(sat.forced.is_empty());
    }

    #[test]
    fn test_saturate_is_idempotent() {
        let f = cnf(&[&[1], &[-1, 2, 3], &[-2, 4], &[4, 5], &[-5, -3]]);
        let once = saturate(f).unwrap();
        let twice = saturate(once.cnf.clone()).unwrap();
        assert!(twice.forced.is_empty());
        assert_eq!(twice.cnf, once.cnf);
    }

    #[test]
    fn test_saturate_is_idempotent_on_random_formulas() {
        let mut rng = fastrand::Rng::with_seed(0x1de);
        for round in 0..300 {
            let num_vars = rng.u32(1..=12);
            let num_clauses = rng.usize(1..=(num_vars as usize * 4));
            let f: Cnf = (0..num_clauses)
                .map(|_| {
                    let len = rng.usize(1..=3);
                    (0..len)
                        .map(|_| Literal::new(rng.u32(1..=num_vars), rng.bool()))
                        .collect::<Clause>()
                })
                .collect();

            let Ok(once) = saturate(f) else {
                continue;
            };
            assert_eq!(once.cnf.first_unit(), None, "round {round}");
            let twice = saturate(once.cnf.clone()).unwrap();
            assert!(twice.forced.is_empty(), "round {round}");
            assert_eq!(twice.cnf, once.cnf, "round {round}");
        }
    }
}
