use crate::{SATSolution, Valuation, CNF};
use rayon::prelude::*;

pub trait Solver {
    fn solve(&self, formula: &CNF) -> SATSolution;
}

/// Checks that a total valuation satisfies every clause of a formula
pub fn check_valuation(formula: &CNF, valuation: &Valuation) -> bool {
    formula
        .clauses
        .par_iter()
        .all(|clause| clause.vars.iter().any(|var| var.sign() == valuation[var.id() - 1]))
}

impl<T: Solver> Solver for &T {
    fn solve(&self, formula: &CNF) -> SATSolution {
        (*self).solve(formula)
    }
}

impl<T: Solver> Solver for Box<T> {
    fn solve(&self, formula: &CNF) -> SATSolution {
        (**self).solve(formula)
    }
}
