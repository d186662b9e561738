use crate::cnf::{CNFVar, VarId};
use crate::sat_solution::Valuation;

/// A partial assignment of truth values to variables.
///
/// Grows monotonically along a single search path; every branch point
/// clones it, so sibling branches never share mutable state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<Option<bool>>,
}

impl Assignment {
    /// Creates an empty assignment over variables `1..=num_variables`
    pub fn new(num_variables: usize) -> Assignment {
        Assignment {
            values: vec![None; num_variables],
        }
    }

    /// Number of variables this assignment ranges over
    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    /// The value bound to a variable, if any
    pub fn value(&self, id: VarId) -> Option<bool> {
        self.values[id - 1]
    }

    pub fn is_assigned(&self, id: VarId) -> bool {
        self.values[id - 1].is_some()
    }

    /// Binds a variable to a truth value
    pub fn assign(&mut self, id: VarId, value: bool) {
        self.values[id - 1] = Some(value);
    }

    /// True iff the literal is satisfied under the current assignment
    pub fn literal_is_true(&self, literal: CNFVar) -> bool {
        self.value(literal.id()) == Some(literal.sign())
    }

    /// True iff the literal is falsified under the current assignment.
    /// An unassigned literal is neither true nor false.
    pub fn literal_is_false(&self, literal: CNFVar) -> bool {
        self.value(literal.id()) == Some(!literal.sign())
    }

    /// Iterates over all bound variables as true literals
    pub fn literals(&self) -> impl Iterator<Item = CNFVar> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| value.map(|sign| CNFVar::new(index + 1, sign)))
    }

    /// Completes the assignment into a total valuation.
    /// Variables left unassigned by the search default to false.
    pub fn into_total_valuation(self) -> Valuation {
        self.values
            .into_iter()
            .map(|value| value.unwrap_or(false))
            .collect()
    }
}
