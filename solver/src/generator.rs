use rand::prelude::*;
use rand::rngs::StdRng;

use crate::cnf::{CNFClause, CNFVar, VarId, CNF};

/// Generates a uniform random 3-SAT instance with `num_clauses` clauses
/// over `num_variables` variables. Every clause contains three literals
/// with pairwise distinct variables and uniformly random polarities.
///
/// A fixed seed makes the generated instance reproducible.
pub fn random_3sat(num_variables: usize, num_clauses: usize, seed: Option<u64>) -> CNF {
    assert!(
        num_variables >= 3,
        "a 3-SAT clause needs three distinct variables"
    );

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let clauses = (0..num_clauses)
        .map(|_| {
            let mut clause = CNFClause::new();
            while clause.len() < 3 {
                let id: VarId = rng.gen_range(1, num_variables + 1);
                if clause.vars.iter().any(|literal| literal.id() == id) {
                    continue;
                }
                clause.push(CNFVar::new(id, rng.gen()));
            }
            clause
        })
        .collect();

    CNF::new(clauses, num_variables)
}
