use rand::prelude::*;
use rand::rngs::StdRng;
use rustc_hash::FxHashSet;

use crate::assignment::Assignment;
use crate::cnf::{CNFClause, CNFVar, VarId};

/// A strategy deciding which variable the DPLL engine branches on next.
pub trait BranchingStrategy: Clone {
    /// Picks the next variable to branch on, with the polarity to try
    /// first encoded in the sign of the returned literal.
    ///
    /// Returns `None` only when no unassigned variable occurs in any of
    /// the remaining clauses; the engine treats this as a failure of the
    /// current branch.
    ///
    /// Ties between equally scored variables are broken towards the
    /// lowest variable id.
    fn pick_branching_variable(
        &mut self,
        clauses: &[CNFClause],
        assignment: &Assignment,
    ) -> Option<CNFVar>;
}

/// Occurrence counts per polarity for every unassigned variable
fn polarity_counts(clauses: &[CNFClause], assignment: &Assignment) -> (Vec<u32>, Vec<u32>) {
    let mut positive = vec![0u32; assignment.num_variables()];
    let mut negative = vec![0u32; assignment.num_variables()];

    for clause in clauses {
        for literal in &clause.vars {
            if assignment.is_assigned(literal.id()) {
                continue;
            }
            if literal.sign() {
                positive[literal.id() - 1] += 1;
            } else {
                negative[literal.id() - 1] += 1;
            }
        }
    }

    (positive, negative)
}

/// Branches on a uniformly random unassigned variable occurring in the
/// remaining clauses, with a uniformly random preferred polarity.
#[derive(Clone)]
pub struct RandomBranching {
    rng: StdRng,
}

impl RandomBranching {
    pub fn new() -> RandomBranching {
        RandomBranching {
            rng: StdRng::from_entropy(),
        }
    }

    /// A fixed seed makes repeated runs reproducible.
    pub fn with_seed(seed: u64) -> RandomBranching {
        RandomBranching {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomBranching {
    fn default() -> Self {
        RandomBranching::new()
    }
}

impl BranchingStrategy for RandomBranching {
    fn pick_branching_variable(
        &mut self,
        clauses: &[CNFClause],
        assignment: &Assignment,
    ) -> Option<CNFVar> {
        let mut candidates: Vec<VarId> = clauses
            .iter()
            .flat_map(|clause| clause.vars.iter().map(CNFVar::id))
            .filter(|&id| !assignment.is_assigned(id))
            .collect::<FxHashSet<VarId>>()
            .into_iter()
            .collect();
        // fixed candidate order, so a seeded run is reproducible
        candidates.sort_unstable();

        let id = *candidates.choose(&mut self.rng)?;
        Some(CNFVar::new(id, self.rng.gen()))
    }
}

/// Dynamic largest combined sum: maximizes the total number of
/// occurrences over both polarities; prefers the more frequent polarity.
#[derive(Clone)]
pub struct DLCS;

impl BranchingStrategy for DLCS {
    fn pick_branching_variable(
        &mut self,
        clauses: &[CNFClause],
        assignment: &Assignment,
    ) -> Option<CNFVar> {
        let (positive, negative) = polarity_counts(clauses, assignment);

        let mut best: Option<(CNFVar, u32)> = None;
        for id in 1..=assignment.num_variables() {
            if assignment.is_assigned(id) {
                continue;
            }
            let p = positive[id - 1];
            let n = negative[id - 1];
            if p + n == 0 {
                continue;
            }
            if best.map_or(true, |(_, score)| p + n > score) {
                best = Some((CNFVar::new(id, p >= n), p + n));
            }
        }
        best.map(|(literal, _)| literal)
    }
}

/// Two-sided Jeroslaw-Wang: every clause contributes `2^-length` to each
/// of its unassigned literals; maximizes the combined weight of both
/// polarities and prefers the heavier one.
#[derive(Clone)]
pub struct JeroslawWang;

impl BranchingStrategy for JeroslawWang {
    fn pick_branching_variable(
        &mut self,
        clauses: &[CNFClause],
        assignment: &Assignment,
    ) -> Option<CNFVar> {
        let mut positive = vec![0f64; assignment.num_variables()];
        let mut negative = vec![0f64; assignment.num_variables()];

        for clause in clauses {
            let weight = 2f64.powi(-(clause.len() as i32));
            for literal in &clause.vars {
                if assignment.is_assigned(literal.id()) {
                    continue;
                }
                if literal.sign() {
                    positive[literal.id() - 1] += weight;
                } else {
                    negative[literal.id() - 1] += weight;
                }
            }
        }

        let mut best: Option<(CNFVar, f64)> = None;
        for id in 1..=assignment.num_variables() {
            if assignment.is_assigned(id) {
                continue;
            }
            let p = positive[id - 1];
            let n = negative[id - 1];
            if p + n == 0.0 {
                continue;
            }
            if best.map_or(true, |(_, score)| p + n > score) {
                best = Some((CNFVar::new(id, p >= n), p + n));
            }
        }
        best.map(|(literal, _)| literal)
    }
}

/// Maximum occurrences in clauses of minimum size: counts only over the
/// shortest remaining clauses; prefers the polarity occurring more often
/// among them, ties favouring true.
#[derive(Clone)]
pub struct MOM;

impl BranchingStrategy for MOM {
    fn pick_branching_variable(
        &mut self,
        clauses: &[CNFClause],
        assignment: &Assignment,
    ) -> Option<CNFVar> {
        let min_length = clauses
            .iter()
            .map(CNFClause::len)
            .filter(|&length| length > 0)
            .min()?;

        let mut positive = vec![0u32; assignment.num_variables()];
        let mut negative = vec![0u32; assignment.num_variables()];
        for clause in clauses.iter().filter(|clause| clause.len() == min_length) {
            for literal in &clause.vars {
                if assignment.is_assigned(literal.id()) {
                    continue;
                }
                if literal.sign() {
                    positive[literal.id() - 1] += 1;
                } else {
                    negative[literal.id() - 1] += 1;
                }
            }
        }

        let mut best: Option<(CNFVar, u32)> = None;
        for id in 1..=assignment.num_variables() {
            if assignment.is_assigned(id) {
                continue;
            }
            let p = positive[id - 1];
            let n = negative[id - 1];
            if p + n == 0 {
                continue;
            }
            if best.map_or(true, |(_, score)| p + n > score) {
                best = Some((CNFVar::new(id, p >= n), p + n));
            }
        }
        best.map(|(literal, _)| literal)
    }
}
