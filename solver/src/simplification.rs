use crate::assignment::Assignment;
use crate::cnf::{CNFClause, CNFVar};

/// Unit propagation by clause rescanning.
///
/// Repeats until fixpoint: every clause of length one forces its literal.
/// A forced literal whose variable is already bound to the opposite value
/// is a conflict, as is a clause that becomes empty while the forcing
/// literal is applied. Returns the simplified clauses, the extended
/// assignment and a conflict flag.
pub fn propagate_units(
    mut clauses: Vec<CNFClause>,
    mut assignment: Assignment,
) -> (Vec<CNFClause>, Assignment, bool) {
    loop {
        let unit_literals: Vec<CNFVar> = clauses
            .iter()
            .filter(|clause| clause.len() == 1)
            .map(|clause| clause.vars[0])
            .collect();

        if unit_literals.is_empty() {
            break;
        }

        for literal in unit_literals {
            match assignment.value(literal.id()) {
                Some(value) if value != literal.sign() => return (clauses, assignment, true),
                Some(_) => continue,
                None => assignment.assign(literal.id(), literal.sign()),
            }

            let mut remaining = Vec::with_capacity(clauses.len());
            for clause in &clauses {
                if clause.vars.contains(&literal) {
                    continue;
                }
                if clause.vars.contains(&-literal) {
                    let reduced: CNFClause = clause
                        .vars
                        .iter()
                        .copied()
                        .filter(|&other| other != -literal)
                        .collect();
                    if reduced.is_empty() {
                        return (clauses, assignment, true);
                    }
                    remaining.push(reduced);
                } else {
                    remaining.push(clause.clone());
                }
            }
            clauses = remaining;
        }
    }

    (clauses, assignment, false)
}

/// Pure literal elimination.
///
/// Repeats until fixpoint: every unassigned variable occurring with only
/// one polarity is bound to that polarity and its clauses are dropped.
/// Never causes a conflict, since it only removes satisfied clauses.
pub fn eliminate_pure_literals(
    mut clauses: Vec<CNFClause>,
    mut assignment: Assignment,
) -> (Vec<CNFClause>, Assignment) {
    loop {
        let mut positive = vec![0u32; assignment.num_variables()];
        let mut negative = vec![0u32; assignment.num_variables()];

        for clause in &clauses {
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

        let pure_literals: Vec<CNFVar> = (1..=assignment.num_variables())
            .filter(|&id| !assignment.is_assigned(id))
            .filter_map(|id| match (positive[id - 1], negative[id - 1]) {
                (p, 0) if p > 0 => Some(CNFVar::pos(id)),
                (0, n) if n > 0 => Some(CNFVar::neg(id)),
                _ => None,
            })
            .collect();

        if pure_literals.is_empty() {
            break;
        }

        for literal in pure_literals {
            assignment.assign(literal.id(), literal.sign());
            clauses.retain(|clause| !clause.vars.contains(&literal));
        }
    }

    (clauses, assignment)
}

/// Simplifies a clause set under the decision that `literal` is true:
/// clauses containing it are satisfied and dropped, its negation is
/// removed from the rest. A clause emptied here signals a dead branch
/// to the caller via [`has_empty_clause`].
pub fn assign_literal(clauses: &[CNFClause], literal: CNFVar) -> Vec<CNFClause> {
    clauses
        .iter()
        .filter(|clause| !clause.vars.contains(&literal))
        .map(|clause| {
            if clause.vars.contains(&-literal) {
                clause
                    .vars
                    .iter()
                    .copied()
                    .filter(|&other| other != -literal)
                    .collect()
            } else {
                clause.clone()
            }
        })
        .collect()
}

pub fn has_empty_clause(clauses: &[CNFClause]) -> bool {
    clauses.iter().any(|clause| clause.is_empty())
}
