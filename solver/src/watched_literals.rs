use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::assignment::Assignment;
use crate::cnf::{CNFClause, CNFVar};

/// Unit propagation driven by a two-watched-literals index.
///
/// Same contract as [`crate::simplification::propagate_units`], but a new
/// assignment only revisits the clauses watching the falsified literal
/// instead of rescanning the whole clause set. Each clause watches two of
/// its literal positions (a unit clause watches its single position
/// twice); a reverse index maps every literal to the clauses watching it.
/// Invariant: the two watched literals of a clause are never both false
/// unless the clause is a detected conflict.
///
/// The watch table lives only for this call. The search engine copies the
/// clause set at every branch point, so there is no longer-lived structure
/// the table could attach to.
pub fn propagate_units(
    clauses: Vec<CNFClause>,
    mut assignment: Assignment,
) -> (Vec<CNFClause>, Assignment, bool) {
    let mut watched_positions: Vec<(usize, usize)> = Vec::with_capacity(clauses.len());
    let mut watchers: FxHashMap<CNFVar, FxHashSet<usize>> = FxHashMap::default();
    // FIFO queue of literals that became true and still await processing
    let mut queue: VecDeque<CNFVar> = VecDeque::new();

    for (index, clause) in clauses.iter().enumerate() {
        if clause.is_empty() {
            return (clauses, assignment, true);
        }
        let (first, second) = if clause.len() == 1 { (0, 0) } else { (0, 1) };
        watched_positions.push((first, second));
        watchers.entry(clause.vars[first]).or_default().insert(index);
        watchers.entry(clause.vars[second]).or_default().insert(index);
    }

    // Literals already bound on entry must propagate as well.
    for literal in assignment.literals() {
        queue.push_back(literal);
    }

    for clause in &clauses {
        if clause.len() != 1 {
            continue;
        }
        let literal = clause.vars[0];
        match assignment.value(literal.id()) {
            Some(value) if value != literal.sign() => return (clauses, assignment, true),
            Some(_) => {}
            None => {
                assignment.assign(literal.id(), literal.sign());
                queue.push_back(literal);
            }
        }
    }

    while let Some(true_literal) = queue.pop_front() {
        // Two queued unit literals may contradict each other.
        if assignment.literal_is_false(true_literal) {
            return (clauses, assignment, true);
        }

        // Clauses watching the negation just lost one watched literal.
        let affected: Vec<usize> = match watchers.get(&-true_literal) {
            Some(watching) => watching.iter().copied().collect(),
            None => continue,
        };

        for clause_index in affected {
            let clause = &clauses[clause_index];
            let (first, second) = watched_positions[clause_index];

            let (false_position, other_position) = if clause.vars[first] == -true_literal {
                (first, second)
            } else if clause.vars[second] == -true_literal {
                (second, first)
            } else {
                // watch moved away earlier in this round
                continue;
            };

            let other_literal = clause.vars[other_position];
            if assignment.literal_is_true(other_literal) {
                continue;
            }

            // Look for a non-falsified literal to take over the watch.
            let replacement = clause
                .vars
                .iter()
                .enumerate()
                .find(|&(position, &candidate)| {
                    position != false_position
                        && position != other_position
                        && !assignment.literal_is_false(candidate)
                })
                .map(|(position, &candidate)| (position, candidate));

            if let Some((position, candidate)) = replacement {
                if let Some(watching) = watchers.get_mut(&-true_literal) {
                    watching.remove(&clause_index);
                }
                watchers.entry(candidate).or_default().insert(clause_index);
                watched_positions[clause_index] = if false_position == first {
                    (position, other_position)
                } else {
                    (other_position, position)
                };
                continue;
            }

            // No replacement: the clause is unit or conflicting.
            if assignment.literal_is_false(other_literal) {
                return (clauses, assignment, true);
            }
            if assignment.value(other_literal.id()).is_none() {
                assignment.assign(other_literal.id(), other_literal.sign());
                queue.push_back(other_literal);
            }
        }
    }

    // Materialize the propagated state as a plain clause list.
    let mut simplified = Vec::with_capacity(clauses.len());
    for clause in &clauses {
        let mut satisfied = false;
        let mut remaining = CNFClause::new();
        for &literal in &clause.vars {
            if assignment.literal_is_true(literal) {
                satisfied = true;
                break;
            }
            if !assignment.literal_is_false(literal) {
                remaining.push(literal);
            }
        }
        if satisfied {
            continue;
        }
        if remaining.is_empty() {
            return (clauses, assignment, true);
        }
        simplified.push(remaining);
    }

    (simplified, assignment, false)
}
