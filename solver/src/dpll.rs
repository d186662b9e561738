use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::assignment::Assignment;
use crate::branching_strategy::BranchingStrategy;
use crate::cnf::{CNFClause, CNF};
use crate::simplification;
use crate::solvers::{FlagWaiter, InterruptibleSolver};
use crate::watched_literals;
use crate::{SATSolution, Solver};

/// Selects the unit propagation implementation the engine runs with.
/// Both compute the same fixpoint; they differ only in performance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitPropagation {
    /// Rescan the whole clause set for every new unit
    ClauseRescan,
    /// Revisit only the clauses watching the falsified literal
    WatchedLiterals,
}

/// Counters describing the shape of one completed search.
#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    /// Recursive calls into the search procedure
    pub calls: u64,
    /// Branching decisions taken
    pub splits: u64,
    /// Branching decisions whose preferred polarity had to be flipped
    pub backtracks: u64,
    /// Wall-clock time of the whole solve
    pub elapsed: Duration,
}

/// The recursive DPLL solver, parameterized over a branching strategy.
pub struct SatisfactionSolver<B: BranchingStrategy> {
    strategy: B,
    propagation: UnitPropagation,
}

impl<B: BranchingStrategy> SatisfactionSolver<B> {
    pub fn new(strategy: B) -> SatisfactionSolver<B> {
        SatisfactionSolver {
            strategy,
            propagation: UnitPropagation::ClauseRescan,
        }
    }

    pub fn with_propagation(strategy: B, propagation: UnitPropagation) -> SatisfactionSolver<B> {
        SatisfactionSolver {
            strategy,
            propagation,
        }
    }

    /// Decides the formula and additionally reports search statistics.
    pub fn solve_with_stats(&self, formula: &CNF) -> (SATSolution, SearchStats) {
        let mut strategy = self.strategy.clone();
        let mut stats = SearchStats::default();

        let start = Instant::now();
        let result = self.dpll(
            &mut strategy,
            formula.clauses.clone(),
            Assignment::new(formula.num_variables),
            &mut stats,
        );
        stats.elapsed = start.elapsed();

        let solution = match result {
            Some(assignment) => SATSolution::Satisfiable(assignment.into_total_valuation()),
            None => SATSolution::Unsatisfiable,
        };
        (solution, stats)
    }

    fn propagate(
        &self,
        clauses: Vec<CNFClause>,
        assignment: Assignment,
    ) -> (Vec<CNFClause>, Assignment, bool) {
        match self.propagation {
            UnitPropagation::ClauseRescan => simplification::propagate_units(clauses, assignment),
            UnitPropagation::WatchedLiterals => {
                watched_literals::propagate_units(clauses, assignment)
            }
        }
    }

    /// One level of the backtracking search. Returns the satisfying
    /// assignment of the first successful branch, or `None` if the
    /// clause set is unsatisfiable under the given partial assignment.
    fn dpll(
        &self,
        strategy: &mut B,
        clauses: Vec<CNFClause>,
        assignment: Assignment,
        stats: &mut SearchStats,
    ) -> Option<Assignment> {
        stats.calls += 1;

        let (clauses, assignment, conflict) = self.propagate(clauses, assignment);
        if conflict {
            return None;
        }

        let (clauses, assignment) = simplification::eliminate_pure_literals(clauses, assignment);

        if clauses.is_empty() {
            return Some(assignment);
        }
        if simplification::has_empty_clause(&clauses) {
            return None;
        }

        let decision = strategy.pick_branching_variable(&clauses, &assignment)?;
        stats.splits += 1;

        let mut flipped = false;
        for &literal in &[decision, -decision] {
            let mut child_assignment = assignment.clone();
            child_assignment.assign(literal.id(), literal.sign());
            let child_clauses = simplification::assign_literal(&clauses, literal);

            if simplification::has_empty_clause(&child_clauses) {
                if !flipped {
                    stats.backtracks += 1;
                    flipped = true;
                }
                continue;
            }

            match self.dpll(strategy, child_clauses, child_assignment, stats) {
                Some(satisfying) => return Some(satisfying),
                None if !flipped => {
                    stats.backtracks += 1;
                    flipped = true;
                }
                None => {}
            }
        }

        None
    }
}

impl<B: BranchingStrategy> Solver for SatisfactionSolver<B> {
    fn solve(&self, formula: &CNF) -> SATSolution {
        self.solve_with_stats(formula).0
    }
}

#[async_trait]
impl<B: BranchingStrategy + Send + Sync + 'static> InterruptibleSolver for SatisfactionSolver<B> {
    async fn solve_interruptible(&self, formula: &CNF) -> SATSolution {
        let solver = SatisfactionSolver::with_propagation(self.strategy.clone(), self.propagation);
        let formula = formula.clone();
        // The search has no internal yield points; it runs on its own
        // thread and is abandoned if the caller stops waiting.
        FlagWaiter::start(move |_abandoned| solver.solve(&formula))
            .wait()
            .await
    }
}
