use std::time::Duration;

use proptest::{collection::vec, prelude::*};
use solver::solvers::{InterruptibleSolverWrapper, TimeLimitedSolver, TimedSolver};
use solver::{
    check_valuation, Bruteforce, CNFClause, CNFVar, JeroslawWang, RandomBranching, SATSolution,
    SatisfactionSolver, SearchStats, Solver, UnitPropagation, CNF, DLCS, MOM,
};

const MAX_NUM_VARIABLES: usize = 6;
const MAX_NUM_LITERALS: usize = 4;
const MAX_NUM_CLAUSES: usize = 10;

fn clause(literals: &[i32]) -> CNFClause {
    literals.iter().map(|&l| CNFVar::from_i32(l)).collect()
}

fn formula(clauses: &[&[i32]], num_variables: usize) -> CNF {
    CNF::new(clauses.iter().map(|c| clause(c)).collect(), num_variables)
}

/// Clauses drawn by proptest, with duplicate variables removed per
/// clause as the encoders guarantee
fn build_formula(raw: Vec<Vec<(usize, bool)>>) -> CNF {
    let clauses = raw
        .into_iter()
        .map(|literals| {
            let mut clause = CNFClause::new();
            for (id, sign) in literals {
                if clause.vars.iter().all(|literal| literal.id() != id) {
                    clause.push(CNFVar::new(id, sign));
                }
            }
            clause
        })
        .collect();
    CNF::new(clauses, MAX_NUM_VARIABLES)
}

fn arbitrary_formula() -> impl Strategy<Value = CNF> {
    vec(
        vec(
            (1..=MAX_NUM_VARIABLES, any::<bool>()),
            1..=MAX_NUM_LITERALS,
        ),
        1..=MAX_NUM_CLAUSES,
    )
    .prop_map(build_formula)
}

/// Three pigeons into two holes: variable `(i - 1) * 2 + j` states that
/// pigeon `i` sits in hole `j`. Unsatisfiable.
fn pigeonhole() -> CNF {
    formula(
        &[
            &[1, 2],
            &[3, 4],
            &[5, 6],
            &[-1, -3],
            &[-1, -5],
            &[-3, -5],
            &[-2, -4],
            &[-2, -6],
            &[-4, -6],
        ],
        6,
    )
}

fn all_heuristic_runs(formula: &CNF) -> Vec<(&'static str, SATSolution, SearchStats)> {
    let (random_solution, random_stats) =
        SatisfactionSolver::new(RandomBranching::with_seed(42)).solve_with_stats(formula);
    let (dlcs_solution, dlcs_stats) = SatisfactionSolver::new(DLCS).solve_with_stats(formula);
    let (jw_solution, jw_stats) = SatisfactionSolver::new(JeroslawWang).solve_with_stats(formula);
    let (mom_solution, mom_stats) = SatisfactionSolver::new(MOM).solve_with_stats(formula);

    vec![
        ("random", random_solution, random_stats),
        ("dlcs", dlcs_solution, dlcs_stats),
        ("jeroslaw-wang", jw_solution, jw_stats),
        ("mom", mom_solution, mom_stats),
    ]
}

proptest! {
    #[test]
    fn matches_bruteforce_and_is_sound(formula in arbitrary_formula()) {
        let reference = Bruteforce::Bruteforce.solve(&formula);

        for (name, solution, _) in all_heuristic_runs(&formula) {
            prop_assert_eq!(
                solution.is_sat(),
                reference.is_sat(),
                "heuristic {} disagrees with bruteforce",
                name
            );
            if let SATSolution::Satisfiable(valuation) = solution {
                prop_assert!(
                    check_valuation(&formula, &valuation),
                    "heuristic {} returned a non-model",
                    name
                );
            }
        }
    }

    #[test]
    fn naive_and_watched_engines_agree(formula in arbitrary_formula()) {
        let (naive_solution, naive_stats) =
            SatisfactionSolver::new(DLCS).solve_with_stats(&formula);
        let (watched_solution, watched_stats) =
            SatisfactionSolver::with_propagation(DLCS, UnitPropagation::WatchedLiterals)
                .solve_with_stats(&formula);

        prop_assert_eq!(naive_solution, watched_solution);
        prop_assert_eq!(naive_stats.calls, watched_stats.calls);
        prop_assert_eq!(naive_stats.splits, watched_stats.splits);
        prop_assert_eq!(naive_stats.backtracks, watched_stats.backtracks);
    }

    #[test]
    fn statistics_are_monotonic(formula in arbitrary_formula()) {
        for (name, _, stats) in all_heuristic_runs(&formula) {
            prop_assert!(
                stats.backtracks <= stats.splits,
                "{}: {} backtracks for {} splits",
                name, stats.backtracks, stats.splits
            );
            prop_assert!(
                stats.calls >= stats.splits + 1,
                "{}: {} calls for {} splits",
                name, stats.calls, stats.splits
            );
        }
    }
}

#[test]
fn single_positive_unit_clause() {
    let (solution, _) = SatisfactionSolver::new(DLCS).solve_with_stats(&formula(&[&[1]], 1));
    assert_eq!(solution.model(), Some(vec![1]));
}

#[test]
fn contradictory_unit_clauses() {
    let cnf = formula(&[&[1], &[-1]], 1);
    for (name, solution, _) in all_heuristic_runs(&cnf) {
        assert!(solution.is_unsat(), "heuristic {} found a model", name);
    }
}

#[test]
fn three_clause_satisfiable_formula() {
    let cnf = formula(&[&[1, 2], &[-1, 2], &[1, -2]], 2);
    for (name, solution, _) in all_heuristic_runs(&cnf) {
        match solution {
            SATSolution::Satisfiable(valuation) => {
                assert!(check_valuation(&cnf, &valuation), "{} non-model", name)
            }
            _ => panic!("heuristic {} failed a satisfiable formula", name),
        }
    }
}

#[test]
fn pigeonhole_is_unsatisfiable_under_every_heuristic() {
    for (name, solution, stats) in all_heuristic_runs(&pigeonhole()) {
        assert!(solution.is_unsat(), "heuristic {} found a model", name);
        assert!(stats.backtracks <= stats.splits, "{}", name);
        assert!(stats.calls >= stats.splits + 1, "{}", name);
    }
}

#[test]
fn unconstrained_variables_default_to_false() {
    let (solution, _) = SatisfactionSolver::new(DLCS).solve_with_stats(&formula(&[&[1]], 3));
    assert_eq!(solution.model(), Some(vec![1, -2, -3]));
}

#[test]
fn deterministic_heuristics_repeat_exactly() {
    let cnf = solver::generator::random_3sat(12, 40, Some(7));

    for propagation in &[UnitPropagation::ClauseRescan, UnitPropagation::WatchedLiterals] {
        let first = SatisfactionSolver::with_propagation(JeroslawWang, *propagation)
            .solve_with_stats(&cnf);
        let second = SatisfactionSolver::with_propagation(JeroslawWang, *propagation)
            .solve_with_stats(&cnf);

        assert_eq!(first.0, second.0);
        assert_eq!(first.1.calls, second.1.calls);
        assert_eq!(first.1.splits, second.1.splits);
        assert_eq!(first.1.backtracks, second.1.backtracks);
    }
}

#[test]
fn seeded_random_branching_repeats_exactly() {
    let cnf = solver::generator::random_3sat(10, 30, Some(3));

    let first = SatisfactionSolver::new(RandomBranching::with_seed(11)).solve_with_stats(&cnf);
    let second = SatisfactionSolver::new(RandomBranching::with_seed(11)).solve_with_stats(&cnf);

    assert_eq!(first.0, second.0);
    assert_eq!(first.1.calls, second.1.calls);
    assert_eq!(first.1.splits, second.1.splits);
    assert_eq!(first.1.backtracks, second.1.backtracks);
}

#[test]
fn solver_combinators_pass_results_through() {
    let cnf = formula(&[&[1, 2], &[-1, 2], &[1, -2]], 2);
    let solver = SatisfactionSolver::new(DLCS);

    let (elapsed, solution) = TimedSolver::new(&solver).solve_timed(&cnf);
    assert!(solution.is_sat());
    assert!(elapsed <= Duration::from_secs(60));

    let wrapped = InterruptibleSolverWrapper::from(SatisfactionSolver::new(DLCS));
    assert_eq!(wrapped.solve(&cnf), solver.solve(&cnf));

    let limited = TimeLimitedSolver::new(SatisfactionSolver::new(DLCS), Duration::from_secs(60));
    assert!(limited.solve(&cnf).is_sat());
}

#[test]
fn time_limited_solver_gives_up_when_the_limit_expires() {
    let cnf = solver::generator::random_3sat(40, 168, Some(5));
    let limited = TimeLimitedSolver::new(SatisfactionSolver::new(DLCS), Duration::from_nanos(1));
    assert!(limited.solve(&cnf).is_unknown());
}

#[test]
fn generated_3sat_instances_are_well_formed() {
    let cnf = solver::generator::random_3sat(20, 50, Some(1));
    assert_eq!(cnf.num_variables, 20);
    assert_eq!(cnf.len(), 50);
    for clause in &cnf.clauses {
        assert_eq!(clause.len(), 3);
        for literal in &clause.vars {
            assert!((1..=20).contains(&literal.id()));
        }
        let mut ids: Vec<_> = clause.vars.iter().map(CNFVar::id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3, "duplicate variable within a clause");
    }
}
