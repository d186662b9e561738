use solver::{
    JeroslawWang, RandomBranching, SATSolution, SatisfactionSolver, Solver, UnitPropagation, DLCS,
    MOM,
};
use sudoku::{encode, encode_classic, num_variables, variable, Grid};

fn solve_dlcs(formula: &solver::CNF) -> SATSolution {
    SatisfactionSolver::with_propagation(DLCS, UnitPropagation::WatchedLiterals).solve(formula)
}

#[test]
fn variable_mapping_is_contiguous() {
    assert_eq!(variable(0, 0, 1, 4), 1);
    assert_eq!(variable(0, 0, 4, 4), 4);
    assert_eq!(variable(0, 1, 1, 4), 5);
    assert_eq!(variable(1, 0, 1, 4), 17);
    assert_eq!(variable(3, 3, 4, 4), num_variables(4));
}

#[test]
fn rejects_malformed_grids() {
    assert!(Grid::parse("1 2\n3").is_err());
    assert!(Grid::parse("5 0\n0 0").is_err());
    assert!(Grid::parse("1 2 3\n4 5 6\n7 8 9").is_err()); // 3 is not a square
    assert!(Grid::empty(0).is_err());
}

#[test]
fn classic_4x4_without_clues_is_satisfiable() {
    let grid = Grid::empty(4).expect("4 is a square");
    let formula = encode_classic(&grid);

    match solve_dlcs(&formula) {
        SATSolution::Satisfiable(valuation) => {
            let solved = Grid::from_valuation(&valuation, 4).expect("decodable model");
            assert!(solved.is_complete_latin());
        }
        _ => panic!("empty classic grid must be solvable"),
    }
}

#[test]
fn classic_4x4_respects_clues() {
    let grid = Grid::parse("1 0 0 0\n0 0 0 2\n0 3 0 0\n0 0 0 0").expect("well-formed");
    let formula = encode_classic(&grid);

    match solve_dlcs(&formula) {
        SATSolution::Satisfiable(valuation) => {
            let solved = Grid::from_valuation(&valuation, 4).expect("decodable model");
            assert!(solved.is_complete_latin());
            assert_eq!(solved.value(0, 0), 1);
            assert_eq!(solved.value(1, 3), 2);
            assert_eq!(solved.value(2, 1), 3);
        }
        _ => panic!("puzzle with three clues must be solvable"),
    }
}

// No 4x4 grid satisfies the non-consecutive rule: the only rows whose
// neighbours differ by at least two are 2-4-1-3 and 3-1-4-2, and no
// stacking of those two rows keeps the columns Latin.
#[test]
fn non_consecutive_4x4_is_unsatisfiable_under_every_heuristic() {
    let formula = encode(&Grid::empty(4).expect("4 is a square"));

    assert!(SatisfactionSolver::new(RandomBranching::with_seed(42))
        .solve(&formula)
        .is_unsat());
    assert!(SatisfactionSolver::new(DLCS).solve(&formula).is_unsat());
    assert!(SatisfactionSolver::new(JeroslawWang).solve(&formula).is_unsat());
    assert!(SatisfactionSolver::new(MOM).solve(&formula).is_unsat());
}

#[test]
fn consecutive_clues_conflict_with_adjacency_rule() {
    let grid = Grid::parse("1 2 0 0\n0 0 0 0\n0 0 0 0\n0 0 0 0").expect("well-formed");
    assert!(solve_dlcs(&encode(&grid)).is_unsat());
}

#[test]
fn solved_9x9_grid_is_confirmed() {
    let input = "\
5 3 4 6 7 8 9 1 2
6 7 2 1 9 5 3 4 8
1 9 8 3 4 2 5 6 7
8 5 9 7 6 1 4 2 3
4 2 6 8 5 3 7 9 1
7 1 3 9 2 4 8 5 6
9 6 1 5 3 7 2 8 4
2 8 7 4 1 9 6 3 5
3 4 5 2 8 6 1 7 9";
    let grid = Grid::parse(input).expect("well-formed");
    assert!(grid.is_complete_latin());

    match solve_dlcs(&encode_classic(&grid)) {
        SATSolution::Satisfiable(valuation) => {
            let solved = Grid::from_valuation(&valuation, 9).expect("decodable model");
            assert_eq!(solved, grid);
        }
        _ => panic!("a fully clued valid grid must be satisfiable"),
    }
}

#[test]
fn decoding_rejects_incomplete_valuations() {
    let valuation = vec![false; num_variables(4)];
    assert!(Grid::from_valuation(&valuation, 4).is_err());
}

#[test]
fn decoding_rejects_short_valuations() {
    let valuation = vec![true; num_variables(4) - 1];
    assert!(Grid::from_valuation(&valuation, 4).is_err());

    assert!(Grid::from_valuation(&Vec::new(), 4).is_err());
}

#[test]
fn non_consecutive_check_spots_adjacent_values() {
    let horizontal = Grid::parse("1 2 0 0\n0 0 0 0\n0 0 0 0\n0 0 0 0").expect("well-formed");
    assert!(!horizontal.satisfies_non_consecutive());

    let vertical = Grid::parse("0 0 0 0\n0 3 0 0\n0 4 0 0\n0 0 0 0").expect("well-formed");
    assert!(!vertical.satisfies_non_consecutive());

    let spread = Grid::parse("2 4 1 3\n0 0 0 0\n0 0 0 0\n0 0 0 0").expect("well-formed");
    assert!(spread.satisfies_non_consecutive());
}
