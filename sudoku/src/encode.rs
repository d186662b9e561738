use itertools::Itertools;
use num_integer::Roots;
use solver::{CNFClause, CNFVar, VarId, CNF};

use crate::grid::Grid;

/// The variable stating that cell `(row, column)` holds `value`.
/// `row` and `column` are zero-based, `value` ranges over `1..=size`,
/// so the variables cover `1..=size³` contiguously.
pub fn variable(row: usize, column: usize, value: usize, size: usize) -> VarId {
    row * size * size + column * size + value
}

/// Number of variables the encoding of an N×N grid ranges over
pub fn num_variables(size: usize) -> usize {
    size * size * size
}

/// Encodes the non-consecutive Sudoku rules together with the clues of
/// the given grid.
pub fn encode(grid: &Grid) -> CNF {
    let mut formula = constraints(grid.size());
    formula.extend(adjacency_constraints(grid.size()));
    formula.extend(clue_constraints(grid));
    formula
}

/// Encodes the classic Sudoku rules (no adjacency restriction) together
/// with the clues of the given grid.
pub fn encode_classic(grid: &Grid) -> CNF {
    let mut formula = constraints(grid.size());
    formula.extend(clue_constraints(grid));
    formula
}

/// The rules shared by both variants: exactly one value per cell, and
/// each value exactly once per row, column and box
fn constraints(size: usize) -> CNF {
    let mut formula = cell_constraints(size);
    formula.extend(row_constraints(size));
    formula.extend(column_constraints(size));
    formula.extend(box_constraints(size));
    formula
}

/// At least one of the variables is true, and no two of them are
fn exactly_one(variables: &[VarId], size: usize) -> CNF {
    let mut formula = CNF::empty(num_variables(size));

    formula.push(variables.iter().map(|&id| CNFVar::pos(id)).collect());

    for (&first, &second) in variables.iter().tuple_combinations() {
        formula.push(
            vec![CNFVar::neg(first), CNFVar::neg(second)]
                .into_iter()
                .collect(),
        );
    }

    formula
}

fn cell_constraints(size: usize) -> CNF {
    let mut formula = CNF::empty(num_variables(size));
    for row in 0..size {
        for column in 0..size {
            let variables: Vec<VarId> = (1..=size)
                .map(|value| variable(row, column, value, size))
                .collect();
            formula.extend(exactly_one(&variables, size));
        }
    }
    formula
}

/// For each value and each row, exactly one column holds the value
fn row_constraints(size: usize) -> CNF {
    let mut formula = CNF::empty(num_variables(size));
    for row in 0..size {
        for value in 1..=size {
            let variables: Vec<VarId> = (0..size)
                .map(|column| variable(row, column, value, size))
                .collect();
            formula.extend(exactly_one(&variables, size));
        }
    }
    formula
}

/// For each value and each column, exactly one row holds the value
fn column_constraints(size: usize) -> CNF {
    let mut formula = CNF::empty(num_variables(size));
    for column in 0..size {
        for value in 1..=size {
            let variables: Vec<VarId> = (0..size)
                .map(|row| variable(row, column, value, size))
                .collect();
            formula.extend(exactly_one(&variables, size));
        }
    }
    formula
}

/// For each value and each box, exactly one cell of the box holds it
fn box_constraints(size: usize) -> CNF {
    // grid sizes are validated to be perfect squares
    let box_size = size.sqrt();
    let mut formula = CNF::empty(num_variables(size));

    for box_row in (0..size).step_by(box_size) {
        for box_column in (0..size).step_by(box_size) {
            for value in 1..=size {
                let variables: Vec<VarId> = (0..box_size)
                    .cartesian_product(0..box_size)
                    .map(|(inner_row, inner_column)| {
                        variable(box_row + inner_row, box_column + inner_column, value, size)
                    })
                    .collect();
                formula.extend(exactly_one(&variables, size));
            }
        }
    }
    formula
}

/// Orthogonal neighbours must not hold consecutive values. Checking the
/// right and down neighbour of every cell covers each adjacent pair once.
fn adjacency_constraints(size: usize) -> CNF {
    let mut formula = CNF::empty(num_variables(size));

    for row in 0..size {
        for column in 0..size {
            let neighbours = [(row + 1, column), (row, column + 1)];
            for &(neighbour_row, neighbour_column) in &neighbours {
                if neighbour_row >= size || neighbour_column >= size {
                    continue;
                }
                for value in 1..size {
                    formula.push(CNFClause {
                        vars: vec![
                            CNFVar::neg(variable(row, column, value, size)),
                            CNFVar::neg(variable(neighbour_row, neighbour_column, value + 1, size)),
                        ],
                    });
                    formula.push(CNFClause {
                        vars: vec![
                            CNFVar::neg(variable(row, column, value + 1, size)),
                            CNFVar::neg(variable(neighbour_row, neighbour_column, value, size)),
                        ],
                    });
                }
            }
        }
    }
    formula
}

/// A unit clause per filled-in cell
fn clue_constraints(grid: &Grid) -> CNF {
    let mut formula = CNF::empty(num_variables(grid.size()));
    for (row, column, value) in grid.clues() {
        formula.push(CNFClause::single(CNFVar::pos(variable(
            row,
            column,
            value,
            grid.size(),
        ))));
    }
    formula
}
