use std::fmt;
use std::fs;
use std::path::Path;

use itertools::Itertools;
use num_integer::Roots;
use solver::Valuation;

use crate::encode::{num_variables, variable};

/// An N×N puzzle grid. Cells hold `1..=N`, or `0` when empty.
/// N must be a perfect square so the grid decomposes into boxes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<usize>>,
    size: usize,
}

impl Grid {
    /// Creates a grid with every cell empty
    pub fn empty(size: usize) -> Result<Grid, String> {
        check_size(size)?;
        Ok(Grid {
            cells: vec![vec![0; size]; size],
            size,
        })
    }

    pub fn new(cells: Vec<Vec<usize>>) -> Result<Grid, String> {
        let size = cells.len();
        check_size(size)?;
        for row in &cells {
            if row.len() != size {
                return Err(format!(
                    "expected {} values per row, found {}",
                    size,
                    row.len()
                ));
            }
            for &value in row {
                if value > size {
                    return Err(format!("cell value {} exceeds grid size {}", value, size));
                }
            }
        }
        Ok(Grid { cells, size })
    }

    /// Parses the plain text puzzle format: one line per row,
    /// whitespace-separated integers, `0` marking an empty cell.
    /// The grid size is the number of lines.
    pub fn parse(input: &str) -> Result<Grid, String> {
        let cells = input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                line.split_whitespace()
                    .map(|token| {
                        token
                            .parse::<usize>()
                            .map_err(|_| format!("invalid cell value {:?}", token))
                    })
                    .collect::<Result<Vec<usize>, String>>()
            })
            .collect::<Result<Vec<Vec<usize>>, String>>()?;
        Grid::new(cells)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Grid, String> {
        let contents = fs::read_to_string(path).map_err(|e| e.to_string())?;
        Grid::parse(&contents)
    }

    /// Reconstructs a grid from a satisfying valuation of the encoding.
    /// Every cell must have exactly one value variable set to true.
    pub fn from_valuation(valuation: &Valuation, size: usize) -> Result<Grid, String> {
        check_size(size)?;
        if valuation.len() < num_variables(size) {
            return Err(format!(
                "valuation covers {} variables, the encoding needs {}",
                valuation.len(),
                num_variables(size)
            ));
        }
        let mut cells = vec![vec![0; size]; size];

        for row in 0..size {
            for column in 0..size {
                let values: Vec<usize> = (1..=size)
                    .filter(|&value| valuation[variable(row, column, value, size) - 1])
                    .collect();
                match values.as_slice() {
                    [value] => cells[row][column] = *value,
                    [] => return Err(format!("cell ({}, {}) has no value", row, column)),
                    _ => {
                        return Err(format!(
                            "cell ({}, {}) has several values: {:?}",
                            row, column, values
                        ))
                    }
                }
            }
        }

        Ok(Grid { cells, size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Side length of the boxes the grid decomposes into
    pub fn box_size(&self) -> usize {
        self.size.sqrt()
    }

    pub fn value(&self, row: usize, column: usize) -> usize {
        self.cells[row][column]
    }

    /// Iterates over the filled-in cells (the clues of a puzzle)
    pub fn clues(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .filter(|(_, &value)| value != 0)
                .map(move |(column, &value)| (row, column, value))
        })
    }

    /// Checks that every row, column and box holds each of `1..=N`
    /// exactly once
    pub fn is_complete_latin(&self) -> bool {
        let expected = 1..=self.size;
        let box_size = self.box_size();

        let rows_ok = self
            .cells
            .iter()
            .all(|row| row.iter().copied().sorted().eq(expected.clone()));

        let columns_ok = (0..self.size).all(|column| {
            (0..self.size)
                .map(|row| self.cells[row][column])
                .sorted()
                .eq(expected.clone())
        });

        let boxes_ok = (0..self.size).all(|index| {
            let box_row = (index / box_size) * box_size;
            let box_column = (index % box_size) * box_size;
            (0..self.size)
                .map(|offset| self.cells[box_row + offset / box_size][box_column + offset % box_size])
                .sorted()
                .eq(expected.clone())
        });

        rows_ok && columns_ok && boxes_ok
    }

    /// Checks the non-consecutive rule: orthogonally adjacent cells
    /// never hold values differing by one. Empty cells do not violate
    /// the rule.
    pub fn satisfies_non_consecutive(&self) -> bool {
        let consecutive = |a: usize, b: usize| a != 0 && b != 0 && (a as isize - b as isize).abs() == 1;

        for row in 0..self.size {
            for column in 0..self.size {
                let value = self.cells[row][column];
                if column + 1 < self.size && consecutive(value, self.cells[row][column + 1]) {
                    return false;
                }
                if row + 1 < self.size && consecutive(value, self.cells[row + 1][column]) {
                    return false;
                }
            }
        }
        true
    }
}

fn check_size(size: usize) -> Result<(), String> {
    let box_size = size.sqrt();
    if size == 0 || box_size * box_size != size {
        return Err(format!("grid size {} is not a positive square", size));
    }
    Ok(())
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}
