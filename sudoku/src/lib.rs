/// The puzzle grid and its textual format
pub mod grid;
/// Translation of a puzzle into a CNF formula
pub mod encode;

pub use encode::{encode, encode_classic, num_variables, variable};
pub use grid::Grid;
