/// The CNF representation of a formula
pub mod cnf;
/// Partial assignments of truth values to variables
pub mod assignment;
/// The Solver trait which has to be implemented by each solver
pub mod sat_solver;
/// Unit propagation and pure literal elimination by clause rescanning
pub mod simplification;
/// Unit propagation driven by a two-watched-literals index
pub mod watched_literals;
/// Module that contains the custom DPLL solver
mod dpll;
/// Module that specifies the output of a solver
mod sat_solution;
pub mod bruteforce;
/// Branching heuristics one can choose from to customize the [`SatisfactionSolver`].
mod branching_strategy;
/// Random 3-SAT instance generation
pub mod generator;
/// A module which offers some additional solvers,
/// for one that can be interrupted or timed.
pub mod solvers;

pub use cnf::{CNFClause, CNFVar, VarId, CNF};
pub use assignment::Assignment;
pub use sat_solver::{check_valuation, Solver};
pub use bruteforce::Bruteforce;
pub use branching_strategy::{BranchingStrategy, RandomBranching, JeroslawWang, DLCS, MOM};
pub use dpll::{SatisfactionSolver, SearchStats, UnitPropagation};
pub use sat_solution::{SATSolution, Valuation};
