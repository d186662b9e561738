use solver::UnitPropagation;
use std::path::PathBuf;

/// Branching heuristics selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heuristic {
    Random,
    Dlcs,
    JeroslawWang,
    Mom,
}

impl Heuristic {
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Random => "random",
            Heuristic::Dlcs => "dlcs",
            Heuristic::JeroslawWang => "jeroslaw-wang",
            Heuristic::Mom => "mom",
        }
    }

    pub fn all() -> Vec<Heuristic> {
        vec![
            Heuristic::Random,
            Heuristic::Dlcs,
            Heuristic::JeroslawWang,
            Heuristic::Mom,
        ]
    }
}

pub struct Config {
    pub input:       Option<PathBuf>,
    pub cnf:         bool,
    pub output:      Option<PathBuf>,
    pub heuristics:  Vec<Heuristic>,
    pub propagation: UnitPropagation,
    pub seed:        Option<u64>,
    pub generate:    Option<(usize, usize)>,
}
