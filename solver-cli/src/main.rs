mod config;

use clap::{App, Arg};
use config::{Config, Heuristic};
use itertools::Itertools;
use solver::{
    generator, RandomBranching, SATSolution, SatisfactionSolver, SearchStats, UnitPropagation,
    CNF, DLCS, JeroslawWang, MOM,
};
use std::io;
use std::io::prelude::*;
use std::path::{Path, PathBuf};
use sudoku::Grid;

fn make_config() -> Result<Config, Box<dyn std::error::Error>> {
    let matches = App::new("satisfaction")
        .version("1.0")
        .about("A tool to satisfy all your desires (or prove they are impossible)")
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .help("Input file or directory (every file inside a directory is solved)"),
        )
        .arg(
            Arg::with_name("cnf")
                .long("cnf")
                .takes_value(false)
                .help("Treat inputs as DIMACS CNF instead of sudoku puzzles"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Append the report to this file"),
        )
        .arg(
            Arg::with_name("heuristic")
                .long("heuristic")
                .value_name("HEURISTIC")
                .help("Branching heuristic")
                .takes_value(true)
                .possible_values(&["random", "dlcs", "jeroslaw-wang", "mom", "all"])
                .default_value("all"),
        )
        .arg(
            Arg::with_name("propagation")
                .long("propagation")
                .value_name("PROPAGATION")
                .help("Unit propagation engine")
                .takes_value(true)
                .possible_values(&["rescan", "watched"])
                .default_value("watched"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .help("Seed for random branching and instance generation"),
        )
        .arg(
            Arg::with_name("generate")
                .long("generate")
                .number_of_values(2)
                .value_names(&["VARS", "CLAUSES"])
                .help("Emit a random 3-SAT instance in DIMACS format and exit"),
        )
        .get_matches();

    let heuristics = match matches.value_of("heuristic") {
        Some("random") => vec![Heuristic::Random],
        Some("dlcs") => vec![Heuristic::Dlcs],
        Some("jeroslaw-wang") => vec![Heuristic::JeroslawWang],
        Some("mom") => vec![Heuristic::Mom],
        _ => Heuristic::all(),
    };

    let propagation = match matches.value_of("propagation") {
        Some("rescan") => UnitPropagation::ClauseRescan,
        _ => UnitPropagation::WatchedLiterals,
    };

    let seed = matches
        .value_of("seed")
        .map(|value| value.parse::<u64>())
        .transpose()
        .map_err(|err| format!("invalid seed: {}", err))?;

    let generate = match matches.values_of("generate") {
        Some(values) => {
            let sizes: Vec<usize> = values
                .map(str::parse)
                .collect::<Result<_, _>>()
                .map_err(|err| format!("invalid instance size: {}", err))?;
            Some((sizes[0], sizes[1]))
        }
        None => None,
    };

    Ok(Config {
        input: matches.value_of("input").map(PathBuf::from),
        cnf: matches.is_present("cnf"),
        output: matches.value_of("output").map(PathBuf::from),
        heuristics,
        propagation,
        seed,
        generate,
    })
}

fn run_heuristic(
    heuristic: Heuristic,
    propagation: UnitPropagation,
    seed: Option<u64>,
    formula: &CNF,
) -> (SATSolution, SearchStats) {
    match heuristic {
        Heuristic::Random => {
            let branching = seed.map_or_else(RandomBranching::new, RandomBranching::with_seed);
            SatisfactionSolver::with_propagation(branching, propagation).solve_with_stats(formula)
        }
        Heuristic::Dlcs => {
            SatisfactionSolver::with_propagation(DLCS, propagation).solve_with_stats(formula)
        }
        Heuristic::JeroslawWang => {
            SatisfactionSolver::with_propagation(JeroslawWang, propagation).solve_with_stats(formula)
        }
        Heuristic::Mom => {
            SatisfactionSolver::with_propagation(MOM, propagation).solve_with_stats(formula)
        }
    }
}

fn status(solution: &SATSolution) -> &'static str {
    match solution {
        SATSolution::Satisfiable(_) => "SAT",
        SATSolution::Unsatisfiable => "UNSAT",
        SATSolution::Unknown => "UNKNOWN",
    }
}

/// Solves one input under every configured heuristic and renders the
/// report lines for it. Puzzle inputs additionally get the decoded
/// grid of the first satisfying run.
fn solve_source(
    label: &str,
    content: &str,
    config: &Config,
) -> Result<String, Box<dyn std::error::Error>> {
    let (formula, grid_size) = if config.cnf {
        (CNF::from_dimacs(content)?, None)
    } else {
        let grid = Grid::parse(content)?;
        let size = grid.size();
        (sudoku::encode(&grid), Some(size))
    };

    let mut chunk = String::new();
    let mut decoded = None;
    for &heuristic in &config.heuristics {
        let (solution, stats) = run_heuristic(heuristic, config.propagation, config.seed, &formula);
        chunk.push_str(&format!(
            "{} | {:<13} | {:<7} | calls: {} splits: {} backtracks: {} elapsed: {:?}\n",
            label,
            heuristic.name(),
            status(&solution),
            stats.calls,
            stats.splits,
            stats.backtracks,
            stats.elapsed,
        ));

        if decoded.is_none() {
            if let (Some(size), SATSolution::Satisfiable(valuation)) = (grid_size, &solution) {
                decoded = Some(Grid::from_valuation(valuation, size)?);
            }
        }
    }

    if let Some(grid) = decoded {
        chunk.push_str(&format!("{}\n", grid));
    }
    Ok(chunk)
}

fn collect_inputs(path: &Path) -> io::Result<Vec<PathBuf>> {
    if path.is_dir() {
        let entries = std::fs::read_dir(path)?.collect::<io::Result<Vec<_>>>()?;
        Ok(entries
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .sorted()
            .collect())
    } else {
        Ok(vec![path.to_path_buf()])
    }
}

fn get_input(handle: &mut impl Read) -> io::Result<String> {
    let mut buffer = String::new();
    handle.read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = make_config()?;

    if let Some((num_variables, num_clauses)) = config.generate {
        let formula = generator::random_3sat(num_variables, num_clauses, config.seed);
        match config.output {
            Some(path) => std::fs::write(path, formula.to_dimacs())?,
            None => print!("{}", formula.to_dimacs()),
        }
        return Ok(());
    }

    let mut report = String::new();
    match &config.input {
        Some(path) => {
            for file in collect_inputs(path)? {
                let content = std::fs::read_to_string(&file)?;
                report.push_str(&solve_source(&file.display().to_string(), &content, &config)?);
            }
        }
        None => {
            println!("No input file specified. Reading from standard input...");
            let content = get_input(&mut io::stdin())?;
            report.push_str(&solve_source("<stdin>", &content, &config)?);
        }
    }

    print!("{}", report);
    if let Some(path) = &config.output {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?
            .write_all(report.as_bytes())?;
    }
    Ok(())
}
