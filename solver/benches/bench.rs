use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use solver::{
    generator::random_3sat, JeroslawWang, SatisfactionSolver, Solver, UnitPropagation, CNF, DLCS,
    MOM,
};

/// Deterministic instances around the hard clause/variable ratio of 4.2
fn instances() -> Vec<(String, CNF)> {
    [(20, 84), (30, 126), (40, 168)]
        .iter()
        .enumerate()
        .map(|(seed, &(num_variables, num_clauses))| {
            (
                format!("uf{}-{}", num_variables, num_clauses),
                random_3sat(num_variables, num_clauses, Some(seed as u64)),
            )
        })
        .collect()
}

fn bench_solver(c: &mut Criterion, name: &str, solver: impl Solver) {
    let mut group = c.benchmark_group(name);
    let solver = std::rc::Rc::new(solver);

    for (name, formula) in instances() {
        let solver = solver.clone();
        group.bench_function(name, move |b| {
            b.iter_batched(
                || formula.clone(),
                |formula| solver.solve(&formula),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish()
}

fn criterion_benchmark(c: &mut Criterion) {
    bench_solver(c, "DLCS rescan", SatisfactionSolver::new(DLCS));
    bench_solver(
        c,
        "DLCS watched",
        SatisfactionSolver::with_propagation(DLCS, UnitPropagation::WatchedLiterals),
    );
    bench_solver(c, "Jeroslaw-Wang", SatisfactionSolver::new(JeroslawWang));
    bench_solver(c, "MOM", SatisfactionSolver::new(MOM));
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}
criterion_main!(benches);
