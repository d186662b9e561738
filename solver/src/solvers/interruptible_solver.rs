use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use async_std::channel::{bounded, Receiver};
use async_std::task::block_on;
use async_trait::async_trait;
use auto_impl::auto_impl;

use crate::{SATSolution, Solver, CNF};

/// A solver whose run can be awaited and abandoned.
#[async_trait]
#[auto_impl(Box)]
pub trait InterruptibleSolver {
    async fn solve_interruptible(&self, formula: &CNF) -> SATSolution;
}

/// Runs a blocking solve on a dedicated thread and exposes the result as
/// a future. Dropping the waiter raises a flag visible to the worker;
/// the DPLL engine has no yield points, so an abandoned run simply keeps
/// the detached thread busy until it finishes on its own.
pub struct FlagWaiter {
    abandoned: Arc<AtomicBool>,
    receiver: Receiver<SATSolution>,
}

impl FlagWaiter {
    pub fn start(
        work: impl FnOnce(Arc<AtomicBool>) -> SATSolution + Send + 'static,
    ) -> FlagWaiter {
        let abandoned = Arc::new(AtomicBool::new(false));
        let (sender, receiver) = bounded(1);

        let flag = abandoned.clone();
        thread::spawn(move || {
            // the receiver may be gone by now; the result is discarded then
            let _ = sender.try_send(work(flag));
        });

        FlagWaiter {
            abandoned,
            receiver,
        }
    }

    pub async fn wait(self) -> SATSolution {
        self.receiver
            .recv()
            .await
            .unwrap_or(SATSolution::Unknown)
    }
}

impl Drop for FlagWaiter {
    fn drop(&mut self) {
        self.abandoned.store(true, Ordering::Relaxed);
    }
}

/// Adapts an interruptible solver back to the plain blocking interface
pub struct InterruptibleSolverWrapper<S: InterruptibleSolver> {
    solver: S,
}

impl<S: InterruptibleSolver> From<S> for InterruptibleSolverWrapper<S> {
    fn from(solver: S) -> Self {
        InterruptibleSolverWrapper { solver }
    }
}

impl<S: InterruptibleSolver> Solver for InterruptibleSolverWrapper<S> {
    fn solve(&self, formula: &CNF) -> SATSolution {
        block_on(self.solver.solve_interruptible(formula))
    }
}
