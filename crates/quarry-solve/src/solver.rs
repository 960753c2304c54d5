// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::io::Write;
use std::sync::Arc;

use quarry_schema::{Request, ResolvedSpec};

use crate::engine::{Problem, SolverEngine};
use crate::result::SolveResult;
use crate::{Error, Result};

#[cfg(test)]
#[path = "./solver_test.rs"]
mod solver_test;

/// Options controlling one solve call.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolveOptions {
    /// Log engine phase timers after solving.
    pub timers: bool,
    /// Log engine search statistics after solving.
    pub stats: bool,
    /// Build (and emit) the problem encoding without solving.
    pub setup_only: bool,
}

/// Drives a solver engine over abstract package requests.
pub struct Solver<E: SolverEngine> {
    engine: E,
}

impl<E: SolverEngine> Solver<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Concretize all requests in one joint solver invocation.
    ///
    /// When `out` is given, the generated problem encoding is streamed
    /// to it before solving. Callers must check
    /// [`SolveResult::require_satisfiable`] before interpreting the
    /// result.
    pub fn solve(
        &self,
        requests: &[Request],
        out: Option<&mut dyn Write>,
        options: &SolveOptions,
    ) -> Result<SolveResult> {
        let problem = Problem::new(requests.to_vec());
        self.solve_problem(&problem, out, options)
    }

    fn solve_problem<'w, 'd>(
        &self,
        problem: &Problem,
        out: Option<&'w mut (dyn Write + 'd)>,
        options: &SolveOptions,
    ) -> Result<SolveResult> {
        if let Some(out) = out {
            out.write_all(self.engine.encode(problem).as_bytes())
                .map_err(Error::ProblemTextIo)?;
        }
        if options.setup_only {
            return Ok(SolveResult::setup_only(problem.requests.clone()));
        }
        let outcome = self.engine.solve(problem)?;
        let result = SolveResult::from_outcome(outcome, &problem.requests);
        if options.timers {
            for (phase, duration) in result.stats().phases.iter() {
                tracing::info!(phase = %phase, ?duration, "solve phase");
            }
            tracing::info!(elapsed = ?result.stats().elapsed, "solve finished");
        }
        if options.stats {
            tracing::info!(
                models = result.models_considered(),
                candidates = result.stats().candidates_examined,
                "solver statistics"
            );
        }
        Ok(result)
    }

    /// Concretize requests incrementally, one round per pull on the
    /// returned iterator.
    ///
    /// Each round solves only the requests left unsolved by earlier
    /// rounds, with previously concretized specs available as fixed
    /// context for reuse. The sequence is finite: it ends when every
    /// request is solved, when a round is unsatisfiable, or when a
    /// round makes no progress (yielding
    /// [`Error::RoundProgressStall`]). It never exceeds one round per
    /// input request.
    pub fn solve_in_rounds<'s, 'o>(
        &'s self,
        requests: Vec<Request>,
        out: Option<&'o mut dyn Write>,
        options: SolveOptions,
    ) -> RoundsIter<'s, 'o, E> {
        RoundsIter {
            solver: self,
            out,
            options,
            remaining: requests,
            pinned: Vec::new(),
            round: 0,
            halted: false,
        }
    }
}

/// A lazily produced, finite sequence of per-round solve results.
///
/// Each call to [`Iterator::next`] performs one fresh solver
/// invocation; a consumer that stops pulling never pays for the
/// rounds it did not request. The iterator is not restartable.
pub struct RoundsIter<'s, 'o, E: SolverEngine> {
    solver: &'s Solver<E>,
    out: Option<&'o mut dyn Write>,
    options: SolveOptions,
    remaining: Vec<Request>,
    pinned: Vec<Arc<ResolvedSpec>>,
    round: usize,
    halted: bool,
}

impl<E: SolverEngine> Iterator for RoundsIter<'_, '_, E> {
    type Item = Result<SolveResult>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted || self.remaining.is_empty() {
            return None;
        }
        let problem = Problem {
            requests: self.remaining.clone(),
            pinned: self.pinned.clone(),
            allow_deferral: true,
        };
        let result = match self
            .solver
            .solve_problem(&problem, self.out.as_deref_mut(), &self.options)
        {
            Ok(result) => result,
            Err(err) => {
                self.halted = true;
                return Some(Err(err));
            }
        };
        if self.options.setup_only {
            // later rounds cannot be encoded without solving this one
            self.halted = true;
            return Some(Ok(result));
        }
        if !result.is_satisfiable() {
            self.halted = true;
            return Some(Ok(result));
        }
        let unsolved = result.unsolved().to_vec();
        let solved_any = self.remaining.iter().any(|r| !unsolved.contains(r));
        if !solved_any {
            self.halted = true;
            return Some(Err(Error::RoundProgressStall {
                round: self.round,
                requests: unsolved,
            }));
        }
        for spec in result.specs() {
            self.pinned.extend(spec.closure());
        }
        self.remaining = unsolved;
        self.round += 1;
        Some(Ok(result))
    }
}
