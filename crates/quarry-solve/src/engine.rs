// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::sync::Arc;
use std::time::Duration;

use quarry_schema::{Request, ResolvedSpec};

use crate::error::EngineError;
use crate::result::Criterion;

/// One constraint problem handed to a solver engine.
#[derive(Clone, Debug, Default)]
pub struct Problem {
    /// The abstract requests to concretize.
    pub requests: Vec<Request>,
    /// Specs concretized by earlier rounds, available for reuse.
    pub pinned: Vec<Arc<ResolvedSpec>>,
    /// Allow the engine to defer conflicting input requests instead of
    /// failing the whole problem.
    pub allow_deferral: bool,
}

impl Problem {
    pub fn new(requests: Vec<Request>) -> Self {
        Self {
            requests,
            ..Default::default()
        }
    }
}

/// One satisfying model found by an engine.
#[derive(Clone, Debug)]
pub struct Model {
    /// Lexicographic optimization cost, lower is better.
    pub cost: Vec<u64>,
    /// Resolved root specs, one per solved request, deduplicated.
    pub resolved: Vec<Arc<ResolvedSpec>>,
    /// Criteria breakdown for this model, in display order.
    pub criteria: Vec<Criterion>,
    /// Input requests this model could not place.
    pub unsolved: Vec<Request>,
}

/// Timing and search statistics for one engine invocation.
#[derive(Clone, Debug, Default)]
pub struct SolveStats {
    pub elapsed: Duration,
    pub phases: Vec<(String, Duration)>,
    pub candidates_examined: usize,
}

/// Everything an engine reports for one invocation.
#[derive(Clone, Debug, Default)]
pub struct Outcome {
    /// Satisfying models; empty means the problem is unsatisfiable.
    pub models: Vec<Model>,
    /// Number of models examined before selecting the optimum.
    pub considered: usize,
    /// Raw engine trace, for diagnostic output.
    pub raw_output: String,
    pub stats: SolveStats,
}

/// The boundary to an underlying constraint-solving engine.
///
/// Engines are synchronous: one invocation is one potentially
/// long-running blocking call, and nothing here runs in parallel.
pub trait SolverEngine {
    /// Render the problem encoding as text, without solving.
    fn encode(&self, problem: &Problem) -> String;

    /// Solve the given problem.
    ///
    /// An unsatisfiable problem is reported as an [`Outcome`] with no
    /// models, not as an error; `Err` is reserved for internal engine
    /// failures.
    fn solve(&self, problem: &Problem) -> std::result::Result<Outcome, EngineError>;
}
