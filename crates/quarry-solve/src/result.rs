// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::sync::Arc;

use quarry_schema::{Request, ResolvedSpec};

use crate::engine::{Outcome, SolveStats};
use crate::{Error, Result};

#[cfg(test)]
#[path = "./result_test.rs"]
mod result_test;

/// Optimization criterion categories.
///
/// The category is attached when criteria are produced by the engine,
/// so renderers never derive it from criterion names.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CriterionKind {
    /// Costs of building or selecting new package versions.
    Build,
    /// Costs of failing to reuse already concretized packages.
    Reuse,
    /// Costs of departing from fixed (pinned) packages.
    Fixed,
    General,
}

/// A criterion's cost: one number, or one number per dependency depth.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CriterionCost {
    Total(u64),
    PerDepth(Vec<u64>),
}

impl CriterionCost {
    /// The number of depth columns this cost occupies.
    pub fn depth(&self) -> usize {
        match self {
            Self::Total(_) => 1,
            Self::PerDepth(values) => values.len().max(1),
        }
    }

    pub fn total(&self) -> u64 {
        match self {
            Self::Total(value) => *value,
            Self::PerDepth(values) => values.iter().sum(),
        }
    }
}

/// One named entry of a result's criteria breakdown.
#[derive(Clone, Debug)]
pub struct Criterion {
    pub name: String,
    pub kind: CriterionKind,
    pub cost: CriterionCost,
}

/// The set of resolved specs selected by one answer.
#[derive(Clone, Debug, Default)]
pub struct Solution {
    resolved: Vec<Arc<ResolvedSpec>>,
}

impl Solution {
    pub fn new(resolved: Vec<Arc<ResolvedSpec>>) -> Self {
        Self { resolved }
    }

    pub fn items(&self) -> std::slice::Iter<'_, Arc<ResolvedSpec>> {
        self.resolved.iter()
    }

    pub fn get<S: AsRef<str>>(&self, name: S) -> Option<&Arc<ResolvedSpec>> {
        self.resolved
            .iter()
            .find(|spec| spec.name().as_str() == name.as_ref())
    }

    /// The number of packages in this solution
    #[inline]
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// The number of packages in this solution
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

/// One (cost, solution) pair found by a solve.
#[derive(Clone, Debug)]
pub struct Answer {
    /// Lexicographic optimization cost, lower is better.
    pub cost: Vec<u64>,
    pub solution: Solution,
}

/// Everything one solver invocation produced.
///
/// Results are immutable once returned. Callers must check
/// [`SolveResult::require_satisfiable`] before interpreting anything
/// else.
#[derive(Clone, Debug, Default)]
pub struct SolveResult {
    answers: Vec<Answer>,
    criteria: Vec<Criterion>,
    specs: Vec<Arc<ResolvedSpec>>,
    unsolved: Vec<Request>,
    models_considered: usize,
    raw_output: String,
    stats: SolveStats,
    setup_only: bool,
}

impl SolveResult {
    pub(crate) fn from_outcome(outcome: Outcome, requests: &[Request]) -> Self {
        let Outcome {
            mut models,
            considered,
            raw_output,
            stats,
        } = outcome;
        // engines return models ranked already, but the ordering
        // invariant on answers is this type's to keep
        models.sort_by(|a, b| a.cost.cmp(&b.cost));
        let (criteria, specs, unsolved) = match models.first() {
            Some(best) => (
                best.criteria.clone(),
                best.resolved.clone(),
                best.unsolved.clone(),
            ),
            None => (Vec::new(), Vec::new(), requests.to_vec()),
        };
        let answers = models
            .into_iter()
            .map(|model| Answer {
                cost: model.cost,
                solution: Solution::new(model.resolved),
            })
            .collect();
        Self {
            answers,
            criteria,
            specs,
            unsolved,
            models_considered: considered,
            raw_output,
            stats,
            setup_only: false,
        }
    }

    /// An inert placeholder for a setup-only call; never interpret it.
    pub(crate) fn setup_only(requests: Vec<Request>) -> Self {
        Self {
            unsolved: requests,
            setup_only: true,
            ..Default::default()
        }
    }

    /// Ranked answers, ascending by lexicographic cost; the first is
    /// the globally best model.
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// The criteria breakdown of the best answer, in display order.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// The concretized output specs of the best answer.
    pub fn specs(&self) -> &[Arc<ResolvedSpec>] {
        &self.specs
    }

    /// Input requests that could not be placed in the chosen model.
    pub fn unsolved(&self) -> &[Request] {
        &self.unsolved
    }

    pub fn models_considered(&self) -> usize {
        self.models_considered
    }

    pub fn raw_output(&self) -> &str {
        &self.raw_output
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    pub fn is_setup_only(&self) -> bool {
        self.setup_only
    }

    pub fn is_satisfiable(&self) -> bool {
        !self.answers.is_empty()
    }

    /// Fail if this result represents an unsatisfiable request.
    ///
    /// This must be the first check made on any result.
    pub fn require_satisfiable(&self) -> Result<()> {
        if self.is_satisfiable() {
            return Ok(());
        }
        Err(Error::Unsatisfiable {
            requests: self.unsolved.clone(),
        })
    }
}
