// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use std::fmt::Write;
use std::sync::Arc;
use std::time::Instant;

use quarry_schema::{PkgNameBuf, Request, ResolvedEdge, ResolvedSpec, Spec};
use quarry_storage::Catalog;

use crate::engine::{Model, Outcome, Problem, SolveStats, SolverEngine};
use crate::error::EngineError;
use crate::result::{Criterion, CriterionCost, CriterionKind};

#[cfg(test)]
#[path = "./catalog_test.rs"]
mod catalog_test;

/// Default cap on the number of candidate models examined per solve.
pub const DEFAULT_MAX_MODELS: usize = 64;

/// A solver engine that selects builds from a [`Catalog`].
///
/// This is not a full constraint search: it enumerates a bounded set
/// of root candidate assignments, resolves dependency closures
/// greedily (newest first, preferring pinned specs), and ranks the
/// resulting models by cost.
#[derive(Clone, Debug)]
pub struct CatalogEngine {
    catalog: Arc<Catalog>,
    max_models: usize,
}

impl CatalogEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            max_models: DEFAULT_MAX_MODELS,
        }
    }

    pub fn with_max_models(mut self, max_models: usize) -> Self {
        self.max_models = max_models.max(1);
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Select a build for one request, preferring a forced root
    /// candidate, then pinned specs, then the newest catalog match.
    fn choose(
        &self,
        request: &Request,
        forced: &BTreeMap<PkgNameBuf, Arc<Spec>>,
        pinned: &BTreeMap<PkgNameBuf, Arc<Spec>>,
        draft: &mut ModelDraft,
        examined: &mut usize,
    ) -> Option<Arc<Spec>> {
        if let Some(spec) = forced.get(&request.pkg) {
            *examined += 1;
            return request
                .is_satisfied_by(&spec.version)
                .then(|| Arc::clone(spec));
        }
        if let Some(spec) = pinned.get(&request.pkg)
            && request.is_satisfied_by(&spec.version)
        {
            *examined += 1;
            draft.reused.insert(request.pkg.clone());
            return Some(Arc::clone(spec));
        }
        let matching = self.catalog.matching(request);
        *examined += matching.len();
        matching.first().cloned()
    }

    /// Resolve one root request and its dependency closure into the
    /// shared assignment, breadth-first so that recorded depths index
    /// the per-depth criteria.
    fn resolve_root(
        &self,
        root: &Request,
        draft: &mut ModelDraft,
        forced: &BTreeMap<PkgNameBuf, Arc<Spec>>,
        pinned: &BTreeMap<PkgNameBuf, Arc<Spec>>,
        examined: &mut usize,
    ) -> Result<(), ModelFailure> {
        let mut queue = VecDeque::from([(root.clone(), 0usize)]);
        while let Some((request, depth)) = queue.pop_front() {
            if let Some(existing) = draft.assignment.get(&request.pkg) {
                if request.is_satisfied_by(&existing.version) {
                    // unified with the assignment built so far
                    continue;
                }
                return Err(ModelFailure::Conflict { request });
            }
            let Some(chosen) = self.choose(&request, forced, pinned, draft, examined) else {
                return Err(ModelFailure::NoCandidate { request });
            };
            for dep in chosen.depends.iter() {
                queue.push_back((dep.to_request(&chosen.pkg), depth + 1));
            }
            draft.depth.insert(request.pkg.clone(), depth);
            draft.assignment.insert(request.pkg.clone(), chosen);
        }
        Ok(())
    }

    /// Resolve one candidate combination into a complete assignment.
    ///
    /// With deferral allowed, a root whose closure cannot be unified
    /// with the assignment built so far is rolled back and deferred
    /// instead of failing the model. Only input requests can be
    /// deferred.
    fn resolve(
        &self,
        problem: &Problem,
        forced: &BTreeMap<PkgNameBuf, Arc<Spec>>,
        pinned: &BTreeMap<PkgNameBuf, Arc<Spec>>,
        examined: &mut usize,
    ) -> Result<ModelDraft, ModelFailure> {
        let mut draft = ModelDraft::default();
        for request in &problem.requests {
            let snapshot = draft.clone();
            match self.resolve_root(request, &mut draft, forced, pinned, examined) {
                Ok(()) => (),
                Err(failure) if problem.allow_deferral => {
                    tracing::debug!("deferring {request}: {failure}");
                    draft = snapshot;
                    draft.deferred.push(request.clone());
                }
                Err(failure) => return Err(failure),
            }
        }
        Ok(draft)
    }

    /// Compute the cost vector and criteria breakdown for a completed
    /// assignment and build its resolved graph.
    fn evaluate(
        &self,
        problem: &Problem,
        draft: &ModelDraft,
        pinned: &BTreeMap<PkgNameBuf, Arc<Spec>>,
    ) -> Result<Model, EngineError> {
        let max_depth = draft
            .depth
            .values()
            .copied()
            .max()
            .map(|depth| depth + 1)
            .unwrap_or(1);
        let mut version_distance = vec![0u64; max_depth];
        let mut not_reused = vec![0u64; max_depth];
        for (name, spec) in &draft.assignment {
            let depth = draft.depth.get(name).copied().unwrap_or(0);
            version_distance[depth] += self.catalog.version_distance(name, &spec.version);
            if !draft.reused.contains(name) {
                not_reused[depth] += 1;
            }
        }
        let pinned_mismatches = pinned
            .iter()
            .filter(|(name, spec)| {
                draft
                    .assignment
                    .get(*name)
                    .map(|chosen| chosen.version != spec.version)
                    .unwrap_or(false)
            })
            .count() as u64;
        let deferred = draft.deferred.len() as u64;

        let cost = vec![
            deferred,
            version_distance.iter().sum(),
            not_reused.iter().sum(),
            pinned_mismatches,
        ];
        let criteria = vec![
            Criterion {
                name: "deferred requests".to_string(),
                kind: CriterionKind::General,
                cost: CriterionCost::Total(deferred),
            },
            Criterion {
                name: "build: version distance".to_string(),
                kind: CriterionKind::Build,
                cost: CriterionCost::PerDepth(version_distance),
            },
            Criterion {
                name: "reuse: packages not reused".to_string(),
                kind: CriterionKind::Reuse,
                cost: CriterionCost::PerDepth(not_reused),
            },
            Criterion {
                name: "fixed: pinned not honored".to_string(),
                kind: CriterionKind::Fixed,
                cost: CriterionCost::Total(pinned_mismatches),
            },
        ];

        let built = build_resolved(&draft.assignment)?;
        let mut resolved = Vec::new();
        let mut seen = BTreeSet::new();
        for request in &problem.requests {
            if draft.deferred.contains(request) {
                continue;
            }
            let Some(node) = built.get(&request.pkg) else {
                continue;
            };
            if seen.insert(*node.digest()) {
                resolved.push(Arc::clone(node));
            }
        }

        Ok(Model {
            cost,
            resolved,
            criteria,
            unsolved: draft.deferred.clone(),
        })
    }
}

impl SolverEngine for CatalogEngine {
    fn encode(&self, problem: &Problem) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "% problem: {} request(s), {} pinned spec(s)",
            problem.requests.len(),
            problem.pinned.len()
        );
        for request in &problem.requests {
            match request.version.is_any() {
                true => {
                    let _ = writeln!(out, "request(\"{}\").", request.pkg);
                }
                false => {
                    let _ = writeln!(out, "request(\"{}\", \"{}\").", request.pkg, request.version);
                }
            }
        }
        for pinned in &problem.pinned {
            let _ = writeln!(out, "pinned(\"{}\", \"{}\").", pinned.name(), pinned.version());
        }
        let names: BTreeSet<_> = problem.requests.iter().map(|r| &r.pkg).collect();
        for name in names {
            for candidate in self.catalog.candidates(name) {
                let _ = writeln!(
                    out,
                    "candidate(\"{}\", \"{}\").",
                    candidate.pkg, candidate.version
                );
            }
        }
        out
    }

    fn solve(&self, problem: &Problem) -> Result<Outcome, EngineError> {
        let started = Instant::now();
        let pinned = flatten_pinned(&problem.pinned);

        // the baseline model takes the best candidate everywhere;
        // variants force one alternate candidate per root request
        let mut combos: Vec<BTreeMap<PkgNameBuf, Arc<Spec>>> = vec![BTreeMap::new()];
        'roots: for request in &problem.requests {
            for candidate in self.catalog.matching(request).into_iter().skip(1) {
                if combos.len() >= self.max_models {
                    break 'roots;
                }
                combos.push(BTreeMap::from([(request.pkg.clone(), candidate)]));
            }
        }
        let setup_elapsed = started.elapsed();

        let mut raw_output = String::new();
        let mut examined = 0usize;
        let mut models: Vec<Model> = Vec::new();
        let mut seen_assignments = BTreeSet::new();
        for (index, forced) in combos.iter().enumerate() {
            match self.resolve(problem, forced, &pinned, &mut examined) {
                Ok(draft) => {
                    if !seen_assignments.insert(draft.key()) {
                        continue;
                    }
                    let model = self.evaluate(problem, &draft, &pinned)?;
                    let _ = writeln!(
                        raw_output,
                        "model {index}: cost={:?} resolved={} deferred={}",
                        model.cost,
                        model.resolved.len(),
                        model.unsolved.len()
                    );
                    models.push(model);
                }
                Err(failure) => {
                    let _ = writeln!(raw_output, "model {index}: rejected ({failure})");
                }
            }
        }
        models.sort_by(|a, b| a.cost.cmp(&b.cost));
        let considered = models.len();
        let elapsed = started.elapsed();
        let _ = writeln!(raw_output, "% {considered} model(s) in {elapsed:?}");

        Ok(Outcome {
            models,
            considered,
            raw_output,
            stats: SolveStats {
                elapsed,
                phases: vec![
                    ("setup".to_string(), setup_elapsed),
                    ("solve".to_string(), elapsed.saturating_sub(setup_elapsed)),
                ],
                candidates_examined: examined,
            },
        })
    }
}

#[derive(Clone, Debug, Default)]
struct ModelDraft {
    assignment: BTreeMap<PkgNameBuf, Arc<Spec>>,
    depth: BTreeMap<PkgNameBuf, usize>,
    reused: BTreeSet<PkgNameBuf>,
    deferred: Vec<Request>,
}

impl ModelDraft {
    /// A stable identity for deduplicating equivalent assignments
    /// reached through different forced candidates.
    fn key(&self) -> String {
        let mut key = String::new();
        for (name, spec) in &self.assignment {
            let _ = write!(key, "{name}={};", spec.version);
        }
        for request in &self.deferred {
            let _ = write!(key, "?{request};");
        }
        key
    }
}

#[derive(Debug)]
enum ModelFailure {
    Conflict { request: Request },
    NoCandidate { request: Request },
}

impl fmt::Display for ModelFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { request } => {
                write!(f, "{request} conflicts with the assignment")
            }
            Self::NoCandidate { request } => {
                write!(f, "no candidate satisfies {request}")
            }
        }
    }
}

/// Index the closure of all pinned specs by name, first wins.
fn flatten_pinned(pinned: &[Arc<ResolvedSpec>]) -> BTreeMap<PkgNameBuf, Arc<Spec>> {
    let mut out = BTreeMap::new();
    for root in pinned {
        for node in root.closure() {
            out.entry(node.name().clone())
                .or_insert_with(|| Arc::clone(node.spec()));
        }
    }
    out
}

/// Build the resolved graph for a complete assignment.
fn build_resolved(
    assignment: &BTreeMap<PkgNameBuf, Arc<Spec>>,
) -> Result<BTreeMap<PkgNameBuf, Arc<ResolvedSpec>>, EngineError> {
    fn build(
        name: &PkgNameBuf,
        assignment: &BTreeMap<PkgNameBuf, Arc<Spec>>,
        memo: &mut BTreeMap<PkgNameBuf, Arc<ResolvedSpec>>,
        building: &mut BTreeSet<PkgNameBuf>,
    ) -> Result<Arc<ResolvedSpec>, EngineError> {
        if let Some(done) = memo.get(name) {
            return Ok(Arc::clone(done));
        }
        if !building.insert(name.clone()) {
            return Err(EngineError::MalformedProblem(format!(
                "dependency cycle involving {name}"
            )));
        }
        let spec = assignment.get(name).ok_or_else(|| {
            EngineError::Internal(format!("assignment is missing resolved package {name}"))
        })?;
        let mut edges = Vec::new();
        for dep in spec.depends.iter() {
            let child = build(&dep.pkg, assignment, memo, building)?;
            edges.push(ResolvedEdge {
                kind: dep.kind,
                spec: child,
            });
        }
        building.remove(name);
        let node = Arc::new(ResolvedSpec::new(Arc::clone(spec), edges));
        memo.insert(name.clone(), Arc::clone(&node));
        Ok(node)
    }

    let mut memo = BTreeMap::new();
    let mut building = BTreeSet::new();
    for name in assignment.keys() {
        build(name, assignment, &mut memo, &mut building)?;
    }
    Ok(memo)
}
