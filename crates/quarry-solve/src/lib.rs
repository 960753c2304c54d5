// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

mod engine;
mod engines;
mod error;
mod io;
mod macros;
mod result;
mod solver;

pub use engine::{Model, Outcome, Problem, SolveStats, SolverEngine};
pub use engines::CatalogEngine;
pub use error::{EngineError, Error, Result};
pub use io::format_criteria;
pub use result::{Answer, Criterion, CriterionCost, CriterionKind, Solution, SolveResult};
pub use solver::{RoundsIter, SolveOptions, Solver};

pub use quarry_schema::{
    CoverMode,
    FormatError,
    PkgNameBuf,
    Request,
    RequestedBy,
    ResolvedSpec,
    Spec,
    StructuredFormat,
    TreeFormat,
    Version,
    VersionFilter,
};
pub use quarry_storage::Catalog;
pub use serde_json;
