// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use quarry_config::UnifyMode;
use quarry_schema::{Request, RequestedBy};
use quarry_solve::{CatalogEngine, Solver as RequestSolver};
use quarry_storage::Catalog;

use crate::{Error, Result};

#[cfg(test)]
#[path = "./flags_test.rs"]
mod flags_test;

/// Output views understood by `--show`.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
#[strum(serialize_all = "kebab-case")]
pub enum OutputView {
    /// The generated solver problem encoding.
    ProblemText,
    /// Optimization criteria for the best model.
    Criteria,
    /// Raw output from the underlying engine.
    RawOutput,
    /// The models found, rendered as solutions.
    Solutions,
}

impl OutputView {
    pub const ALL: [OutputView; 4] = [
        Self::ProblemText,
        Self::Criteria,
        Self::RawOutput,
        Self::Solutions,
    ];

    /// Parse a comma-separated `--show` selector; `all` selects every
    /// view. Unknown tokens fail before any other work happens.
    pub fn parse_show(show: &str) -> Result<BTreeSet<OutputView>> {
        use strum::VariantNames;

        let mut views = BTreeSet::new();
        for token in show.split(',').map(str::trim) {
            if token == "all" {
                views.extend(Self::ALL);
                continue;
            }
            let view = token.parse().map_err(|_| Error::InvalidShowOption {
                given: token.to_string(),
                expected: format!("{}, all", Self::VARIANTS.join(", ")),
            })?;
            views.insert(view);
        }
        Ok(views)
    }
}

#[derive(Args, Clone)]
pub struct Solver {
    /// Load the package catalog from this directory of spec files
    #[clap(long = "catalog", value_name = "DIR")]
    pub catalogs: Vec<PathBuf>,

    /// Override the configured unification policy (all, none, when_possible)
    #[clap(long)]
    pub unify: Option<UnifyMode>,

    /// Cap the number of models the engine examines
    #[clap(long)]
    pub max_models: Option<usize>,
}

impl Solver {
    /// The unification policy for this invocation: the flag wins,
    /// then the loaded configuration.
    pub fn unify_mode(&self) -> Result<UnifyMode> {
        match self.unify {
            Some(mode) => Ok(mode),
            None => Ok(quarry_config::Config::current()?.solver.unify),
        }
    }

    pub fn get_solver(&self) -> Result<RequestSolver<CatalogEngine>> {
        let config = quarry_config::Config::current()?;
        let mut catalog = Catalog::new();
        for dir in &self.catalogs {
            tracing::debug!(catalog = %dir.display(), "loading catalog");
            catalog.load_dir(dir)?;
        }
        let max_models = self.max_models.unwrap_or(config.solver.max_models);
        let engine = CatalogEngine::new(Arc::new(catalog)).with_max_models(max_models);
        Ok(RequestSolver::new(engine))
    }
}

#[derive(Args, Clone)]
pub struct Requests {
    /// The package requests to concretize
    #[clap(name = "REQUESTS")]
    pub requests: Vec<String>,
}

impl Requests {
    /// Parse all command line requests.
    pub fn parse_requests(&self) -> Result<Vec<Request>> {
        self.requests
            .iter()
            .map(|given| Request::parse(given, RequestedBy::CommandLine).map_err(Error::from))
            .collect()
    }
}
