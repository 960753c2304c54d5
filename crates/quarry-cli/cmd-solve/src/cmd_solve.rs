// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::collections::BTreeSet;
use std::io::{IsTerminal, Write};

use clap::Args;
use miette::Result;
use quarry_cli_common::{active_environment, flags, CommandArgs, Error, OutputView, Run};
use quarry_config::UnifyMode;
use quarry_schema::{CoverMode, Request, StructuredFormat, TreeFormat, SHORT_DIGEST_LEN};
use quarry_solve::{format_criteria, SolveOptions, SolveResult, Solver, SolverEngine};

#[cfg(test)]
#[path = "./cmd_solve_test.rs"]
mod cmd_solve_test;

/// Concretize package requests with the constraint solver
#[derive(Args)]
#[clap(visible_alias = "concretize")]
pub struct Solve {
    #[clap(flatten)]
    pub solver: flags::Solver,
    #[clap(flatten)]
    pub requests: flags::Requests,

    /// Select outputs: comma-separated list of problem-text,
    /// criteria, raw-output, solutions, or all
    #[clap(long, default_value = "criteria,solutions")]
    pub show: String,

    /// Print the concrete specs as yaml
    #[clap(short = 'y', long, group = "structured")]
    pub yaml: bool,

    /// Print the concrete specs as json
    #[clap(short = 'j', long, group = "structured")]
    pub json: bool,

    /// How extensively to traverse the graph when rendering trees
    #[clap(short = 'c', long, default_value = "nodes")]
    pub cover: CoverMode,

    /// Show fully qualified package names
    #[clap(short = 'N', long)]
    pub namespaces: bool,

    /// Show dependency types in rendered trees
    #[clap(short = 't', long)]
    pub types: bool,

    /// Show package digests in rendered trees
    #[clap(short = 'd', long)]
    pub digests: bool,

    /// Show full digests instead of truncated ones
    #[clap(long)]
    pub full_digests: bool,

    /// Log timers for the different solve phases
    #[clap(long)]
    pub timers: bool,

    /// Log statistics from the underlying engine
    #[clap(long)]
    pub stats: bool,
}

#[async_trait::async_trait]
impl Run for Solve {
    type Output = i32;

    async fn run(&mut self) -> Result<Self::Output> {
        // both of these validate user input and must fail before any
        // solver is even constructed
        let views = OutputView::parse_show(&self.show)?;
        let requests = self.resolve_requests()?;

        let unify = self.solver.unify_mode()?;
        let solver = self.solver.get_solver()?;
        self.solve_and_report(&solver, unify, &views, requests)
    }
}

impl CommandArgs for Solve {
    fn get_positional_args(&self) -> Vec<String> {
        self.requests.requests.clone()
    }
}

impl Solve {
    /// Requests come from the active environment or from the command
    /// line, never both.
    fn resolve_requests(&self) -> quarry_cli_common::Result<Vec<Request>> {
        match (active_environment()?, self.requests.requests.is_empty()) {
            (Some(_), false) => Err(Error::ConflictingRequestSource),
            (Some(env), true) => Ok(env.requests),
            (None, _) => self.requests.parse_requests(),
        }
    }

    fn structured_format(&self) -> Option<StructuredFormat> {
        if self.yaml {
            Some(StructuredFormat::Yaml)
        } else if self.json {
            Some(StructuredFormat::Json)
        } else {
            None
        }
    }

    fn tree_format(&self) -> TreeFormat {
        TreeFormat {
            cover: self.cover,
            namespaces: self.namespaces,
            digests: self.digests || self.full_digests,
            digest_len: match self.full_digests {
                true => None,
                false => Some(SHORT_DIGEST_LEN),
            },
            show_types: self.types,
            status: None,
            color: std::io::stdout().is_terminal(),
        }
    }

    fn solve_and_report<E: SolverEngine>(
        &self,
        solver: &Solver<E>,
        unify: UnifyMode,
        views: &BTreeSet<OutputView>,
        requests: Vec<Request>,
    ) -> Result<i32> {
        let options = SolveOptions {
            timers: self.timers,
            stats: self.stats,
            setup_only: views == &BTreeSet::from([OutputView::ProblemText]),
        };
        let mut stdout = std::io::stdout();
        let out: Option<&mut dyn Write> = match views.contains(&OutputView::ProblemText) {
            true => Some(&mut stdout),
            false => None,
        };

        if unify == UnifyMode::WhenPossible {
            for (index, round) in solver.solve_in_rounds(requests, out, options).enumerate() {
                let result = round.map_err(Error::from)?;
                if views.contains(&OutputView::Solutions) {
                    tracing::info!("ROUND {index}");
                } else {
                    println!("% END ROUND {index}");
                }
                if !options.setup_only {
                    warn_if_unusually_long(&result);
                    self.process_result(&result, views)?;
                }
            }
        } else {
            // both remaining policies concretize everything in one
            // joint solver invocation
            let result = solver
                .solve(&requests, out, &options)
                .map_err(Error::from)?;
            if !options.setup_only {
                warn_if_unusually_long(&result);
                self.process_result(&result, views)?;
            }
        }
        Ok(0)
    }

    /// Interpret one result for the selected output views.
    fn process_result(&self, result: &SolveResult, views: &BTreeSet<OutputView>) -> Result<()> {
        // an unsatisfiable result short-circuits all rendering
        result.require_satisfiable().map_err(Error::from)?;

        let structured = self.structured_format();
        // structured serialization is for machine consumption and
        // suppresses the human-readable criteria table
        if views.contains(&OutputView::Criteria) && structured.is_none() {
            tracing::info!("Best of {} considered models.", result.models_considered());
            tracing::info!("Optimization criteria:");
            print!("{}", format_criteria(result.criteria()));
            println!();
        }

        if views.contains(&OutputView::Solutions) {
            let tree_format = self.tree_format();
            for spec in result.specs() {
                match structured {
                    Some(format) => {
                        print!("{}", spec.to_structured(format).map_err(Error::from)?)
                    }
                    None => print!("{}", spec.format_tree(&tree_format)),
                }
            }
            println!();
            if !result.unsolved().is_empty() {
                tracing::info!("Unsolved requests:");
                for request in result.unsolved() {
                    println!("{request}");
                }
                println!();
            }
        }

        if views.contains(&OutputView::RawOutput) {
            print!("{}", result.raw_output());
        }
        Ok(())
    }
}

fn warn_if_unusually_long(result: &SolveResult) {
    let Ok(config) = quarry_config::Config::current() else {
        return;
    };
    let threshold = config.solver.long_solve_threshold;
    let elapsed = result.stats().elapsed;
    if threshold > 0 && elapsed.as_secs() >= threshold {
        tracing::warn!(?elapsed, "this solve took unusually long, > {threshold}s");
    }
}
