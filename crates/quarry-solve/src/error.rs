// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use colored::Colorize;
use itertools::Itertools;
use miette::Diagnostic;
use quarry_schema::{FormatError, Request};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Diagnostic, Debug, Error)]
#[diagnostic(
    url(
        "https://quarry-pm.dev/error_codes#{}",
        self.code().unwrap_or_else(|| Box::new("quarry::generic"))
    )
)]
pub enum Error {
    #[error("Unsatisfiable: no model satisfies {}", format_requests(.requests))]
    Unsatisfiable { requests: Vec<Request> },
    #[error("Solve stalled in round {round}: no progress on {}", format_requests(.requests))]
    RoundProgressStall { round: usize, requests: Vec<Request> },
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("Failed to write problem text: {0}")]
    ProblemTextIo(#[source] std::io::Error),
    #[error(transparent)]
    Schema(#[from] quarry_schema::Error),
    #[error("Error: {0}")]
    String(String),
}

fn format_requests(requests: &[Request]) -> String {
    requests.iter().join(", ")
}

/// An internal failure of the underlying engine, distinct from an
/// unsatisfiable problem.
#[derive(Diagnostic, Debug, Error)]
pub enum EngineError {
    #[error("Malformed problem encoding: {0}")]
    MalformedProblem(String),
    #[error("Solver engine failure: {0}")]
    Internal(String),
}

impl FormatError for Error {
    fn format_error(&self, verbosity: u8) -> String {
        let mut msg = String::new();
        msg.push_str("Failed to solve");
        match self {
            Error::Unsatisfiable { requests } => {
                msg.push_str("\n * no model satisfies: ");
                msg.push_str(&requests.iter().join(", "));
            }
            Error::RoundProgressStall { round, requests } => {
                msg.push_str(&format!(
                    "\n * round {round} made no progress on: {}",
                    requests.iter().join(", ")
                ));
            }
            err => {
                msg.push_str("\n * ");
                msg.push_str(err.to_string().as_str());
            }
        }
        match verbosity {
            0 => {
                msg.push_str(&"\n * try '--verbose/-v' for more info".dimmed().yellow());
            }
            1 => {
                msg.push_str(&"\n * try '-vv' for even more info".dimmed().yellow());
            }
            2 => {
                msg.push_str(&"\n * try '-vvv' for even more info".dimmed().yellow());
            }
            3.. => (),
        }
        msg
    }
}
