// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::path::PathBuf;

use miette::Diagnostic;
use quarry_schema::FormatError;
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
    #[error("Invalid --show option {given:?}, choose from: {expected}")]
    InvalidShowOption { given: String, expected: String },
    #[error("cannot give explicit requests when an environment is active")]
    ConflictingRequestSource,
    #[error("Failed to read environment file {path:?}")]
    EnvironmentIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid environment file {path:?}: {source}")]
    InvalidEnvironment {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error(transparent)]
    Config(#[from] quarry_config::Error),
    #[error(transparent)]
    Schema(#[from] quarry_schema::Error),
    #[error(transparent)]
    Solve(#[from] quarry_solve::Error),
    #[error(transparent)]
    Storage(#[from] quarry_storage::Error),
    #[error("Error: {0}")]
    String(String),
}

impl FormatError for Error {
    fn format_error(&self, verbosity: u8) -> String {
        match self {
            Error::Solve(err) => err.format_error(verbosity),
            err => err.to_string(),
        }
    }
}
