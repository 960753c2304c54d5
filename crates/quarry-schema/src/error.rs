// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use miette::Diagnostic;
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
    #[error("Invalid package name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },
    #[error("Invalid version {given:?}: expected dot-separated numeric parts")]
    InvalidVersion { given: String },
    #[error("Invalid request {given:?}: {reason}")]
    InvalidRequest { given: String, reason: String },
    #[error(transparent)]
    SerdeYaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}
