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
    #[error("Failed to load config: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid unify mode {given:?}, expected one of: all, none, when_possible")]
    InvalidUnifyMode { given: String },
    #[error("Config lock poisoned for read: {0}")]
    LockPoisonedRead(String),
    #[error("Config lock poisoned for write: {0}")]
    LockPoisonedWrite(String),
}
