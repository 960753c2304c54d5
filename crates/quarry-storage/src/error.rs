// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::path::PathBuf;

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
    #[error("Failed to read catalog path {path:?}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid spec file {path:?}: {source}")]
    InvalidSpecFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error(transparent)]
    Schema(#[from] quarry_schema::Error),
}
