// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::path::PathBuf;

use miette::{Context, IntoDiagnostic};
use quarry_schema::{Request, RequestedBy};
use serde::Deserialize;

use crate::Error;

#[cfg(test)]
#[path = "./env_test.rs"]
mod env_test;

/// Names the file holding the active environment's recorded requests.
pub const ACTIVE_ENVIRONMENT_VAR: &str = "QUARRY_ENV";

/// A recorded set of user requests, activated via [`ACTIVE_ENVIRONMENT_VAR`].
#[derive(Clone, Debug)]
pub struct Environment {
    pub name: String,
    pub requests: Vec<Request>,
}

#[derive(Deserialize)]
struct EnvironmentDoc {
    #[serde(default)]
    name: Option<String>,
    requests: Vec<String>,
}

/// Load the active environment, if one is set.
pub fn active_environment() -> crate::Result<Option<Environment>> {
    let Some(path) = std::env::var_os(ACTIVE_ENVIRONMENT_VAR) else {
        return Ok(None);
    };
    let path = PathBuf::from(path);
    let raw = std::fs::read_to_string(&path).map_err(|source| Error::EnvironmentIo {
        path: path.clone(),
        source,
    })?;
    let doc: EnvironmentDoc =
        serde_yaml::from_str(&raw).map_err(|source| Error::InvalidEnvironment {
            path: path.clone(),
            source,
        })?;
    let mut requests = Vec::with_capacity(doc.requests.len());
    for given in doc.requests {
        requests.push(Request::parse(given, RequestedBy::Environment)?);
    }
    let name = doc.name.unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "environment".to_string())
    });
    tracing::debug!(environment = %name, "using requests from active environment");
    Ok(Some(Environment { name, requests }))
}

pub fn configure_logging(verbosity: u8) -> miette::Result<()> {
    use tracing_subscriber::layer::SubscriberExt;

    let mut directives = match verbosity {
        0 => "quarry=info",
        1 => "quarry=debug",
        2 => "quarry=trace",
        _ => "trace",
    }
    .to_string();
    if let Ok(overrides) = std::env::var("QUARRY_LOG") {
        directives = format!("{directives},{overrides}");
    }
    if let Ok(overrides) = std::env::var("RUST_LOG") {
        // we also allow a full override via the RUST_LOG variable for debugging
        directives = overrides;
    }
    let env_filter = tracing_subscriber::filter::EnvFilter::new(directives);
    let registry = tracing_subscriber::Registry::default().with(env_filter);
    let mut fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time();
    if verbosity < 3 {
        fmt_layer = fmt_layer.with_target(false);
    }
    tracing::subscriber::set_global_default(registry.with(fmt_layer))
        .into_diagnostic()
        .wrap_err("Failed to set default logger")
}
