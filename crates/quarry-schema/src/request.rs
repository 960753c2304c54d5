// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::fmt;

use crate::{Error, PkgNameBuf, Result, Version, VersionFilter};

#[cfg(test)]
#[path = "./request_test.rs"]
mod request_test;

/// Records what caused a request to exist.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum RequestedBy {
    /// Given directly on the command line.
    CommandLine,
    /// Recorded in the active environment.
    Environment,
    /// Declared as a dependency of the named package.
    DependencyOf(PkgNameBuf),
    /// Only for quarry's own unit tests, when provenance is irrelevant.
    InternalTest,
}

impl fmt::Display for RequestedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandLine => f.write_str("command line"),
            Self::Environment => f.write_str("active environment"),
            Self::DependencyOf(name) => write!(f, "dependency of {name}"),
            Self::InternalTest => f.write_str("internal test"),
        }
    }
}

/// An abstract request for a package, possibly version-constrained.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Request {
    pub pkg: PkgNameBuf,
    pub version: VersionFilter,
    pub requested_by: RequestedBy,
}

impl Request {
    /// Parse a request from its `name` or `name/version` form.
    pub fn parse<S: AsRef<str>>(given: S, requested_by: RequestedBy) -> Result<Self> {
        let given = given.as_ref();
        let (name, version) = match given.split_once('/') {
            Some((_, "")) => {
                return Err(Error::InvalidRequest {
                    given: given.to_string(),
                    reason: "missing version after '/'".to_string(),
                });
            }
            Some((name, version)) => (name, version.parse()?),
            None => (given, VersionFilter::any()),
        };
        Ok(Self {
            pkg: name.parse()?,
            version,
            requested_by,
        })
    }

    pub fn is_satisfied_by(&self, version: &Version) -> bool {
        self.version.matches(version)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_any() {
            write!(f, "{}", self.pkg)
        } else {
            write!(f, "{}/{}", self.pkg, self.version)
        }
    }
}
