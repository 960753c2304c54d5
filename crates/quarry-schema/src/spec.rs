// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{PkgNameBuf, Request, RequestedBy, Version, VersionFilter};

#[cfg(test)]
#[path = "./spec_test.rs"]
mod spec_test;

/// The role a dependency plays for the package that declares it.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DepKind {
    #[default]
    Run,
    Build,
}

/// One declared dependency of a concrete package.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Dependency {
    pub pkg: PkgNameBuf,
    #[serde(default, skip_serializing_if = "VersionFilter::is_any")]
    pub version: VersionFilter,
    #[serde(default)]
    pub kind: DepKind,
}

impl Dependency {
    /// The request this dependency places on a solve, attributed to
    /// the declaring package.
    pub fn to_request(&self, parent: &PkgNameBuf) -> Request {
        Request {
            pkg: self.pkg.clone(),
            version: self.version.clone(),
            requested_by: RequestedBy::DependencyOf(parent.clone()),
        }
    }
}

/// One concrete, fully determined package build.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Spec {
    pub pkg: PkgNameBuf,
    pub version: Version,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<Dependency>,
}

impl Spec {
    pub fn ident(&self) -> String {
        format!("{}/{}", self.pkg, self.version)
    }

    /// The package name, qualified by its namespace when one is set.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.pkg),
            None => self.pkg.to_string(),
        }
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ident())
    }
}
