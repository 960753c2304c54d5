// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use quarry_schema::{PkgNameBuf, Request, Spec, Version};

use crate::{Error, Result};

#[cfg(test)]
#[path = "./catalog_test.rs"]
mod catalog_test;

/// The set of concrete package builds available to a solve.
///
/// Candidates for each package are kept newest-first, so "the first
/// match" is always "the best available version".
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    packages: BTreeMap<PkgNameBuf, Vec<Arc<Spec>>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one concrete build to this catalog.
    pub fn add(&mut self, spec: Spec) {
        let entries = self.packages.entry(spec.pkg.clone()).or_default();
        entries.push(Arc::new(spec));
        entries.sort_by(|a, b| b.version.cmp(&a.version));
        entries.dedup_by(|a, b| a.version == b.version);
    }

    /// All candidates for the named package, newest first.
    pub fn candidates(&self, name: &PkgNameBuf) -> &[Arc<Spec>] {
        self.packages
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Candidates satisfying the given request, newest first.
    pub fn matching(&self, request: &Request) -> Vec<Arc<Spec>> {
        self.candidates(&request.pkg)
            .iter()
            .filter(|spec| request.is_satisfied_by(&spec.version))
            .cloned()
            .collect()
    }

    /// The number of versions behind the newest candidate the given
    /// version is, used as an optimization penalty.
    pub fn version_distance(&self, name: &PkgNameBuf, version: &Version) -> u64 {
        self.candidates(name)
            .iter()
            .position(|spec| spec.version == *version)
            .unwrap_or(0) as u64
    }

    pub fn package_names(&self) -> impl Iterator<Item = &PkgNameBuf> {
        self.packages.keys()
    }

    pub fn len(&self) -> usize {
        self.packages.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Load all spec files (`*.yaml`/`*.yml`) from a directory into
    /// this catalog. Each file holds one spec or a list of specs.
    pub fn load_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        let read_err = |source| Error::CatalogIo {
            path: dir.to_path_buf(),
            source,
        };
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("yaml" | "yml") => paths.push(path),
                _ => {
                    tracing::debug!("skipping non-spec file {}", path.display());
                }
            }
        }
        // directory iteration order is not stable across filesystems
        paths.sort();
        for path in paths {
            let raw = std::fs::read_to_string(&path).map_err(|source| Error::CatalogIo {
                path: path.clone(),
                source,
            })?;
            let specs: Vec<Spec> = match serde_yaml::from_str(&raw) {
                Ok(specs) => specs,
                Err(_) => {
                    let spec: Spec =
                        serde_yaml::from_str(&raw).map_err(|source| Error::InvalidSpecFile {
                            path: path.clone(),
                            source,
                        })?;
                    vec![spec]
                }
            };
            tracing::debug!("loaded {} spec(s) from {}", specs.len(), path.display());
            for spec in specs {
                self.add(spec);
            }
        }
        Ok(())
    }
}
