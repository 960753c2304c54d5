// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use data_encoding::BASE32_NOPAD;
use serde::Serialize;

use crate::{DepKind, PkgNameBuf, Result, Spec, Version};

#[cfg(test)]
#[path = "./resolved_test.rs"]
mod resolved_test;

pub const DIGEST_SIZE: usize = 32;

/// Number of digest characters shown in human-readable output by default.
pub const SHORT_DIGEST_LEN: usize = 8;

/// Content digest of a resolved spec and its dependency closure.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// Render this digest truncated to the given length, or in full.
    pub fn truncated(&self, len: Option<usize>) -> String {
        let full = self.to_string();
        match len {
            Some(len) if len < full.len() => full[..len].to_string(),
            _ => full,
        }
    }

    pub fn short(&self) -> String {
        self.truncated(Some(SHORT_DIGEST_LEN))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&BASE32_NOPAD.encode(&self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Digest").field(&self.to_string()).finish()
    }
}

/// A resolved dependency edge.
#[derive(Clone, Debug)]
pub struct ResolvedEdge {
    pub kind: DepKind,
    pub spec: Arc<ResolvedSpec>,
}

/// One node of a concretized spec graph.
///
/// Nodes are immutable once built. The digest is computed at
/// construction over the spec body and the digests of all resolved
/// dependencies, so identical subgraphs share a digest no matter how
/// they were produced.
#[derive(Clone, Debug)]
pub struct ResolvedSpec {
    spec: Arc<Spec>,
    deps: Vec<ResolvedEdge>,
    digest: Digest,
}

impl ResolvedSpec {
    pub fn new(spec: Arc<Spec>, deps: Vec<ResolvedEdge>) -> Self {
        let digest = Self::compute_digest(&spec, &deps);
        Self { spec, deps, digest }
    }

    fn compute_digest(spec: &Spec, deps: &[ResolvedEdge]) -> Digest {
        let mut ctx = ring::digest::Context::new(&ring::digest::SHA256);
        let body = serde_json::to_vec(spec).expect("a spec always serializes");
        ctx.update(&body);
        let mut edges: Vec<_> = deps
            .iter()
            .map(|edge| (edge.kind, edge.spec.digest))
            .collect();
        edges.sort();
        for (kind, digest) in edges {
            ctx.update(kind.to_string().as_bytes());
            ctx.update(&digest.0);
        }
        let value = ctx.finish();
        let mut bytes = [0u8; DIGEST_SIZE];
        bytes.copy_from_slice(value.as_ref());
        Digest(bytes)
    }

    pub fn spec(&self) -> &Arc<Spec> {
        &self.spec
    }

    pub fn name(&self) -> &PkgNameBuf {
        &self.spec.pkg
    }

    pub fn version(&self) -> &Version {
        &self.spec.version
    }

    pub fn deps(&self) -> &[ResolvedEdge] {
        &self.deps
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// All nodes of this graph in first-visit depth-first order,
    /// starting with this node.
    pub fn closure(self: &Arc<Self>) -> Vec<Arc<ResolvedSpec>> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        let mut stack = vec![Arc::clone(self)];
        while let Some(node) = stack.pop() {
            if !seen.insert(*node.digest()) {
                continue;
            }
            for edge in node.deps().iter().rev() {
                stack.push(Arc::clone(&edge.spec));
            }
            out.push(node);
        }
        out
    }

    /// Serialize the full resolved graph, including the DAG content
    /// digest, to the requested structured format.
    pub fn to_structured(self: &Arc<Self>, format: StructuredFormat) -> Result<String> {
        let nodes = self.closure();
        let doc = StructuredDoc {
            root: self.digest.to_string(),
            nodes: nodes
                .iter()
                .map(|node| StructuredNode {
                    digest: node.digest.to_string(),
                    pkg: &node.spec.pkg,
                    version: &node.spec.version,
                    namespace: node.spec.namespace.as_deref(),
                    options: &node.spec.options,
                    depends: node
                        .deps
                        .iter()
                        .map(|edge| StructuredEdge {
                            kind: edge.kind,
                            digest: edge.spec.digest.to_string(),
                        })
                        .collect(),
                })
                .collect(),
        };
        match format {
            StructuredFormat::Yaml => Ok(serde_yaml::to_string(&doc)?),
            StructuredFormat::Json => {
                let mut out = serde_json::to_string_pretty(&doc)?;
                out.push('\n');
                Ok(out)
            }
        }
    }
}

/// Machine-readable serialization formats for resolved graphs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StructuredFormat {
    Yaml,
    Json,
}

#[derive(Serialize)]
struct StructuredEdge {
    kind: DepKind,
    digest: String,
}

#[derive(Serialize)]
struct StructuredNode<'a> {
    digest: String,
    pkg: &'a PkgNameBuf,
    version: &'a Version,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    options: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    depends: Vec<StructuredEdge>,
}

#[derive(Serialize)]
struct StructuredDoc<'a> {
    root: String,
    nodes: Vec<StructuredNode<'a>>,
}
