// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::sync::Arc;

use rstest::rstest;

use super::{ResolvedEdge, ResolvedSpec, StructuredFormat};
use crate::{DepKind, Spec};

fn spec(yaml: &str) -> Arc<Spec> {
    Arc::new(serde_yaml::from_str(yaml).expect("invalid spec yaml"))
}

fn leaf(yaml: &str) -> Arc<ResolvedSpec> {
    Arc::new(ResolvedSpec::new(spec(yaml), Vec::new()))
}

#[rstest]
fn test_digest_is_content_addressed() {
    let a = leaf("{pkg: zlib, version: '1.3'}");
    let b = leaf("{pkg: zlib, version: '1.3'}");
    let c = leaf("{pkg: zlib, version: '1.2'}");
    assert_eq!(a.digest(), b.digest());
    assert_ne!(a.digest(), c.digest());
}

#[rstest]
fn test_digest_covers_dependencies() {
    let old = leaf("{pkg: zlib, version: '1.2'}");
    let new = leaf("{pkg: zlib, version: '1.3'}");
    let base = spec("{pkg: app, version: '1.0', depends: [{pkg: zlib}]}");
    let with_old = ResolvedSpec::new(
        Arc::clone(&base),
        vec![ResolvedEdge {
            kind: DepKind::Run,
            spec: old,
        }],
    );
    let with_new = ResolvedSpec::new(
        base,
        vec![ResolvedEdge {
            kind: DepKind::Run,
            spec: new,
        }],
    );
    assert_ne!(with_old.digest(), with_new.digest());
}

#[rstest]
fn test_closure_is_deduplicated_and_ordered() {
    let shared = leaf("{pkg: zlib, version: '1.3'}");
    let mid = Arc::new(ResolvedSpec::new(
        spec("{pkg: libpng, version: '1.6', depends: [{pkg: zlib}]}"),
        vec![ResolvedEdge {
            kind: DepKind::Run,
            spec: Arc::clone(&shared),
        }],
    ));
    let root = Arc::new(ResolvedSpec::new(
        spec("{pkg: app, version: '1.0', depends: [{pkg: libpng}, {pkg: zlib}]}"),
        vec![
            ResolvedEdge {
                kind: DepKind::Run,
                spec: mid,
            },
            ResolvedEdge {
                kind: DepKind::Run,
                spec: shared,
            },
        ],
    ));
    let names: Vec<_> = root
        .closure()
        .iter()
        .map(|node| node.name().to_string())
        .collect();
    assert_eq!(names, vec!["app", "libpng", "zlib"]);
}

#[rstest]
#[case(StructuredFormat::Yaml)]
#[case(StructuredFormat::Json)]
fn test_structured_output_is_deterministic(#[case] format: StructuredFormat) {
    let root = Arc::new(ResolvedSpec::new(
        spec("{pkg: app, version: '1.0', depends: [{pkg: zlib}]}"),
        vec![ResolvedEdge {
            kind: DepKind::Run,
            spec: leaf("{pkg: zlib, version: '1.3'}"),
        }],
    ));
    let first = root.to_structured(format).unwrap();
    let second = root.to_structured(format).unwrap();
    assert_eq!(first, second, "rendering must be idempotent");
    assert!(first.contains(&root.digest().to_string()));
}
