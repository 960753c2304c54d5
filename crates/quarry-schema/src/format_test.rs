// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::{CoverMode, InstallStatus, TreeFormat};
use crate::{DepKind, ResolvedEdge, ResolvedSpec, Spec};

fn node(yaml: &str, deps: Vec<(DepKind, Arc<ResolvedSpec>)>) -> Arc<ResolvedSpec> {
    let spec: Arc<Spec> = Arc::new(serde_yaml::from_str(yaml).expect("invalid spec yaml"));
    let deps = deps
        .into_iter()
        .map(|(kind, spec)| ResolvedEdge { kind, spec })
        .collect();
    Arc::new(ResolvedSpec::new(spec, deps))
}

/// app -> libpng -> zlib
///     \----------> zlib   (zlib is shared)
#[fixture]
fn diamond() -> Arc<ResolvedSpec> {
    let zlib = node("{pkg: zlib, version: '1.3'}", vec![]);
    let libpng = node(
        "{pkg: libpng, version: '1.6', depends: [{pkg: zlib}]}",
        vec![(DepKind::Run, Arc::clone(&zlib))],
    );
    node(
        "{pkg: app, version: '1.0', namespace: tools, depends: [{pkg: libpng}, {pkg: zlib, kind: build}]}",
        vec![(DepKind::Run, libpng), (DepKind::Build, zlib)],
    )
}

#[rstest]
fn test_tree_nodes_cover_prints_each_package_once(diamond: Arc<ResolvedSpec>) {
    let out = diamond.format_tree(&TreeFormat::default());
    assert_eq!(
        out,
        "app/1.0\n  libpng/1.6\n    zlib/1.3\n",
        "shared dependency must not repeat in nodes cover"
    );
}

#[rstest]
fn test_tree_edges_cover_repeats_shared_nodes(diamond: Arc<ResolvedSpec>) {
    let format = TreeFormat {
        cover: CoverMode::Edges,
        ..Default::default()
    };
    let out = diamond.format_tree(&format);
    assert_eq!(out.matches("zlib/1.3").count(), 2);
}

#[rstest]
fn test_tree_types_and_namespaces(diamond: Arc<ResolvedSpec>) {
    // edges cover, so the shared zlib also shows up under its build edge
    let format = TreeFormat {
        cover: CoverMode::Edges,
        namespaces: true,
        show_types: true,
        ..Default::default()
    };
    let out = diamond.format_tree(&format);
    assert!(out.starts_with("tools.app/1.0\n"));
    assert!(out.contains("(run) libpng/1.6"));
    assert!(out.contains("(run) zlib/1.3"));
    assert!(out.contains("(build) zlib/1.3"));
}

#[rstest]
fn test_tree_digest_lengths(diamond: Arc<ResolvedSpec>) {
    let short = diamond.format_tree(&TreeFormat {
        digests: true,
        ..Default::default()
    });
    let full = diamond.format_tree(&TreeFormat {
        digests: true,
        digest_len: None,
        ..Default::default()
    });
    assert!(short.starts_with(&diamond.digest().short()));
    assert!(full.starts_with(&diamond.digest().to_string()));
    assert!(full.len() > short.len());
}

#[rstest]
fn test_tree_status_markers(diamond: Arc<ResolvedSpec>) {
    let format = TreeFormat {
        status: Some(|node| match node.name().as_str() {
            "zlib" => InstallStatus::Installed,
            _ => InstallStatus::Absent,
        }),
        ..Default::default()
    };
    let out = diamond.format_tree(&format);
    assert!(out.starts_with("[-] "));
    assert!(out.contains("[+]"));
}

#[rstest]
fn test_tree_rendering_is_idempotent(diamond: Arc<ResolvedSpec>) {
    let format = TreeFormat {
        digests: true,
        show_types: true,
        ..Default::default()
    };
    assert_eq!(diamond.format_tree(&format), diamond.format_tree(&format));
}
