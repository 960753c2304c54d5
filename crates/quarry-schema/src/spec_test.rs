// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use rstest::rstest;

use super::{DepKind, Spec};

#[rstest]
fn test_spec_from_yaml() {
    let spec: Spec = serde_yaml::from_str(
        r#"
pkg: my-app
version: 2.1.0
namespace: tools
options:
  debug: "off"
depends:
  - pkg: python
    version: "3.7"
  - pkg: cmake
    kind: build
"#,
    )
    .unwrap();
    assert_eq!(spec.ident(), "my-app/2.1.0");
    assert_eq!(spec.qualified_name(), "tools.my-app");
    assert_eq!(spec.depends.len(), 2);
    assert_eq!(spec.depends[0].kind, DepKind::Run);
    assert_eq!(spec.depends[1].kind, DepKind::Build);
}

#[rstest]
fn test_dependency_to_request_carries_provenance() {
    let spec: Spec = serde_yaml::from_str("{pkg: my-app, version: '1.0', depends: [{pkg: zlib}]}")
        .unwrap();
    let request = spec.depends[0].to_request(&spec.pkg);
    assert_eq!(request.pkg.as_str(), "zlib");
    assert_eq!(request.requested_by.to_string(), "dependency of my-app");
}

#[rstest]
fn test_spec_yaml_roundtrip() {
    let spec: Spec =
        serde_yaml::from_str("{pkg: my-app, version: '1.0', depends: [{pkg: zlib, version: '1'}]}")
            .unwrap();
    let rendered = serde_yaml::to_string(&spec).unwrap();
    let back: Spec = serde_yaml::from_str(&rendered).unwrap();
    assert_eq!(spec, back);
}
