// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use rstest::rstest;

use super::{Request, RequestedBy};

#[rstest]
fn test_parse_bare_name() {
    let request = Request::parse("python", RequestedBy::InternalTest).unwrap();
    assert_eq!(request.pkg.as_str(), "python");
    assert!(request.version.is_any());
}

#[rstest]
fn test_parse_with_version() {
    let request = Request::parse("python/3.7", RequestedBy::InternalTest).unwrap();
    assert_eq!(request.pkg.as_str(), "python");
    assert_eq!(request.version.to_string(), "3.7");
    assert!(request.is_satisfied_by(&"3.7.3".parse().unwrap()));
    assert!(!request.is_satisfied_by(&"3.8.0".parse().unwrap()));
}

#[rstest]
#[case("python/")]
#[case("python/abc")]
#[case("Bad-Name/1.0")]
fn test_parse_invalid(#[case] given: &str) {
    assert!(Request::parse(given, RequestedBy::InternalTest).is_err());
}

#[rstest]
fn test_display_roundtrip() {
    let request = Request::parse("python/3.7", RequestedBy::CommandLine).unwrap();
    assert_eq!(request.to_string(), "python/3.7");
    let bare = Request::parse("python", RequestedBy::CommandLine).unwrap();
    assert_eq!(bare.to_string(), "python");
}
