// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use rstest::rstest;

use super::PkgNameBuf;

#[rstest]
#[case("python")]
#[case("my-pkg")]
#[case("pkg2")]
#[case("2fast")]
fn test_valid_names(#[case] name: &str) {
    name.parse::<PkgNameBuf>().expect("should be a valid name");
}

#[rstest]
#[case("")]
#[case("UpperCase")]
#[case("has_underscore")]
#[case("-leading")]
#[case("trailing-")]
#[case("has space")]
fn test_invalid_names(#[case] name: &str) {
    assert!(name.parse::<PkgNameBuf>().is_err());
}

#[rstest]
fn test_name_roundtrip_serde() {
    let name: PkgNameBuf = "my-pkg".parse().unwrap();
    let yaml = serde_yaml::to_string(&name).unwrap();
    let back: PkgNameBuf = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(name, back);
}

#[rstest]
fn test_invalid_name_rejected_in_serde() {
    let res: Result<PkgNameBuf, _> = serde_yaml::from_str("Bad_Name");
    assert!(res.is_err());
}
