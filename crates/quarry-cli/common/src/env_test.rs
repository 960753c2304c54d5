// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::io::Write;

use rstest::{fixture, rstest};
use serial_test::serial;

use super::{active_environment, ACTIVE_ENVIRONMENT_VAR};
use crate::Error;

#[fixture]
pub fn tmpdir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("quarry-test-")
        .tempdir()
        .expect("create a temp directory for test files")
}

fn with_env_file<R>(tmpdir: &tempfile::TempDir, content: &[u8], run: impl FnOnce() -> R) -> R {
    let path = tmpdir.path().join("dev.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content).unwrap();
    // Safety: serialized with other env-mutating tests via #[serial].
    unsafe { std::env::set_var(ACTIVE_ENVIRONMENT_VAR, &path) };
    let out = run();
    unsafe { std::env::remove_var(ACTIVE_ENVIRONMENT_VAR) };
    out
}

#[rstest]
#[serial]
fn test_no_environment_by_default() {
    // Safety: serialized with other env-mutating tests via #[serial].
    unsafe { std::env::remove_var(ACTIVE_ENVIRONMENT_VAR) };
    assert!(active_environment().unwrap().is_none());
}

#[rstest]
#[serial]
fn test_environment_requests_are_loaded(tmpdir: tempfile::TempDir) {
    let env = with_env_file(
        &tmpdir,
        b"requests: [\"python/3.7\", \"gcc\"]\n",
        || active_environment().unwrap().unwrap(),
    );
    assert_eq!(env.name, "dev");
    assert_eq!(env.requests.len(), 2);
    assert_eq!(env.requests[0].to_string(), "python/3.7");
    assert_eq!(
        env.requests[0].requested_by.to_string(),
        "active environment"
    );
}

#[rstest]
#[serial]
fn test_environment_name_can_be_recorded(tmpdir: tempfile::TempDir) {
    let env = with_env_file(
        &tmpdir,
        b"name: production\nrequests: [\"zlib\"]\n",
        || active_environment().unwrap().unwrap(),
    );
    assert_eq!(env.name, "production");
}

#[rstest]
#[serial]
fn test_malformed_environment_is_an_error(tmpdir: tempfile::TempDir) {
    let err = with_env_file(&tmpdir, b"requests: {not: a list}\n", || {
        active_environment().unwrap_err()
    });
    assert!(matches!(err, Error::InvalidEnvironment { .. }));
}

#[rstest]
#[serial]
fn test_missing_environment_file_is_an_error() {
    // Safety: serialized with other env-mutating tests via #[serial].
    unsafe { std::env::set_var(ACTIVE_ENVIRONMENT_VAR, "/no/such/env.yaml") };
    let res = active_environment();
    unsafe { std::env::remove_var(ACTIVE_ENVIRONMENT_VAR) };
    assert!(matches!(res.unwrap_err(), Error::EnvironmentIo { .. }));
}
