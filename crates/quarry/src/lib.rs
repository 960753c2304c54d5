// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

pub use quarry_config as config;
pub use quarry_schema as schema;
pub use quarry_solve as solve;
pub use quarry_storage as storage;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
