// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

mod catalog;

pub use catalog::{CatalogEngine, DEFAULT_MAX_MODELS};
