// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

mod catalog;
mod error;

pub use catalog::Catalog;
pub use error::{Error, Result};
