// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

mod config;
mod error;

pub use error::{Error, Result};

pub use self::config::*;
