// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

mod cli;
mod env;
mod error;
pub mod flags;

pub use cli::{CommandArgs, Run};
pub use env::{active_environment, configure_logging, Environment, ACTIVE_ENVIRONMENT_VAR};
pub use error::{Error, Result};
pub use flags::OutputView;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
