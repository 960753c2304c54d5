// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry
//! Main entry points and utilities for command line interface and interaction.

use miette::Result;

/// Trait all cli commands must implement to be runnable.
#[async_trait::async_trait]
pub trait Run {
    type Output;

    async fn run(&mut self) -> Result<Self::Output>;
}

/// Trait all cli commands must implement to provide a list of the
/// "request" equivalent values from their command lines.
pub trait CommandArgs {
    /// Get a string list of the important positional arguments for
    /// the command that may help distinguish it from another instance
    /// of the same command. If there are no positional arguments,
    /// this will return an empty list.
    fn get_positional_args(&self) -> Vec<String>;
}
