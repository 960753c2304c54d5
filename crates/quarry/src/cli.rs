// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry
//! Main entry point for the quarry command line interface.

use clap::{Parser, Subcommand};
use colored::Colorize;
use miette::Result;
use quarry_cli_common::{configure_logging, CommandArgs, Error, Run};
use quarry_cmd_solve::cmd_solve;
use quarry_schema::FormatError;

/// A package concretizer for reproducible environments
#[derive(Parser)]
#[clap(about, version)]
pub struct Opt {
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[clap(subcommand)]
    pub cmd: Command,
}

impl Opt {
    pub async fn run(&mut self) -> Result<i32> {
        if let Err(err) = configure_logging(self.verbose) {
            eprintln!("{}", err.to_string().red());
            return Ok(1);
        }
        self.cmd.run().await
    }
}

#[derive(Subcommand)]
pub enum Command {
    Solve(cmd_solve::Solve),
    Version(cmd_version::Version),
}

// At the time of writing, enum_dispatch is not working to generate this
// code for traits that are defined in an external crate.

#[async_trait::async_trait]
impl Run for Command {
    type Output = i32;

    async fn run(&mut self) -> Result<i32> {
        match self {
            Command::Solve(cmd) => cmd.run().await,
            Command::Version(cmd) => cmd.run().await,
        }
    }
}

impl CommandArgs for Command {
    fn get_positional_args(&self) -> Vec<String> {
        match self {
            Command::Solve(cmd) => cmd.get_positional_args(),
            Command::Version(cmd) => cmd.get_positional_args(),
        }
    }
}

mod cmd_version {
    use clap::Args;
    use miette::Result;
    use quarry_cli_common::{CommandArgs, Run};

    /// Print the version of quarry
    #[derive(Args)]
    pub struct Version {}

    #[async_trait::async_trait]
    impl Run for Version {
        type Output = i32;

        async fn run(&mut self) -> Result<Self::Output> {
            println!("{}", quarry_cli_common::VERSION);
            Ok(0)
        }
    }

    impl CommandArgs for Version {
        fn get_positional_args(&self) -> Vec<String> {
            Vec::new()
        }
    }
}

#[tokio::main]
async fn main() {
    let mut opts = Opt::parse();
    let code = match opts.run().await {
        Ok(code) => code,
        Err(err) => {
            match err.downcast_ref::<Error>() {
                Some(err) => eprintln!("{}", err.format_error(opts.verbose)),
                None => tracing::error!("{:?}", err),
            }
            1
        }
    };
    std::process::exit(code);
}
