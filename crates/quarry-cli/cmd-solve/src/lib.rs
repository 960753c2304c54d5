// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

pub mod cmd_solve;

pub use cmd_solve::Solve;
