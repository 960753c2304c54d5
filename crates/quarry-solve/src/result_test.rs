// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use rstest::rstest;

use super::SolveResult;
use crate::engine::{Model, Outcome};
use crate::{request, Error};

fn model(cost: Vec<u64>) -> Model {
    Model {
        cost,
        resolved: Vec::new(),
        criteria: Vec::new(),
        unsolved: Vec::new(),
    }
}

#[rstest]
fn test_answers_are_sorted_even_if_the_engine_misbehaves() {
    let outcome = Outcome {
        models: vec![model(vec![2, 0]), model(vec![0, 5]), model(vec![0, 1])],
        considered: 3,
        ..Default::default()
    };
    let result = SolveResult::from_outcome(outcome, &[]);
    let costs: Vec<_> = result.answers().iter().map(|a| a.cost.clone()).collect();
    assert_eq!(costs, vec![vec![0, 1], vec![0, 5], vec![2, 0]]);
}

#[rstest]
fn test_unsatisfiable_result_reports_the_requests() {
    let requests = vec![request!("python/3.7"), request!("gcc")];
    let result = SolveResult::from_outcome(Outcome::default(), &requests);
    assert!(!result.is_satisfiable());
    assert_eq!(result.unsolved(), requests.as_slice());
    match result.require_satisfiable().unwrap_err() {
        Error::Unsatisfiable { requests: reported } => assert_eq!(reported, requests),
        err => panic!("expected an unsatisfiable error, got {err}"),
    }
}

#[rstest]
fn test_satisfiable_result_passes_the_check() {
    let outcome = Outcome {
        models: vec![model(vec![0])],
        considered: 1,
        ..Default::default()
    };
    let result = SolveResult::from_outcome(outcome, &[]);
    result.require_satisfiable().unwrap();
}

#[rstest]
fn test_setup_only_results_are_inert() {
    let result = SolveResult::setup_only(vec![request!("python")]);
    assert!(result.is_setup_only());
    assert!(!result.is_satisfiable());
    assert_eq!(result.models_considered(), 0);
}
