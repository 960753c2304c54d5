// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use rstest::rstest;
use serial_test::serial;

use super::format_criteria;
use crate::result::{Criterion, CriterionCost, CriterionKind};

fn strip(rendered: &str) -> String {
    String::from_utf8(strip_ansi_escapes::strip(rendered)).unwrap()
}

fn sample_criteria() -> Vec<Criterion> {
    vec![
        Criterion {
            name: "a".to_string(),
            kind: CriterionKind::General,
            cost: CriterionCost::Total(0),
        },
        Criterion {
            name: "b".to_string(),
            kind: CriterionKind::General,
            cost: CriterionCost::PerDepth(vec![0, 3]),
        },
    ]
}

#[rstest]
#[serial]
fn test_depth_columns_and_layout() {
    colored::control::set_override(true);
    let rendered = format_criteria(&sample_criteria());
    colored::control::unset_override();

    let plain = strip(&rendered);
    let lines: Vec<_> = plain.lines().collect();
    assert_eq!(
        lines,
        vec!["0   1   Criterion", "0       a", "0   3   b"],
        "max depth of 2 gives two depth columns"
    );
}

#[rstest]
#[serial]
fn test_only_costly_entries_are_emphasized() {
    colored::control::set_override(true);
    let rendered = format_criteria(&sample_criteria());
    colored::control::unset_override();

    let lines: Vec<_> = rendered.lines().collect();
    assert!(
        !lines[1].contains('\x1b'),
        "an all-zero row gets no emphasis"
    );
    assert!(
        lines[2].contains('\x1b'),
        "the non-zero entry must be emphasized"
    );
    // within the emphasized row, the zero column stays plain
    let (before_escape, _) = lines[2].split_once('\x1b').unwrap();
    assert_eq!(before_escape, "0   ");
}

#[rstest]
#[serial]
fn test_names_are_tinted_by_kind_not_by_text() {
    let criteria = vec![
        Criterion {
            // a name that merely looks build-related gets no tint
            name: "build: misleading name".to_string(),
            kind: CriterionKind::General,
            cost: CriterionCost::Total(0),
        },
        Criterion {
            name: "plain name".to_string(),
            kind: CriterionKind::Build,
            cost: CriterionCost::Total(0),
        },
    ];
    colored::control::set_override(true);
    let rendered = format_criteria(&criteria);
    colored::control::unset_override();

    let lines: Vec<_> = rendered.lines().collect();
    assert!(!lines[1].contains('\x1b'));
    assert!(lines[2].contains('\x1b'));
}

#[rstest]
#[serial]
fn test_rendering_does_not_mutate_and_is_deterministic() {
    let criteria = sample_criteria();
    let snapshot = criteria.clone();
    let first = format_criteria(&criteria);
    let second = format_criteria(&criteria);
    assert_eq!(first, second);
    assert_eq!(criteria.len(), snapshot.len());
    for (a, b) in criteria.iter().zip(snapshot.iter()) {
        assert_eq!(a.cost, b.cost);
        assert_eq!(a.name, b.name);
    }
}

#[rstest]
#[serial]
fn test_all_scalar_criteria_take_one_column() {
    let criteria = vec![Criterion {
        name: "only".to_string(),
        kind: CriterionKind::Fixed,
        cost: CriterionCost::Total(2),
    }];
    colored::control::set_override(false);
    let rendered = format_criteria(&criteria);
    colored::control::unset_override();
    let plain = strip(&rendered);
    assert_eq!(plain.lines().next().unwrap(), "0   Criterion");
    assert_eq!(plain.lines().nth(1).unwrap(), "2   only");
}
