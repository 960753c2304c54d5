// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::fmt::Write;

use colored::{Color, Colorize};

use crate::result::{Criterion, CriterionCost, CriterionKind};

#[cfg(test)]
#[path = "./io_test.rs"]
mod io_test;

const COST_COLUMN_WIDTH: usize = 4;

fn highlight(value: u64, color: Color) -> String {
    let cell = format!("{value:<width$}", width = COST_COLUMN_WIDTH);
    match value {
        0 => cell,
        _ => cell.color(color).to_string(),
    }
}

fn kind_color(kind: CriterionKind) -> Option<Color> {
    match kind {
        CriterionKind::Build => Some(Color::Cyan),
        CriterionKind::Reuse => Some(Color::Blue),
        CriterionKind::Fixed => Some(Color::Green),
        CriterionKind::General => None,
    }
}

/// Render an optimization criteria table.
///
/// One fixed-width column per dependency depth, followed by the
/// criterion name. Non-zero (costly) entries are emphasized, and
/// names are tinted by their criterion category. Insertion order of
/// the criteria is preserved.
pub fn format_criteria(criteria: &[Criterion]) -> String {
    let max_depth = criteria
        .iter()
        .map(|criterion| criterion.cost.depth())
        .max()
        .unwrap_or(1);

    let mut header = String::new();
    for depth in 0..max_depth {
        let _ = write!(header, "{depth:<width$}", width = COST_COLUMN_WIDTH);
    }
    header.push_str("Criterion");

    let mut out = String::new();
    let _ = writeln!(out, "{}", header.bold());
    for criterion in criteria {
        match &criterion.cost {
            CriterionCost::Total(value) => {
                out.push_str(&highlight(*value, Color::Green));
                out.push_str(&" ".repeat(COST_COLUMN_WIDTH * (max_depth - 1)));
            }
            CriterionCost::PerDepth(values) => {
                let color = match criterion.kind {
                    CriterionKind::Build => Color::Cyan,
                    _ => Color::Blue,
                };
                for depth in 0..max_depth {
                    match values.get(depth) {
                        Some(value) => out.push_str(&highlight(*value, color)),
                        None => out.push_str(&" ".repeat(COST_COLUMN_WIDTH)),
                    }
                }
            }
        }
        match kind_color(criterion.kind) {
            Some(color) => out.push_str(&criterion.name.as_str().color(color).to_string()),
            None => out.push_str(&criterion.name),
        }
        out.push('\n');
    }
    out
}
