// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::collections::BTreeSet;
use std::fmt::Write;
use std::sync::Arc;

use colored::Colorize;

use crate::{DepKind, Digest, ResolvedSpec, SHORT_DIGEST_LEN};

#[cfg(test)]
#[path = "./format_test.rs"]
mod format_test;

/// Formats an error with hints appropriate for the given verbosity.
pub trait FormatError {
    fn format_error(&self, verbosity: u8) -> String;
}

/// How extensively a resolved graph is traversed when rendering.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CoverMode {
    /// Each unique package appears once.
    #[default]
    Nodes,
    /// Each package is expanded once but reappears for every edge.
    Edges,
    /// Every path through the graph is shown in full.
    Paths,
}

/// Local install state reported by a status callback.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InstallStatus {
    Installed,
    Absent,
}

pub type StatusFn = fn(&ResolvedSpec) -> InstallStatus;

/// Options controlling tree rendering of a resolved graph.
#[derive(Clone)]
pub struct TreeFormat {
    pub cover: CoverMode,
    /// Show fully qualified (namespaced) package names.
    pub namespaces: bool,
    /// Prefix each row with the node's content digest.
    pub digests: bool,
    /// Number of digest characters to show; `None` means full digests.
    pub digest_len: Option<usize>,
    /// Show the dependency type of each edge.
    pub show_types: bool,
    pub status: Option<StatusFn>,
    pub color: bool,
}

impl Default for TreeFormat {
    fn default() -> Self {
        Self {
            cover: CoverMode::default(),
            namespaces: false,
            digests: false,
            digest_len: Some(SHORT_DIGEST_LEN),
            show_types: false,
            status: None,
            color: false,
        }
    }
}

impl ResolvedSpec {
    /// Render this resolved graph as an indented tree.
    ///
    /// Output is deterministic for a given graph and format.
    pub fn format_tree(self: &Arc<Self>, format: &TreeFormat) -> String {
        let mut renderer = TreeRenderer {
            format,
            out: String::new(),
            seen: BTreeSet::new(),
            expanded: BTreeSet::new(),
            path: Vec::new(),
        };
        renderer.render(self, None, 0);
        renderer.out
    }
}

struct TreeRenderer<'f> {
    format: &'f TreeFormat,
    out: String,
    seen: BTreeSet<Digest>,
    expanded: BTreeSet<Digest>,
    // Digests of ancestors in the current traversal, to break cycles
    // in paths mode.
    path: Vec<Digest>,
}

impl TreeRenderer<'_> {
    fn render(&mut self, node: &Arc<ResolvedSpec>, kind: Option<DepKind>, depth: usize) {
        let digest = *node.digest();
        if self.format.cover == CoverMode::Nodes && !self.seen.insert(digest) {
            return;
        }
        self.render_row(node, kind, depth);
        let descend = match self.format.cover {
            CoverMode::Nodes => true,
            CoverMode::Edges => self.expanded.insert(digest),
            CoverMode::Paths => !self.path.contains(&digest),
        };
        if !descend {
            return;
        }
        self.path.push(digest);
        for edge in node.deps() {
            self.render(&edge.spec, Some(edge.kind), depth + 1);
        }
        self.path.pop();
    }

    fn render_row(&mut self, node: &Arc<ResolvedSpec>, kind: Option<DepKind>, depth: usize) {
        if let Some(status) = self.format.status {
            let marker = match (status(node), self.format.color) {
                (InstallStatus::Installed, true) => "[+]".green().to_string(),
                (InstallStatus::Installed, false) => "[+]".to_string(),
                (InstallStatus::Absent, true) => "[-]".red().to_string(),
                (InstallStatus::Absent, false) => "[-]".to_string(),
            };
            let _ = write!(self.out, "{marker} ");
        }
        if self.format.digests {
            let digest = node.digest().truncated(self.format.digest_len);
            if self.format.color {
                let _ = write!(self.out, "{} ", digest.dimmed());
            } else {
                let _ = write!(self.out, "{digest} ");
            }
        }
        self.out.push_str(&"  ".repeat(depth));
        if self.format.show_types
            && let Some(kind) = kind
        {
            let tag = format!("({kind}) ");
            if self.format.color {
                let _ = write!(self.out, "{}", tag.cyan());
            } else {
                self.out.push_str(&tag);
            }
        }
        let name = match self.format.namespaces {
            true => node.spec().qualified_name(),
            false => node.name().to_string(),
        };
        let ident = format!("{name}/{}", node.version());
        if self.format.color {
            let _ = write!(self.out, "{}", ident.bold());
        } else {
            self.out.push_str(&ident);
        }
        self.out.push('\n');
    }
}
