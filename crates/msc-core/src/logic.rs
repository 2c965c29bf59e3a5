// Dweve MSC - SocialCalc save format validator
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Formula graph analysis.
//!
//! Runs after every line has been seen, over the formulas registered by the
//! line pass:
//!
//! 1. references to undeclared cells (warning)
//! 2. circular references (error)
//! 3. malformed range endpoints (error)
//!
//! Diagnostics are attached to the line of the cell they concern.

use crate::context::ValidationContext;
use crate::diagnostic::Level;
use crate::formula;
use crate::lex;
use crate::registry::CellRegistry;
use std::collections::HashSet;
use tracing::debug;

/// Run all logic checks.
pub fn validate(ctx: &mut ValidationContext) {
    check_references(ctx);
    detect_cycles(ctx);
    check_ranges(ctx);
}

/// Warn about formula references to cells that were never declared.
pub fn check_references(ctx: &mut ValidationContext) {
    ctx.trace(format_args!("Checking cell references..."));

    for cell in ctx.cells.formula_cells() {
        let Some(source) = cell.formula.as_deref() else {
            continue;
        };
        for reference in formula::extract_refs(source) {
            ctx.stats.logic_checks += 1;
            if !ctx.cells.contains(reference) {
                ctx.diagnostics.warning(
                    cell.source_line,
                    Level::Logic,
                    format!(
                        "Cell {}: formula references undefined cell {}",
                        cell.coordinate, reference
                    ),
                );
            }
        }
    }
}

/// One cell on the traversal stack.
struct Frame<'a> {
    coord: &'a str,
    refs: Vec<&'a str>,
    next: usize,
}

impl<'a> Frame<'a> {
    fn enter(cells: &'a CellRegistry, coord: &'a str) -> Self {
        Self {
            coord,
            refs: cells.formula(coord).map(formula::extract_refs).unwrap_or_default(),
            next: 0,
        }
    }
}

/// Depth-first search from `root` for a path back onto the current stack.
///
/// Every cell entered is added to `visited` and never entered again, from
/// this root or a later one. Returns the cycle path, ending with the cell
/// that closes it.
fn find_cycle<'a>(
    cells: &'a CellRegistry,
    root: &'a str,
    visited: &mut HashSet<&'a str>,
    edges_followed: &mut usize,
) -> Option<Vec<&'a str>> {
    let mut in_progress: HashSet<&'a str> = HashSet::new();
    let mut stack = vec![Frame::enter(cells, root)];
    visited.insert(root);
    in_progress.insert(root);

    while let Some(frame) = stack.last_mut() {
        let Some(&target) = frame.refs.get(frame.next) else {
            in_progress.remove(frame.coord);
            stack.pop();
            continue;
        };
        frame.next += 1;
        *edges_followed += 1;

        if in_progress.contains(target) {
            let mut path: Vec<&str> = stack.iter().map(|f| f.coord).collect();
            path.push(target);
            return Some(path);
        }
        if visited.insert(target) {
            in_progress.insert(target);
            stack.push(Frame::enter(cells, target));
        }
    }

    None
}

/// Report circular references between formula cells.
///
/// Roots are tried in formula-registration order. A cycle found from a root
/// ends that root's traversal.
pub fn detect_cycles(ctx: &mut ValidationContext) {
    ctx.trace(format_args!("Checking for circular references..."));

    let cells = &ctx.cells;
    let mut visited: HashSet<&str> = HashSet::new();

    for root in cells.formula_cells() {
        let root = root.coordinate.as_str();
        if visited.contains(root) {
            continue;
        }

        let Some(path) = find_cycle(cells, root, &mut visited, &mut ctx.stats.logic_checks) else {
            continue;
        };
        debug!(root, length = path.len(), "circular reference");

        let closing = path.last().copied().unwrap_or(root);
        let line = cells.get(closing).map_or(0, |cell| cell.source_line);
        ctx.diagnostics.error(
            line,
            Level::Logic,
            format!("Circular reference detected: {}", path.join(" → ")),
        );
    }
}

/// Check both endpoints of every `A1:B2` range in each formula.
pub fn check_ranges(ctx: &mut ValidationContext) {
    ctx.trace(format_args!("Validating ranges..."));

    for cell in ctx.cells.formula_cells() {
        let Some(source) = cell.formula.as_deref() else {
            continue;
        };
        for range in formula::extract_ranges(source) {
            ctx.stats.logic_checks += 1;
            let valid = range
                .split_once(':')
                .map_or(false, |(start, end)| lex::is_valid_coord(start) && lex::is_valid_coord(end));
            if !valid {
                ctx.diagnostics.error(
                    cell.source_line,
                    Level::Logic,
                    format!("Cell {}: invalid range {}", cell.coordinate, range),
                );
            }
        }
    }
}
