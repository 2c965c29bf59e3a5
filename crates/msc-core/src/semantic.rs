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

//! Semantic checks: style cross-references and formula shape.
//!
//! Style definitions are collected in a pass of their own before any cell is
//! looked at, so a cell may reference a style declared further down the file.

use crate::context::ValidationContext;
use crate::diagnostic::Level;
use crate::formula::{self, FormulaIssue};
use crate::line::{self, Borders, CellAttr, LineKind};
use crate::registry::StyleCategory;

/// Register every style definition in the document.
///
/// Blank lines and lines that are not style lines are skipped. A style line
/// whose id is empty is not registered; its grammar is reported later by the
/// line pass.
pub fn collect_style_definitions(ctx: &mut ValidationContext, lines: &[&str]) {
    for raw in lines {
        let Some((LineKind::Style(category), rest)) = line::classify(raw.trim()) else {
            continue;
        };
        if let Some((id, definition)) = line::split_definition(rest) {
            if !id.is_empty() {
                ctx.styles.insert(category, id, definition);
            }
        }
    }

    for category in StyleCategory::ALL {
        ctx.trace(format_args!(
            "  Found {} {}",
            ctx.styles.count(category),
            category.plural()
        ));
    }
}

/// Style namespace and message label for a single-id style attribute.
fn style_target(attr: CellAttr<'_>) -> Option<(StyleCategory, &'static str)> {
    match attr {
        CellAttr::Font => Some((StyleCategory::Font, "font")),
        CellAttr::Color => Some((StyleCategory::Color, "color")),
        CellAttr::Background => Some((StyleCategory::Color, "background color")),
        CellAttr::CellFormat => Some((StyleCategory::CellFormat, "cellformat")),
        CellAttr::Layout => Some((StyleCategory::Layout, "layout")),
        CellAttr::NumberValueFormat | CellAttr::TextValueFormat => {
            Some((StyleCategory::ValueFormat, "valueformat"))
        }
        _ => None,
    }
}

/// Check that a style attribute's id is defined.
///
/// Returns `false` if `attr` is not a style reference.
pub fn check_style_reference(ctx: &mut ValidationContext, coord: &str, attr: CellAttr<'_>, id: &str) -> bool {
    let Some((category, label)) = style_target(attr) else {
        return false;
    };
    if !ctx.options.enable_semantic_level {
        return true;
    }

    ctx.stats.semantic_checks += 1;
    if !ctx.styles.contains(category, id) {
        ctx.error(
            Level::Semantic,
            format!(
                "Cell {}: {} {} not defined. Add '{}:{}:...' line",
                coord,
                label,
                id,
                category.line_type(),
                id
            ),
        );
    }
    true
}

/// Check the four border ids of a `b` attribute. Side id `0` is always valid.
pub fn check_borders(ctx: &mut ValidationContext, coord: &str, borders: &Borders<'_>) {
    if !ctx.options.enable_semantic_level {
        return;
    }

    ctx.stats.semantic_checks += 1;
    for (side, id) in borders.sides() {
        if id != Borders::NONE && !ctx.styles.contains(StyleCategory::Border, id) {
            ctx.error(
                Level::Semantic,
                format!(
                    "Cell {}: {} border {} not defined. Add 'border:{}:...' line",
                    coord, side, id, id
                ),
            );
        }
    }
}

/// Basic shape check of a decoded formula.
pub fn check_formula(ctx: &mut ValidationContext, coord: &str, formula: &str) {
    if !ctx.options.enable_semantic_level {
        return;
    }

    ctx.stats.semantic_checks += 1;
    for issue in formula::check_basic_syntax(formula) {
        match issue {
            FormulaIssue::UnbalancedParentheses => ctx.error(
                Level::Semantic,
                format!("Cell {}: unbalanced parentheses in formula", coord),
            ),
            FormulaIssue::UnknownFunction(name) => ctx.warning(
                Level::Semantic,
                format!("Cell {}: unknown function '{}' in formula", coord, name),
            ),
        }
    }
}
