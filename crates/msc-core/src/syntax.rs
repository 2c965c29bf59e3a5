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

//! Version check and per-line grammar.
//!
//! Every check here reports at [`Level::Syntax`]. Cell lines additionally
//! hand their style references and formulas to [`crate::semantic`], and
//! register cells and named ranges for the logic pass.

use crate::context::ValidationContext;
use crate::diagnostic::Level;
use crate::formula;
use crate::lex;
use crate::line::{self, AttrValue, AttributeError, CellAttr, LineKind, ParsedAttr};
use crate::registry::StyleCategory;
use crate::semantic;

/// Save-format versions this validator knows about.
pub const KNOWN_VERSIONS: &[&str] = &["1.0", "1.1", "1.2", "1.3", "1.4", "1.5"];

/// `vtf` value types.
pub const VALUE_TYPES: &[&str] = &["n", "nt", "nd", "ndt", "n$", "n%", "nl", "e"];

const BORDER_STYLES: &[&str] = &["solid", "dashed", "dotted", "double", "none"];
const ALIGNMENTS: &[&str] = &["left", "center", "right"];

fn line_number(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

/// Check that the first non-blank line declares the format version.
///
/// Returns `false` when the document must not be validated further.
pub fn check_version(ctx: &mut ValidationContext, lines: &[&str]) -> bool {
    let first = lines
        .iter()
        .map(|l| l.trim())
        .enumerate()
        .find(|(_, l)| !l.is_empty());
    let (line_no, first) = match first {
        Some((index, text)) => (line_number(index), text),
        None => (1, ""),
    };

    if !first.starts_with("version:") {
        ctx.diagnostics.error(
            line_no,
            Level::Syntax,
            "First line must be version declaration (e.g., version:1.5)",
        );
        return false;
    }

    let parts: Vec<&str> = first.split(':').collect();
    if parts.len() != 2 {
        ctx.diagnostics.error(
            line_no,
            Level::Syntax,
            format!("Invalid version line format. Expected 'version:X.X', got '{}'", first),
        );
        return false;
    }

    let version = parts[1];
    ctx.sheet.version = Some(version.to_string());
    if !KNOWN_VERSIONS.contains(&version) {
        ctx.diagnostics.warning(
            line_no,
            Level::Syntax,
            format!(
                "Unknown version '{}'. Known versions: {}",
                version,
                KNOWN_VERSIONS.join(", ")
            ),
        );
    }

    ctx.stats.syntax_checks += 1;
    ctx.trace(format_args!("✓ Version {} validated", version));
    true
}

/// Validate one trimmed, non-blank, non-comment line at `ctx.line`.
pub fn validate_line(ctx: &mut ValidationContext, text: &str) {
    let Some((kind, rest)) = line::classify(text) else {
        ctx.error(
            Level::Syntax,
            format!("Invalid line format (missing ':'): {}", text),
        );
        return;
    };

    match kind {
        LineKind::Version => {
            if ctx.sheet.version.is_none() {
                ctx.sheet.version = Some(rest.to_string());
            }
        }
        LineKind::Cell => validate_cell_line(ctx, rest),
        LineKind::Sheet => validate_sheet_line(ctx, rest),
        LineKind::Col => validate_col_line(ctx, rest),
        LineKind::Row => validate_row_line(ctx, rest),
        LineKind::Style(category) => validate_style_line(ctx, category, rest),
        LineKind::Name => validate_name_line(ctx, rest),
        LineKind::Unknown(line_type) => {
            ctx.warning(Level::Syntax, format!("Unknown line type: {}", line_type));
        }
    }
}

// =============================================================================
// Cells
// =============================================================================

fn validate_cell_line(ctx: &mut ValidationContext, rest: &str) {
    ctx.count_syntax_check();

    let mut tokens = rest.split(':');
    let coord = tokens.next().unwrap_or_default();
    let syntax_enabled = ctx.options.enable_syntax_level;
    if syntax_enabled && !lex::is_valid_coord(coord) {
        ctx.error(
            Level::Syntax,
            format!(
                "Invalid cell coordinate: '{}'. Expected format: A1, B5, AA10, etc.",
                coord
            ),
        );
        return;
    }

    let source_line = ctx.line;
    ctx.cells.declare(coord, source_line);

    // attributes are only read when grammar checks are on
    if !syntax_enabled {
        ctx.trace(format_args!("  ✓ Cell {} registered", coord));
        return;
    }

    let attr_tokens: Vec<&str> = tokens.collect();
    let parse = line::parse_cell_attributes(&attr_tokens);
    for parsed in &parse.attributes {
        ctx.cells
            .set_attribute(coord, parsed.attr.name(), &parsed.value.to_stored());
        check_cell_attribute(ctx, coord, parsed);
    }

    if let Some(error) = parse.error {
        let message = match error {
            AttributeError::MissingValue(name) => format!("Attribute '{}' missing value", name),
            AttributeError::VtfArity => {
                format!("Cell {}: 'vtf' requires 3 parts (type:value:formula)", coord)
            }
            AttributeError::VtfEmptyFormula => {
                format!("Cell {}: 'vtf' formula cannot be empty", coord)
            }
            AttributeError::BorderArity => {
                format!("Cell {}: 'b' requires 4 values (top:right:bottom:left)", coord)
            }
        };
        ctx.error(Level::Syntax, message);
    }

    ctx.trace(format_args!(
        "  ✓ Cell {} validated ({} attributes)",
        coord,
        parse.attributes.len()
    ));
}

fn check_cell_attribute(ctx: &mut ValidationContext, coord: &str, parsed: &ParsedAttr<'_>) {
    match &parsed.value {
        AttrValue::ValueTypeFormula {
            value_type,
            formula: raw,
            ..
        } => {
            if !is_known_value_type(value_type) {
                ctx.warning(
                    Level::Syntax,
                    format!("Cell {}: unusual value type '{}'", coord, value_type),
                );
            }
            let decoded = formula::decode(raw);
            semantic::check_formula(ctx, coord, &decoded);
            ctx.cells.set_formula(coord, decoded);
        }
        AttrValue::Borders(borders) => semantic::check_borders(ctx, coord, borders),
        AttrValue::Single(value) => match parsed.attr {
            CellAttr::Value => {
                if !is_numeric(value) {
                    ctx.error(
                        Level::Syntax,
                        format!("Cell {}: attribute 'v' must be numeric, got '{}'", coord, value),
                    );
                }
            }
            CellAttr::Text => {}
            CellAttr::ColSpan | CellAttr::RowSpan => {
                if parse_positive(value).is_none() {
                    ctx.error(
                        Level::Syntax,
                        format!(
                            "Cell {}: '{}' must be positive integer, got '{}'",
                            coord,
                            parsed.attr.name(),
                            value
                        ),
                    );
                }
            }
            CellAttr::Unknown(name) => {
                ctx.warning(
                    Level::Syntax,
                    format!("Cell {}: unknown attribute '{}'", coord, name),
                );
            }
            attr => {
                semantic::check_style_reference(ctx, coord, attr, value);
            }
        },
    }
}

fn is_known_value_type(value_type: &str) -> bool {
    VALUE_TYPES.contains(&value_type) || value_type.starts_with('e')
}

/// A float that is not NaN. Infinities are accepted.
fn is_numeric(value: &str) -> bool {
    value.parse::<f64>().map_or(false, |n| !n.is_nan())
}

fn parse_positive(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|&n| n >= 1)
}

// =============================================================================
// Sheet, columns and rows
// =============================================================================

/// Walk `name:value` pairs; a trailing name without a value yields `Err(name)`.
fn attribute_pairs<'a>(
    tokens: &'a [&'a str],
) -> impl Iterator<Item = Result<(&'a str, &'a str), &'a str>> + 'a {
    tokens.chunks(2).map(|pair| match pair {
        [name, value] => Ok((*name, *value)),
        [name] => Err(*name),
        _ => Err(""),
    })
}

fn validate_sheet_line(ctx: &mut ValidationContext, rest: &str) {
    ctx.count_syntax_check();

    let tokens: Vec<&str> = rest.split(':').collect();
    for pair in attribute_pairs(&tokens) {
        let (name, value) = match pair {
            Ok(pair) => pair,
            Err(name) => {
                ctx.error(
                    Level::Syntax,
                    format!("Sheet attribute '{}' missing value", name),
                );
                continue;
            }
        };

        match name {
            "c" => match parse_positive(value) {
                Some(cols) => ctx.sheet.max_col = cols,
                None => ctx.error(
                    Level::Syntax,
                    format!("Sheet 'c' (columns) must be positive integer, got '{}'", value),
                ),
            },
            "r" => match parse_positive(value) {
                Some(rows) => ctx.sheet.max_row = rows,
                None => ctx.error(
                    Level::Syntax,
                    format!("Sheet 'r' (rows) must be positive integer, got '{}'", value),
                ),
            },
            "w" | "h" => {
                if !lex::is_valid_size(value) {
                    ctx.warning(
                        Level::Syntax,
                        format!("Sheet '{}' has unusual value '{}'", name, value),
                    );
                }
            }
            "recalc" => {
                if value != "on" && value != "off" {
                    ctx.error(
                        Level::Syntax,
                        format!("Sheet 'recalc' must be 'on' or 'off', got '{}'", value),
                    );
                }
            }
            "needsrecalc" => {
                if value != "yes" && value != "no" {
                    ctx.error(
                        Level::Syntax,
                        format!("Sheet 'needsrecalc' must be 'yes' or 'no', got '{}'", value),
                    );
                }
            }
            other => {
                ctx.warning(Level::Syntax, format!("Unknown sheet attribute: {}", other));
            }
        }
    }

    ctx.trace(format_args!("  ✓ Sheet properties validated"));
}

fn validate_col_line(ctx: &mut ValidationContext, rest: &str) {
    ctx.count_syntax_check();

    let tokens: Vec<&str> = rest.split(':').collect();
    let (col_id, attrs) = tokens.split_first().map_or(("", &[][..]), |(id, a)| (*id, a));
    if !lex::is_valid_col_id(col_id) {
        ctx.error(
            Level::Syntax,
            format!(
                "Invalid column identifier: '{}'. Expected: A, B, AA, etc.",
                col_id
            ),
        );
        return;
    }

    for pair in attribute_pairs(attrs) {
        match pair {
            Err(name) => ctx.error(
                Level::Syntax,
                format!("Column {} attribute '{}' missing value", col_id, name),
            ),
            Ok(("w", width)) => {
                if !lex::is_valid_size(width) {
                    ctx.error(
                        Level::Syntax,
                        format!("Column {} width '{}' invalid", col_id, width),
                    );
                }
            }
            Ok((name, _)) => {
                ctx.warning(Level::Syntax, format!("Unknown column attribute: {}", name));
            }
        }
    }

    ctx.trace(format_args!("  ✓ Column {} validated", col_id));
}

fn validate_row_line(ctx: &mut ValidationContext, rest: &str) {
    ctx.count_syntax_check();

    let tokens: Vec<&str> = rest.split(':').collect();
    let (row, attrs) = tokens.split_first().map_or(("", &[][..]), |(id, a)| (*id, a));
    if !lex::is_valid_row_number(row) {
        ctx.error(
            Level::Syntax,
            format!("Invalid row number: '{}'. Expected positive integer", row),
        );
        return;
    }

    for pair in attribute_pairs(attrs) {
        match pair {
            Err(name) => ctx.error(
                Level::Syntax,
                format!("Row {} attribute '{}' missing value", row, name),
            ),
            Ok(("h", height)) => {
                if !lex::is_valid_size(height) {
                    ctx.error(
                        Level::Syntax,
                        format!("Row {} height '{}' invalid", row, height),
                    );
                }
            }
            Ok((name, _)) => {
                ctx.warning(Level::Syntax, format!("Unknown row attribute: {}", name));
            }
        }
    }

    ctx.trace(format_args!("  ✓ Row {} validated", row));
}

// =============================================================================
// Style definitions and names
// =============================================================================

/// Label used in messages and what follows the id.
fn style_label(category: StyleCategory) -> (&'static str, &'static str) {
    match category {
        StyleCategory::Font => ("Font", "definition"),
        StyleCategory::Color => ("Color", "definition"),
        StyleCategory::Border => ("Border", "definition"),
        StyleCategory::Layout => ("Layout", "definition"),
        StyleCategory::CellFormat => ("Cell format", "alignment"),
        StyleCategory::ValueFormat => ("Value format", "format"),
    }
}

fn validate_style_line(ctx: &mut ValidationContext, category: StyleCategory, rest: &str) {
    ctx.count_syntax_check();

    let (label, payload) = style_label(category);
    let Some((id, definition)) = line::split_definition(rest) else {
        ctx.error(
            Level::Syntax,
            format!("{} line must have number and {}", label, payload),
        );
        return;
    };
    if !lex::is_numeric_id(id) {
        ctx.error(
            Level::Syntax,
            format!("{} number must be positive integer, got '{}'", label, id),
        );
        return;
    }

    match category {
        StyleCategory::Font => check_font(ctx, definition),
        StyleCategory::Color => check_color(ctx, definition),
        StyleCategory::Border => check_border(ctx, definition),
        StyleCategory::Layout => {
            if !definition.contains("padding:") && !definition.contains("vertical-align:") {
                ctx.warning(
                    Level::Syntax,
                    format!(
                        "Layout {} definition doesn't contain padding or vertical-align",
                        id
                    ),
                );
            }
        }
        StyleCategory::CellFormat => {
            if !ALIGNMENTS.contains(&definition) {
                ctx.error(
                    Level::Syntax,
                    format!(
                        "Cell format alignment must be one of {}, got '{}'",
                        ALIGNMENTS.join(", "),
                        definition
                    ),
                );
            }
        }
        StyleCategory::ValueFormat => {
            if definition.is_empty() {
                ctx.error(
                    Level::Syntax,
                    format!("Value format {} definition is empty", id),
                );
            }
        }
    }

    ctx.trace(format_args!("  ✓ {} {} validated", label, id));
}

/// `style weight [size] [family]`, or the size-only shorthand `* size *`.
fn check_font(ctx: &mut ValidationContext, definition: &str) {
    let parts: Vec<&str> = definition.split(' ').collect();
    if parts.len() < 3 {
        ctx.error(
            Level::Syntax,
            format!(
                "Font definition requires at least 3 parts, got {}",
                parts.len()
            ),
        );
        return;
    }

    let (style, weight, third) = (parts[0], parts[1], parts[2]);
    if style == "*" && third == "*" && lex::is_valid_font_size(weight) {
        return;
    }

    if !matches!(style, "*" | "normal" | "italic") {
        ctx.error(
            Level::Syntax,
            format!(
                "Font style must be 'normal', 'italic', or '*', got '{}'",
                style
            ),
        );
    }
    if !matches!(weight, "*" | "normal" | "bold") {
        ctx.error(
            Level::Syntax,
            format!(
                "Font weight must be 'normal', 'bold', or '*', got '{}'",
                weight
            ),
        );
    }
}

/// Components of `rgb(R,G,B)` if the text has exactly that shape.
fn rgb_components(definition: &str) -> Option<[&str; 3]> {
    let inner = definition.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut parts = inner.split(',');
    let components = [parts.next()?, parts.next()?, parts.next()?];
    let all_digits = components
        .iter()
        .all(|c| !c.is_empty() && c.bytes().all(|b| b.is_ascii_digit()));
    (parts.next().is_none() && all_digits).then_some(components)
}

fn is_hex_color(definition: &str) -> bool {
    definition
        .strip_prefix('#')
        .map_or(false, |hex| hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

fn check_color(ctx: &mut ValidationContext, definition: &str) {
    if definition.starts_with("rgb(") {
        match rgb_components(definition) {
            None => ctx.error(
                Level::Syntax,
                format!(
                    "Invalid RGB color format: '{}'. Expected: rgb(R,G,B)",
                    definition
                ),
            ),
            Some([r, g, b]) => {
                let out_of_range = [r, g, b]
                    .iter()
                    .any(|c| c.parse::<u32>().map_or(true, |v| v > 255));
                if out_of_range {
                    ctx.error(
                        Level::Syntax,
                        format!("RGB values must be 0-255, got rgb({},{},{})", r, g, b),
                    );
                }
            }
        }
    } else if definition.starts_with('#') {
        if !is_hex_color(definition) {
            ctx.error(
                Level::Syntax,
                format!(
                    "Invalid hex color format: '{}'. Expected: #RRGGBB",
                    definition
                ),
            );
        }
    } else {
        ctx.error(
            Level::Syntax,
            format!(
                "Color must be rgb(R,G,B) or #RRGGBB format, got '{}'",
                definition
            ),
        );
    }
}

/// `<N>px <style> <color>`; the color is everything after the style.
fn check_border(ctx: &mut ValidationContext, definition: &str) {
    let parts: Vec<&str> = definition.split(' ').collect();
    if parts.len() < 3 {
        ctx.error(
            Level::Syntax,
            format!(
                "Border definition requires 3 parts (thickness style color), got {}",
                parts.len()
            ),
        );
        return;
    }

    let (thickness, style) = (parts[0], parts[1]);
    let color = parts[2..].join(" ");

    let is_pixels = thickness
        .strip_suffix("px")
        .map_or(false, |n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
    if !is_pixels {
        ctx.error(
            Level::Syntax,
            format!(
                "Border thickness must be in pixels (e.g., 1px), got '{}'",
                thickness
            ),
        );
    }
    if !BORDER_STYLES.contains(&style) {
        ctx.error(
            Level::Syntax,
            format!(
                "Border style must be one of {}, got '{}'",
                BORDER_STYLES.join(", "),
                style
            ),
        );
    }
    if !color.starts_with("rgb(") && !color.starts_with('#') {
        ctx.error(
            Level::Syntax,
            format!("Border color must be rgb() or #hex format, got '{}'", color),
        );
    }
}

fn validate_name_line(ctx: &mut ValidationContext, rest: &str) {
    ctx.count_syntax_check();

    let Some((name, definition)) = rest.split_once(':') else {
        ctx.error(Level::Syntax, "Name line must have name and definition");
        return;
    };
    if name.is_empty() {
        ctx.error(Level::Syntax, "Name cannot be empty");
        return;
    }

    ctx.names.insert(name, definition);
    ctx.trace(format_args!("  ✓ Name {} registered", name));
}
