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

//! Registries built while validating a document.
//!
//! Every registry here is last-write-wins: the save format allows a style,
//! cell or name to be declared again, and the later declaration replaces the
//! earlier one. Registries live inside one validation run and are rebuilt
//! from empty on the next.

use crate::report::StyleCounts;
use std::collections::{HashMap, HashSet};

/// The six style namespaces a cell can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleCategory {
    Font,
    Color,
    Border,
    Layout,
    CellFormat,
    ValueFormat,
}

impl StyleCategory {
    pub const ALL: [StyleCategory; 6] = [
        Self::Font,
        Self::Color,
        Self::Border,
        Self::Layout,
        Self::CellFormat,
        Self::ValueFormat,
    ];

    /// Map a line type (`font`, `color`, ...) to its category.
    pub fn from_line_type(line_type: &str) -> Option<Self> {
        match line_type {
            "font" => Some(Self::Font),
            "color" => Some(Self::Color),
            "border" => Some(Self::Border),
            "layout" => Some(Self::Layout),
            "cellformat" => Some(Self::CellFormat),
            "valueformat" => Some(Self::ValueFormat),
            _ => None,
        }
    }

    /// The line type that declares a definition in this category.
    pub fn line_type(self) -> &'static str {
        match self {
            Self::Font => "font",
            Self::Color => "color",
            Self::Border => "border",
            Self::Layout => "layout",
            Self::CellFormat => "cellformat",
            Self::ValueFormat => "valueformat",
        }
    }

    /// Plural name used in counts and reports.
    pub fn plural(self) -> &'static str {
        match self {
            Self::Font => "fonts",
            Self::Color => "colors",
            Self::Border => "borders",
            Self::Layout => "layouts",
            Self::CellFormat => "cellformats",
            Self::ValueFormat => "valueformats",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for StyleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.line_type())
    }
}

/// Style definitions by category, each mapping an id to its raw definition.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    namespaces: [HashMap<String, String>; 6],
}

impl StyleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any earlier one with the same id.
    pub fn insert(&mut self, category: StyleCategory, id: &str, definition: &str) {
        self.namespaces[category.index()].insert(id.to_string(), definition.to_string());
    }

    pub fn contains(&self, category: StyleCategory, id: &str) -> bool {
        self.namespaces[category.index()].contains_key(id)
    }

    pub fn get(&self, category: StyleCategory, id: &str) -> Option<&str> {
        self.namespaces[category.index()].get(id).map(String::as_str)
    }

    /// Number of distinct ids defined in a category.
    pub fn count(&self, category: StyleCategory) -> usize {
        self.namespaces[category.index()].len()
    }

    /// Total definitions across all categories.
    pub fn total(&self) -> usize {
        self.namespaces.iter().map(HashMap::len).sum()
    }

    pub fn counts(&self) -> StyleCounts {
        StyleCounts {
            fonts: self.count(StyleCategory::Font),
            colors: self.count(StyleCategory::Color),
            borders: self.count(StyleCategory::Border),
            layouts: self.count(StyleCategory::Layout),
            cellformats: self.count(StyleCategory::CellFormat),
            valueformats: self.count(StyleCategory::ValueFormat),
        }
    }
}

/// A declared cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Cell address, e.g. `B7`
    pub coordinate: String,
    /// Line of the `cell:` declaration (1-based)
    pub source_line: u32,
    /// Fully assembled attribute values by attribute name
    pub attributes: HashMap<String, String>,
    /// Decoded formula from a `vtf` attribute
    pub formula: Option<String>,
}

impl Cell {
    fn new(coordinate: &str, source_line: u32) -> Self {
        Self {
            coordinate: coordinate.to_string(),
            source_line,
            attributes: HashMap::new(),
            formula: None,
        }
    }
}

/// Declared cells by coordinate.
///
/// Formula-bearing cells are also tracked in the order their formulas were
/// first registered, which fixes the root order of cycle detection.
#[derive(Debug, Clone, Default)]
pub struct CellRegistry {
    cells: HashMap<String, Cell>,
    formula_order: Vec<String>,
    ordered: HashSet<String>,
}

impl CellRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a cell, replacing any earlier declaration of the coordinate.
    pub fn declare(&mut self, coordinate: &str, source_line: u32) {
        self.cells
            .insert(coordinate.to_string(), Cell::new(coordinate, source_line));
    }

    /// Store an attribute on a declared cell. Unknown coordinates are ignored.
    pub fn set_attribute(&mut self, coordinate: &str, name: &str, value: &str) {
        if let Some(cell) = self.cells.get_mut(coordinate) {
            cell.attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Attach a decoded formula to a declared cell.
    pub fn set_formula(&mut self, coordinate: &str, formula: String) {
        if let Some(cell) = self.cells.get_mut(coordinate) {
            cell.formula = Some(formula);
            if self.ordered.insert(coordinate.to_string()) {
                self.formula_order.push(coordinate.to_string());
            }
        }
    }

    pub fn get(&self, coordinate: &str) -> Option<&Cell> {
        self.cells.get(coordinate)
    }

    pub fn contains(&self, coordinate: &str) -> bool {
        self.cells.contains_key(coordinate)
    }

    /// Formula of a cell, if the cell exists and carries one.
    pub fn formula(&self, coordinate: &str) -> Option<&str> {
        self.cells.get(coordinate)?.formula.as_deref()
    }

    /// Cells that currently carry a formula, in formula-registration order.
    pub fn formula_cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.formula_order
            .iter()
            .filter_map(|c| self.cells.get(c))
            .filter(|cell| cell.formula.is_some())
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn formula_count(&self) -> usize {
        self.formula_cells().count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Named ranges by name.
#[derive(Debug, Clone, Default)]
pub struct NamedRanges {
    names: HashMap<String, String>,
}

impl NamedRanges {
    pub fn insert(&mut self, name: &str, definition: &str) {
        self.names.insert(name.to_string(), definition.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Sheet-wide properties seen during the line pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetProperties {
    pub version: Option<String>,
    pub max_col: u32,
    pub max_row: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_line_type_round_trip() {
        for category in StyleCategory::ALL {
            assert_eq!(StyleCategory::from_line_type(category.line_type()), Some(category));
        }
        assert_eq!(StyleCategory::from_line_type("cell"), None);
    }

    #[test]
    fn test_style_namespaces_are_independent() {
        let mut styles = StyleRegistry::new();
        styles.insert(StyleCategory::Font, "1", "normal bold 12pt Arial");
        assert!(styles.contains(StyleCategory::Font, "1"));
        assert!(!styles.contains(StyleCategory::Color, "1"));
        assert_eq!(styles.total(), 1);
    }

    #[test]
    fn test_style_last_write_wins() {
        let mut styles = StyleRegistry::new();
        styles.insert(StyleCategory::Color, "1", "#000000");
        styles.insert(StyleCategory::Color, "1", "#FFFFFF");
        assert_eq!(styles.get(StyleCategory::Color, "1"), Some("#FFFFFF"));
        assert_eq!(styles.count(StyleCategory::Color), 1);
    }

    #[test]
    fn test_style_counts() {
        let mut styles = StyleRegistry::new();
        styles.insert(StyleCategory::Border, "1", "1px solid #000000");
        styles.insert(StyleCategory::Border, "2", "2px dashed #000000");
        styles.insert(StyleCategory::ValueFormat, "1", "#,##0.00");
        let counts = styles.counts();
        assert_eq!(counts.borders, 2);
        assert_eq!(counts.valueformats, 1);
        assert_eq!(counts.fonts, 0);
    }

    #[test]
    fn test_redeclared_cell_is_replaced() {
        let mut cells = CellRegistry::new();
        cells.declare("A1", 2);
        cells.set_attribute("A1", "v", "10");
        cells.set_formula("A1", "=B1".to_string());

        cells.declare("A1", 5);
        let cell = cells.get("A1").unwrap();
        assert_eq!(cell.source_line, 5);
        assert!(cell.attributes.is_empty());
        assert!(cell.formula.is_none());
        assert_eq!(cells.cell_count(), 1);
        assert_eq!(cells.formula_count(), 0);
    }

    #[test]
    fn test_formula_order_is_first_registration() {
        let mut cells = CellRegistry::new();
        for coord in ["B1", "A1", "C1"] {
            cells.declare(coord, 1);
        }
        cells.set_formula("B1", "=A1".to_string());
        cells.set_formula("A1", "=C1".to_string());
        cells.set_formula("B1", "=C1".to_string());

        let order: Vec<_> = cells.formula_cells().map(|c| c.coordinate.as_str()).collect();
        assert_eq!(order, vec!["B1", "A1"]);
        assert_eq!(cells.formula("B1"), Some("=C1"));
    }

    #[test]
    fn test_attribute_on_undeclared_cell_is_ignored() {
        let mut cells = CellRegistry::new();
        cells.set_attribute("Z9", "v", "1");
        cells.set_formula("Z9", "=1".to_string());
        assert!(cells.is_empty());
        assert_eq!(cells.formula_count(), 0);
    }

    #[test]
    fn test_named_ranges_last_write_wins() {
        let mut names = NamedRanges::default();
        names.insert("TOTAL", "A1:A5");
        names.insert("TOTAL", "B1:B5");
        assert_eq!(names.get("TOTAL"), Some("B1:B5"));
        assert_eq!(names.len(), 1);
    }
}
