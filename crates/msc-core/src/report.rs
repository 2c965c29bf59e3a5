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

//! Validation report.
//!
//! With the `serde` feature the report serializes to the JSON shape consumed
//! by the CLI and embedding callers (`errorCount`, `styleDefinitions`, ...).

use crate::diagnostic::Diagnostic;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Counters for the checks performed during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ValidationStats {
    pub syntax_checks: usize,
    pub semantic_checks: usize,
    pub logic_checks: usize,
    /// Non-blank, non-comment lines visited by the line pass
    pub lines_processed: usize,
}

/// Number of style definitions per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StyleCounts {
    pub fonts: usize,
    pub colors: usize,
    pub borders: usize,
    pub layouts: usize,
    pub cellformats: usize,
    pub valueformats: usize,
}

impl StyleCounts {
    pub fn total(&self) -> usize {
        self.fonts + self.colors + self.borders + self.layouts + self.cellformats + self.valueformats
    }
}

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ValidationResult {
    /// `true` when no errors were recorded
    pub valid: bool,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
    pub stats: ValidationStats,
    pub style_definitions: StyleCounts,
    /// Number of distinct declared cells
    pub cells: usize,
    /// Number of cells carrying a formula
    pub formulas: usize,
}

impl ValidationResult {
    /// Errors followed by warnings.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.errors.iter().chain(self.warnings.iter())
    }
}
