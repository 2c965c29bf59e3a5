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

//! Per-run validation state.
//!
//! A [`ValidationContext`] owns everything one run accumulates: registries,
//! diagnostics and counters. Each pass receives it explicitly; nothing is
//! shared between runs.

use crate::diagnostic::{Diagnostic, Level, Severity};
use crate::options::ValidatorOptions;
use crate::registry::{CellRegistry, NamedRanges, SheetProperties, StyleRegistry};
use crate::report::{ValidationResult, ValidationStats};
use std::fmt;
use tracing::{debug, error, info, trace, warn};

/// Accumulates diagnostics, applying strict-mode promotion.
#[derive(Debug, Clone)]
pub struct DiagnosticSink {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
    strict: bool,
    verbose: bool,
}

impl DiagnosticSink {
    fn new(options: &ValidatorOptions) -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            strict: options.strict_mode,
            verbose: options.verbose,
        }
    }

    /// Record a diagnostic. In strict mode warnings are recorded as errors.
    pub fn push(&mut self, mut diag: Diagnostic) {
        if self.strict {
            diag.escalate_to_error();
        }

        match diag.severity() {
            Severity::Error => {
                if self.verbose {
                    error!("✗ ERROR [{}] Line {}: {}", diag.level(), diag.line(), diag.message());
                } else {
                    debug!(line = diag.line(), level = %diag.level(), "error: {}", diag.message());
                }
                self.errors.push(diag);
            }
            Severity::Warning => {
                if self.verbose {
                    warn!("⚠ WARNING [{}] Line {}: {}", diag.level(), diag.line(), diag.message());
                } else {
                    debug!(line = diag.line(), level = %diag.level(), "warning: {}", diag.message());
                }
                self.warnings.push(diag);
            }
        }
    }

    pub fn error(&mut self, line: u32, level: Level, message: impl Into<String>) {
        self.push(Diagnostic::error(line, level, message));
    }

    pub fn warning(&mut self, line: u32, level: Level, message: impl Into<String>) {
        self.push(Diagnostic::warning(line, level, message));
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// Everything one validation run reads and writes.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    pub options: ValidatorOptions,
    pub styles: StyleRegistry,
    pub cells: CellRegistry,
    pub names: NamedRanges,
    pub sheet: SheetProperties,
    pub stats: ValidationStats,
    pub diagnostics: DiagnosticSink,
    /// Line currently being validated (1-based, 0 before the line pass)
    pub line: u32,
}

impl ValidationContext {
    /// Fresh, empty state for a run with the given options.
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            diagnostics: DiagnosticSink::new(&options),
            options,
            styles: StyleRegistry::new(),
            cells: CellRegistry::new(),
            names: NamedRanges::default(),
            sheet: SheetProperties::default(),
            stats: ValidationStats::default(),
            line: 0,
        }
    }

    /// Error on the current line.
    pub fn error(&mut self, level: Level, message: impl Into<String>) {
        let line = self.line;
        self.diagnostics.error(line, level, message);
    }

    /// Warning on the current line.
    pub fn warning(&mut self, level: Level, message: impl Into<String>) {
        let line = self.line;
        self.diagnostics.warning(line, level, message);
    }

    /// Count one line-grammar check.
    pub fn count_syntax_check(&mut self) {
        self.stats.syntax_checks += 1;
    }

    /// Step-by-step trace: `info` when verbose, `trace` otherwise.
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        if self.options.verbose {
            info!("{}", args);
        } else {
            trace!("{}", args);
        }
    }

    /// Snapshot the run as a report.
    pub fn result(&self) -> ValidationResult {
        let errors = self.diagnostics.errors().to_vec();
        let warnings = self.diagnostics.warnings().to_vec();
        ValidationResult {
            valid: errors.is_empty(),
            error_count: errors.len(),
            warning_count: warnings.len(),
            errors,
            warnings,
            stats: self.stats,
            style_definitions: self.styles.counts(),
            cells: self.cells.cell_count(),
            formulas: self.cells.formula_count(),
        }
    }
}
