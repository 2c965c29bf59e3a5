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

//! Validation runner.

use crate::context::ValidationContext;
use crate::diagnostic::Level;
use crate::logic;
use crate::options::{ValidatorOptions, DEFAULT_MAX_ERRORS};
use crate::registry::{CellRegistry, NamedRanges, SheetProperties, StyleRegistry};
use crate::report::ValidationResult;
use crate::semantic;
use crate::syntax;
use tracing::{debug, instrument};

/// Runs the validation passes over a document.
///
/// The registries of the most recent run stay available for inspection
/// until the next call to [`Validator::validate`].
#[derive(Debug, Clone)]
pub struct Validator {
    context: ValidationContext,
}

impl Validator {
    /// Create a validator with the given options.
    ///
    /// A `max_errors` of 0 is read as [`DEFAULT_MAX_ERRORS`].
    pub fn new(mut options: ValidatorOptions) -> Self {
        if options.max_errors == 0 {
            options.max_errors = DEFAULT_MAX_ERRORS;
        }
        Self {
            context: ValidationContext::new(options),
        }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.context.options
    }

    /// Validate a document, discarding all state from any previous run.
    ///
    /// Never fails; problems are reported as diagnostics in the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use msc_core::{Validator, ValidatorOptions};
    ///
    /// let mut validator = Validator::new(ValidatorOptions::default());
    /// let result = validator.validate("version:1.5\ncell:A1:v:10");
    /// assert!(result.valid);
    /// assert!(validator.cells().contains("A1"));
    /// ```
    #[instrument(level = "debug", skip_all, fields(bytes = text.len()))]
    pub fn validate(&mut self, text: &str) -> ValidationResult {
        self.context = ValidationContext::new(self.context.options.clone());
        run_passes(&mut self.context, text);

        let result = self.context.result();
        debug!(
            valid = result.valid,
            errors = result.error_count,
            warnings = result.warning_count,
            "validation finished"
        );
        result
    }

    /// Cells declared in the last run.
    pub fn cells(&self) -> &CellRegistry {
        &self.context.cells
    }

    /// Style definitions collected in the last run.
    pub fn styles(&self) -> &StyleRegistry {
        &self.context.styles
    }

    /// Named ranges registered in the last run.
    pub fn named_ranges(&self) -> &NamedRanges {
        &self.context.names
    }

    /// Sheet properties seen in the last run.
    pub fn sheet(&self) -> &SheetProperties {
        &self.context.sheet
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorOptions::default())
    }
}

fn run_passes(ctx: &mut ValidationContext, text: &str) {
    if text.is_empty() {
        ctx.diagnostics
            .error(0, Level::Syntax, "Input must be a non-empty string");
        return;
    }

    let lines: Vec<&str> = text.split('\n').collect();
    ctx.trace(format_args!("Validating {} lines", lines.len()));

    if ctx.options.enable_syntax_level {
        debug!("pass 0: version");
        if !syntax::check_version(ctx, &lines) {
            return;
        }
    }

    if ctx.options.enable_semantic_level {
        debug!("pass 1: style definitions");
        ctx.trace(format_args!("Collecting style definitions..."));
        semantic::collect_style_definitions(ctx, &lines);
    }

    debug!("pass 2: lines");
    for (index, raw) in lines.iter().enumerate() {
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        ctx.line = u32::try_from(index + 1).unwrap_or(u32::MAX);
        ctx.stats.lines_processed += 1;
        ctx.trace(format_args!("Line {}: {}", ctx.line, text));
        syntax::validate_line(ctx, text);

        if ctx.diagnostics.error_count() >= ctx.options.max_errors {
            ctx.trace(format_args!(
                "Stopping: reached {} errors",
                ctx.options.max_errors
            ));
            break;
        }
    }

    if ctx.options.enable_logic_level && !ctx.cells.is_empty() {
        debug!("pass 3: formula graph");
        logic::validate(ctx);
    }
}

/// Validate a document with default options.
///
/// # Examples
///
/// ```
/// let result = msc_core::validate("version:1.5\ncell:A1:v:10");
/// assert!(result.valid);
/// assert_eq!(result.cells, 1);
/// ```
pub fn validate(text: &str) -> ValidationResult {
    Validator::default().validate(text)
}

/// Validate a document with custom options.
pub fn validate_with_options(text: &str, options: ValidatorOptions) -> ValidationResult {
    Validator::new(options).validate(text)
}
