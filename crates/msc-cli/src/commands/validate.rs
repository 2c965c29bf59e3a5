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

//! Validate command - MSC save format validation and reporting

use super::{read_file, unescape_newlines};
use crate::error::CliError;
use colored::Colorize;
use msc_core::{Diagnostic, ValidationLevel, ValidationResult, Validator, ValidatorOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

const RULE_WIDTH: usize = 80;

/// Where the document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A save-format file on disk
    File(PathBuf),
    /// Text given on the command line, with `\n` escapes
    Inline(String),
}

impl Source {
    /// Load the document text.
    pub fn load(&self) -> Result<String, CliError> {
        match self {
            Self::File(path) => read_file(path),
            Self::Inline(text) => Ok(unescape_newlines(text)),
        }
    }

    fn describe(&self, content: &str) -> String {
        match self {
            Self::File(path) => format!("File: {}", path.display()),
            Self::Inline(_) => format!("Input: String ({} characters)", content.chars().count()),
        }
    }
}

/// Validate a document and print the report to stdout.
///
/// With `json` set the report is printed as pretty JSON; otherwise a banner
/// and a human-readable report are printed.
///
/// # Errors
///
/// Returns `Err` if the input cannot be loaded, the options are invalid, the
/// report cannot be written, or the document has errors
/// ([`CliError::ValidationFailed`]).
pub fn validate(
    source: &Source,
    level: ValidationLevel,
    options: ValidatorOptions,
    json: bool,
) -> Result<(), CliError> {
    options.validate()?;
    let content = source.load()?;
    debug!(bytes = content.len(), ?level, "loaded input");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stdout_error = |e| CliError::io_error("<stdout>", e);

    if !json {
        write_banner(&mut out, &source.describe(&content), level, options.strict_mode)
            .map_err(stdout_error)?;
    }

    let result = Validator::new(options).validate(&content);

    if json {
        let rendered = serde_json::to_string_pretty(&result)?;
        writeln!(out, "{}", rendered).map_err(stdout_error)?;
    } else {
        write_report(&mut out, &result).map_err(stdout_error)?;
    }
    out.flush().map_err(stdout_error)?;

    if result.valid {
        Ok(())
    } else {
        Err(CliError::ValidationFailed {
            errors: result.error_count,
        })
    }
}

fn rule(ch: &str) -> String {
    ch.repeat(RULE_WIDTH)
}

/// Print the header shown before a human-readable report.
pub fn write_banner(
    out: &mut impl Write,
    input: &str,
    level: ValidationLevel,
    strict: bool,
) -> io::Result<()> {
    writeln!(out, "{}", rule("═"))?;
    writeln!(out, "{}", "SOCIALCALC VALIDATOR".bold())?;
    writeln!(out, "{}", rule("═"))?;
    writeln!(out, "{}", input)?;
    writeln!(out, "Validation Level: {}", level)?;
    writeln!(out, "Strict Mode: {}", if strict { "Yes" } else { "No" })?;
    writeln!(out, "{}", rule("═"))?;
    writeln!(out)
}

fn write_diagnostics(out: &mut impl Write, diagnostics: &[Diagnostic]) -> io::Result<()> {
    writeln!(out, "{}", rule("─"))?;
    for diag in diagnostics {
        writeln!(out, "  {}", diag)?;
    }
    writeln!(out)
}

/// Print diagnostics and the summary.
pub fn write_report(out: &mut impl Write, result: &ValidationResult) -> io::Result<()> {
    writeln!(out)?;

    if !result.errors.is_empty() {
        writeln!(out, "{}", "❌ ERRORS:".red().bold())?;
        write_diagnostics(out, &result.errors)?;
    }
    if !result.warnings.is_empty() {
        writeln!(out, "{}", "⚠️  WARNINGS:".yellow().bold())?;
        write_diagnostics(out, &result.warnings)?;
    }

    let status = if result.valid {
        "✅ VALID".green().bold()
    } else {
        "❌ INVALID".red().bold()
    };
    let stats = &result.stats;
    let styles = &result.style_definitions;

    writeln!(out, "{}", rule("═"))?;
    writeln!(out, "{}", "VALIDATION SUMMARY".bold())?;
    writeln!(out, "{}", rule("═"))?;
    writeln!(out, "Status:           {}", status)?;
    writeln!(out, "Lines processed:  {}", stats.lines_processed)?;
    writeln!(out, "Errors:           {}", result.error_count)?;
    writeln!(out, "Warnings:         {}", result.warning_count)?;
    writeln!(out)?;
    writeln!(out, "Validation checks performed:")?;
    writeln!(out, "  - Syntax checks:   {}", stats.syntax_checks)?;
    writeln!(out, "  - Semantic checks: {}", stats.semantic_checks)?;
    writeln!(out, "  - Logic checks:    {}", stats.logic_checks)?;
    writeln!(out)?;
    writeln!(out, "Style definitions found:")?;
    writeln!(out, "  - Fonts:         {}", styles.fonts)?;
    writeln!(out, "  - Colors:        {}", styles.colors)?;
    writeln!(out, "  - Borders:       {}", styles.borders)?;
    writeln!(out, "  - Layouts:       {}", styles.layouts)?;
    writeln!(out, "  - Cell formats:  {}", styles.cellformats)?;
    writeln!(out, "  - Value formats: {}", styles.valueformats)?;
    writeln!(out)?;
    writeln!(out, "Cells found:    {}", result.cells)?;
    writeln!(out, "Formulas found: {}", result.formulas)?;
    writeln!(out, "{}", rule("═"))?;
    writeln!(out)?;

    if result.valid {
        writeln!(
            out,
            "{}",
            "✅ Validation passed! File is valid and can be loaded.".green()
        )
    } else {
        writeln!(
            out,
            "{}",
            "❌ Validation failed! Please fix the errors above.".red()
        )
    }
}
