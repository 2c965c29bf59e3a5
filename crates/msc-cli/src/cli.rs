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

//! Command-line argument definitions.

use crate::commands::{self, Source};
use crate::error::CliError;
use clap::Parser;
use msc_core::{ValidationLevel, ValidatorOptions, DEFAULT_MAX_ERRORS};
use std::path::PathBuf;

/// Validate SocialCalc (MSC) save files.
///
/// # Examples
///
/// ```bash
/// # Validate a file at every level
/// msc-validate sheet.msc
///
/// # Syntax checks only, warnings as errors
/// msc-validate sheet.msc --level 1 --strict
///
/// # Validate inline text
/// msc-validate --string 'version:1.5\ncell:A1:v:10'
/// ```
#[derive(Parser, Debug)]
#[command(name = "msc-validate")]
#[command(author, version, about = "SocialCalc save format validator", long_about = None)]
pub struct Cli {
    /// Save file to validate
    pub file: Option<PathBuf>,

    /// Validate this text instead of a file (`\n` is read as a newline)
    #[arg(short, long, value_name = "TEXT")]
    pub string: Option<String>,

    /// Validation level: 1 (syntax), 2 (syntax + semantic), 3 or all
    #[arg(short, long, default_value = "all")]
    pub level: ValidationLevel,

    /// Trace each validation step on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Stop after this many errors
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_ERRORS)]
    pub max_errors: usize,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// The input to validate; `--string` wins over a file path.
    pub fn source(&self) -> Result<Source, CliError> {
        match (&self.string, &self.file) {
            (Some(text), _) => Ok(Source::Inline(text.clone())),
            (None, Some(path)) => Ok(Source::File(path.clone())),
            (None, None) => Err(CliError::invalid_input(
                "No input specified. Use a file path or --string option",
            )),
        }
    }

    pub fn options(&self) -> ValidatorOptions {
        ValidatorOptions::builder()
            .level(self.level)
            .verbose(self.verbose)
            .strict(self.strict)
            .max_errors(self.max_errors)
            .build()
    }

    /// Run the validation described by the arguments.
    ///
    /// # Errors
    ///
    /// Propagates every [`CliError`] from [`commands::validate`], including
    /// [`CliError::ValidationFailed`] when the document has errors.
    pub fn execute(&self) -> Result<(), CliError> {
        let source = self.source()?;
        commands::validate(&source, self.level, self.options(), self.json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["msc-validate", "sheet.msc"]).unwrap();
        assert_eq!(cli.level, ValidationLevel::Logic);
        assert_eq!(cli.max_errors, DEFAULT_MAX_ERRORS);
        assert_eq!(cli.options(), ValidatorOptions::default());
        assert_eq!(cli.source().unwrap(), Source::File(PathBuf::from("sheet.msc")));
    }

    #[test]
    fn test_string_wins_over_file() {
        let cli = Cli::try_parse_from(["msc-validate", "sheet.msc", "--string", "version:1.5"]).unwrap();
        assert_eq!(cli.source().unwrap(), Source::Inline("version:1.5".to_string()));
    }

    #[test]
    fn test_no_input() {
        let cli = Cli::try_parse_from(["msc-validate"]).unwrap();
        assert!(matches!(cli.source(), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_level_and_flags() {
        let cli = Cli::try_parse_from([
            "msc-validate",
            "x.msc",
            "--level",
            "2",
            "--strict",
            "--max-errors",
            "5",
        ])
        .unwrap();
        let opts = cli.options();
        assert!(opts.enable_semantic_level);
        assert!(!opts.enable_logic_level);
        assert!(opts.strict_mode);
        assert_eq!(opts.max_errors, 5);
    }

    #[test]
    fn test_unknown_level_rejected() {
        assert!(Cli::try_parse_from(["msc-validate", "x.msc", "--level", "5"]).is_err());
    }
}
