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

//! Validator configuration.

use crate::error::{ConfigError, ConfigResult};
use std::str::FromStr;

/// Default number of errors after which the line pass stops.
pub const DEFAULT_MAX_ERRORS: usize = 100;

/// Options controlling a validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Run the version pass and per-line grammar checks (default: true).
    pub enable_syntax_level: bool,
    /// Resolve style references and check formula shape (default: true).
    pub enable_semantic_level: bool,
    /// Analyze the formula graph (default: true).
    pub enable_logic_level: bool,
    /// Emit a step-by-step trace through `tracing` (default: false).
    pub verbose: bool,
    /// Stop the line pass once this many errors are recorded (default: 100).
    pub max_errors: usize,
    /// Record every warning as an error (default: false).
    pub strict_mode: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            enable_syntax_level: true,
            enable_semantic_level: true,
            enable_logic_level: true,
            verbose: false,
            max_errors: DEFAULT_MAX_ERRORS,
            strict_mode: false,
        }
    }
}

impl ValidatorOptions {
    /// Create a new builder for ValidatorOptions.
    ///
    /// # Examples
    ///
    /// ```
    /// use msc_core::ValidatorOptions;
    ///
    /// let opts = ValidatorOptions::builder()
    ///     .strict(true)
    ///     .max_errors(10)
    ///     .build();
    /// assert!(opts.strict_mode);
    /// ```
    pub fn builder() -> ValidatorOptionsBuilder {
        ValidatorOptionsBuilder::new()
    }

    /// Options enabling every tier up to and including `level`.
    pub fn for_level(level: ValidationLevel) -> Self {
        Self {
            enable_semantic_level: level >= ValidationLevel::Semantic,
            enable_logic_level: level >= ValidationLevel::Logic,
            ..Self::default()
        }
    }

    /// Check that the options describe a runnable configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_errors == 0 {
            return Err(ConfigError::ZeroMaxErrors(self.max_errors));
        }
        Ok(())
    }
}

/// Builder for ergonomic construction of ValidatorOptions.
#[derive(Debug, Clone, Default)]
pub struct ValidatorOptionsBuilder {
    options: ValidatorOptions,
}

impl ValidatorOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable every tier up to and including `level`, disabling the rest.
    pub fn level(mut self, level: ValidationLevel) -> Self {
        self.options.enable_semantic_level = level >= ValidationLevel::Semantic;
        self.options.enable_logic_level = level >= ValidationLevel::Logic;
        self
    }

    pub fn syntax(mut self, enabled: bool) -> Self {
        self.options.enable_syntax_level = enabled;
        self
    }

    pub fn semantic(mut self, enabled: bool) -> Self {
        self.options.enable_semantic_level = enabled;
        self
    }

    pub fn logic(mut self, enabled: bool) -> Self {
        self.options.enable_logic_level = enabled;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.options.verbose = verbose;
        self
    }

    /// Set the error count at which the line pass stops.
    ///
    /// [`crate::Validator`] reads 0 as [`DEFAULT_MAX_ERRORS`];
    /// [`ValidatorOptions::validate`] rejects it.
    pub fn max_errors(mut self, max_errors: usize) -> Self {
        self.options.max_errors = max_errors;
        self
    }

    /// Set strict mode (warnings are recorded as errors).
    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict_mode = strict;
        self
    }

    /// Build the options.
    pub fn build(self) -> ValidatorOptions {
        self.options
    }
}

/// Highest validation tier to run. Each tier includes the ones below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidationLevel {
    /// Level 1: grammar only.
    Syntax,
    /// Level 2: grammar plus style cross-references.
    Semantic,
    /// Level 3: everything, including the formula graph.
    Logic,
}

impl FromStr for ValidationLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Self::Syntax),
            "2" => Ok(Self::Semantic),
            "3" | "all" => Ok(Self::Logic),
            other => Err(ConfigError::UnknownLevel(other.to_string())),
        }
    }
}

impl std::fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax => write!(f, "Level 1 (Syntax Only)"),
            Self::Semantic => write!(f, "Level 2 (Syntax + Semantic)"),
            Self::Logic => write!(f, "Level 3 (All - Syntax + Semantic + Logic)"),
        }
    }
}
