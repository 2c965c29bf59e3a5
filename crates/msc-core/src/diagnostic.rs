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

//! Validation diagnostic types

#[cfg(feature = "serde")]
use serde::Serialize;

/// Validation tier that produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Level {
    /// Line and attribute grammar
    Syntax,
    /// Cross-references to the style registry, formula shape
    Semantic,
    /// Formula graph: references, ranges, cycles
    Logic,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax => write!(f, "SYNTAX"),
            Self::Semantic => write!(f, "SEMANTIC"),
            Self::Logic => write!(f, "LOGIC"),
        }
    }
}

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Severity {
    /// Warning - might be an issue
    Warning,
    /// Error - the document will not load cleanly
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A validation diagnostic
///
/// Line numbers are 1-based source lines; line 0 marks problems with the
/// input as a whole (for example an empty document).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Diagnostic {
    /// Source line
    line: u32,
    /// Validation tier
    level: Level,
    /// Severity level
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    severity: Severity,
    /// Human-readable message
    message: String,
}

impl Diagnostic {
    pub fn new(line: u32, level: Level, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            line,
            level,
            severity,
            message: message.into(),
        }
    }

    pub fn error(line: u32, level: Level, message: impl Into<String>) -> Self {
        Self::new(line, level, Severity::Error, message)
    }

    pub fn warning(line: u32, level: Level, message: impl Into<String>) -> Self {
        Self::new(line, level, Severity::Warning, message)
    }

    // Public getters
    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Escalate the severity to error level (used by strict mode).
    pub fn escalate_to_error(&mut self) {
        self.severity = Severity::Error;
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {} [{}]: {}", self.line, self.level, self.message)
    }
}
