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

//! MSC Validation
//!
//! Three-level validation of the MSC (SocialCalc) spreadsheet save format.
//!
//! - **Syntax**: version line, line grammar, attribute arity and value shapes
//! - **Semantic**: every style a cell references is defined somewhere in the file
//! - **Logic**: formula references, circular references, range endpoints
//!
//! Validation never fails. Every problem becomes a [`Diagnostic`] in the
//! returned [`ValidationResult`].
//!
//! ## Quick Start
//!
//! ```rust
//! use msc_core::{validate, Severity};
//!
//! let result = validate("version:1.5\ncell:A1:v:10\ncell:A2:vtf:n:10:A1");
//! assert!(result.valid);
//! assert_eq!(result.formulas, 1);
//!
//! for diag in result.diagnostics() {
//!     if diag.severity() == Severity::Error {
//!         eprintln!("{}", diag);
//!     }
//! }
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use msc_core::{validate_with_options, Level, ValidationLevel, ValidatorOptions};
//!
//! let options = ValidatorOptions::builder()
//!     .level(ValidationLevel::Semantic)
//!     .strict(true)
//!     .build();
//!
//! let result = validate_with_options("version:1.5\ncell:A1:f:9", options);
//! assert!(!result.valid);
//! assert_eq!(result.errors[0].level(), Level::Semantic);
//! ```
//!
//! ## Inspecting Registries
//!
//! ```rust
//! use msc_core::Validator;
//!
//! let mut validator = Validator::default();
//! validator.validate("version:1.5\nsheet:c:2:r:2\ncell:B2:v:1");
//! assert_eq!(validator.sheet().max_col, 2);
//! assert!(validator.cells().contains("B2"));
//! ```

mod context;
mod diagnostic;
mod error;
pub mod formula;
pub mod lex;
pub mod line;
mod logic;
mod options;
mod registry;
mod report;
mod semantic;
mod syntax;
mod validator;

pub use context::{DiagnosticSink, ValidationContext};
pub use diagnostic::{Diagnostic, Level, Severity};
pub use error::{ConfigError, ConfigResult};
pub use options::{ValidationLevel, ValidatorOptions, ValidatorOptionsBuilder, DEFAULT_MAX_ERRORS};
pub use registry::{Cell, CellRegistry, NamedRanges, SheetProperties, StyleCategory, StyleRegistry};
pub use report::{StyleCounts, ValidationResult, ValidationStats};
pub use syntax::{KNOWN_VERSIONS, VALUE_TYPES};
pub use validator::{validate, validate_with_options, Validator};
