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

//! MSC CLI library for command-line parsing and execution.
//!
//! The `msc-validate` binary reads a SocialCalc save file (or an inline
//! string), runs [`msc_core::Validator`] and prints either a human-readable
//! report or the JSON form of [`msc_core::ValidationResult`].
//!
//! Exit status is 0 when the document is valid and 1 otherwise, including
//! I/O and configuration failures.
//!
//! # Environment
//!
//! - `MSC_MAX_FILE_SIZE`: maximum input file size in bytes (default 100 MB)
//! - `RUST_LOG`: overrides the log filter

pub mod cli;
pub mod commands;
pub mod error;

pub use error::CliError;
