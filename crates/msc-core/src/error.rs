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

//! Error types for validator configuration.
//!
//! Validation itself never fails: problems in a document are reported as
//! [`Diagnostic`](crate::Diagnostic)s. The errors here cover the only
//! fallible surface of the crate, turning user-supplied settings into
//! [`ValidatorOptions`](crate::ValidatorOptions).

use thiserror::Error;

/// An invalid validator setting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `max_errors` must allow at least one error before stopping.
    #[error("max_errors must be a positive integer, got {0}")]
    ZeroMaxErrors(usize),

    /// Unrecognized validation level name.
    #[error("invalid validation level '{0}'. Must be 1, 2, 3, or all")]
    UnknownLevel(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
