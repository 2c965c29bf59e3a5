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

//! Token predicates for the MSC save format.
//!
//! Pure, allocation-free recognizers for the small token shapes the format
//! uses: cell coordinates (`A1`, `AA10`), column ids (`B`), row numbers,
//! sizes (`80`, `12px`, `50%`, `auto`) and font sizes (`12pt`, `small`).
//!
//! All predicates are ASCII-only: a non-ASCII byte never matches.

/// Named CSS font sizes accepted in font definitions.
pub const NAMED_FONT_SIZES: &[&str] = &[
    "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large",
];

/// Length of the leading run of bytes satisfying `pred`.
#[inline]
fn run_len(bytes: &[u8], pred: impl Fn(u8) -> bool) -> usize {
    bytes.iter().take_while(|&&b| pred(b)).count()
}

/// `[0-9]+`
#[inline]
fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `[0-9]+` followed by exactly `suffix`.
fn is_digits_with_suffix(s: &str, suffix: &str) -> bool {
    s.strip_suffix(suffix).map_or(false, is_digits)
}

/// Cell coordinate: `[A-Z]+[0-9]+`.
///
/// # Examples
///
/// ```
/// use msc_core::lex::is_valid_coord;
///
/// assert!(is_valid_coord("A1"));
/// assert!(is_valid_coord("ZZ999"));
/// assert!(!is_valid_coord("a1"));
/// assert!(!is_valid_coord("A"));
/// assert!(!is_valid_coord("1A"));
/// ```
pub fn is_valid_coord(s: &str) -> bool {
    let bytes = s.as_bytes();
    let letters = run_len(bytes, |b| b.is_ascii_uppercase());
    if letters == 0 {
        return false;
    }
    let digits = run_len(&bytes[letters..], |b| b.is_ascii_digit());
    digits > 0 && letters + digits == bytes.len()
}

/// Column identifier: `[A-Z]+`.
pub fn is_valid_col_id(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_uppercase())
}

/// Row number: `[0-9]+`.
pub fn is_valid_row_number(s: &str) -> bool {
    is_digits(s)
}

/// Numeric style id: `[0-9]+`.
pub fn is_numeric_id(s: &str) -> bool {
    is_digits(s)
}

/// Sheet, column and row size: `N`, `Npx`, `N%` or `auto`.
pub fn is_valid_size(s: &str) -> bool {
    s == "auto" || is_digits(s) || is_digits_with_suffix(s, "px") || is_digits_with_suffix(s, "%")
}

/// Font size: `Npt`, `Npx` or a named CSS size.
pub fn is_valid_font_size(s: &str) -> bool {
    is_digits_with_suffix(s, "pt") || is_digits_with_suffix(s, "px") || NAMED_FONT_SIZES.contains(&s)
}
