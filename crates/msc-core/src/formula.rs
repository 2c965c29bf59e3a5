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

//! Formula codec.
//!
//! Formulas are stored in `vtf` attributes with the save format's line
//! escapes applied (`\c` for `:`, `\n` for newline, `\b` for backslash).
//! This module decodes them and pulls out the cell references and ranges
//! the logic pass needs. Nothing here evaluates a formula.

/// Spreadsheet function names accepted by the basic syntax check.
pub const KNOWN_FUNCTIONS: &[&str] = &[
    "ABS", "ACOS", "AND", "ASIN", "ATAN", "ATAN2", "AVERAGE", "CHOOSE", "COS", "COUNT",
    "COUNTA", "COUNTBLANK", "COUNTIF", "DATE", "DAY", "DDB", "DEGREES", "EVEN", "EXACT",
    "EXP", "FACT", "FALSE", "FIND", "FV", "HLOOKUP", "HOUR", "IF", "INDEX", "INT", "IRR",
    "ISBLANK", "ISERR", "ISERROR", "ISLOGICAL", "ISNA", "ISNONTEXT", "ISTEXT", "LEFT",
    "LEN", "LN", "LOG", "LOG10", "LOWER", "MATCH", "MAX", "MID", "MIN", "MINUTE", "MOD",
    "MONTH", "N", "NA", "NPER", "NPV", "NOW", "ODD", "OR", "PI", "PMT", "POWER", "PRODUCT",
    "PROPER", "PV", "RADIANS", "RATE", "REPLACE", "REPT", "RIGHT", "ROUND", "ROWS",
    "COLUMNS", "SECOND", "SIN", "SLN", "SQRT", "STDEV", "STDEVP", "SUBSTITUTE", "SUM",
    "SUMIF", "SYD", "T", "TAN", "TIME", "TODAY", "TRUE", "TRUNC", "UPPER", "VALUE", "VAR",
    "VARP", "VLOOKUP", "WEEKDAY", "YEAR",
];

/// Decode a formula from its escaped save-format form.
///
/// Escapes are applied in order: `\c` to `:`, `\n` to newline, `\b` to `\`.
///
/// # Examples
///
/// ```
/// use msc_core::formula::decode;
///
/// assert_eq!(decode("SUM(A1\\cA3)"), "SUM(A1:A3)");
/// ```
pub fn decode(raw: &str) -> String {
    raw.replace("\\c", ":")
        .replace("\\n", "\n")
        .replace("\\b", "\\")
}

/// Escape text for a single save-format token; the inverse of [`decode`].
pub fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\b"),
            ':' => out.push_str("\\c"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}

#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Length of a `[A-Z]+[0-9]+` match starting at `bytes[0]`, if any.
///
/// Both runs are taken greedily: a shorter letter run is always followed by
/// another letter and a shorter digit run by another digit, so backtracking
/// can never produce a different match.
fn coord_len(bytes: &[u8]) -> Option<usize> {
    let letters = bytes.iter().take_while(|b| b.is_ascii_uppercase()).count();
    if letters == 0 {
        return None;
    }
    let digits = bytes[letters..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    (digits > 0).then_some(letters + digits)
}

/// Extract every cell reference in a formula, first to last, duplicates kept.
///
/// A reference is a whole word (`[A-Za-z0-9_]` run) of the form
/// `[A-Z]+[0-9]+`, so `A1` is found in `=A1+B2` but not in `xA1` or `A1x`.
///
/// # Examples
///
/// ```
/// use msc_core::formula::extract_refs;
///
/// assert_eq!(extract_refs("=SUM(A1:A3)+A1"), vec!["A1", "A3", "A1"]);
/// ```
pub fn extract_refs(formula: &str) -> Vec<&str> {
    let bytes = formula.as_bytes();
    let mut refs = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if !is_word_byte(bytes[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && is_word_byte(bytes[i]) {
            i += 1;
        }
        if coord_len(&bytes[start..i]) == Some(i - start) {
            refs.push(&formula[start..i]);
        }
    }

    refs
}

/// Extract every `coord:coord` range in a formula, first to last.
///
/// Both endpoints must have the coordinate shape, so numeric colon runs such
/// as `1:2:3` are never reported. Matches do not overlap.
///
/// # Examples
///
/// ```
/// use msc_core::formula::extract_ranges;
///
/// assert_eq!(extract_ranges("=SUM(A1:B2)+1:2"), vec!["A1:B2"]);
/// ```
pub fn extract_ranges(formula: &str) -> Vec<&str> {
    let bytes = formula.as_bytes();
    let mut ranges = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let matched = coord_len(&bytes[i..]).and_then(|first| {
            let colon = i + first;
            if bytes.get(colon) != Some(&b':') {
                return None;
            }
            coord_len(&bytes[colon + 1..]).map(|second| colon + 1 + second)
        });

        match matched {
            Some(end) => {
                ranges.push(&formula[i..end]);
                i = end;
            }
            None => i += 1,
        }
    }

    ranges
}

/// A problem found by [`check_basic_syntax`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaIssue {
    /// Parentheses do not balance (a `)` without opener, or openers left over).
    UnbalancedParentheses,
    /// A `NAME(` call whose name is not in [`KNOWN_FUNCTIONS`].
    UnknownFunction(String),
}

/// Names of every `NAME(` call in a formula, allowing whitespace before `(`.
fn function_calls(formula: &str) -> Vec<&str> {
    let bytes = formula.as_bytes();
    let mut names = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_uppercase() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_uppercase() {
            i += 1;
        }
        let name_end = i;
        let rest = &formula[name_end..];
        let trimmed = rest.trim_start();
        if trimmed.starts_with('(') {
            names.push(&formula[start..name_end]);
            i = name_end + (rest.len() - trimmed.len()) + 1;
        }
    }

    names
}

/// Check parenthesis balance and function names.
///
/// Balance is checked first; an imbalance is reported once. A `)` without a
/// matching `(` stops the check there. Function names are compared
/// case-sensitively against [`KNOWN_FUNCTIONS`].
pub fn check_basic_syntax(formula: &str) -> Vec<FormulaIssue> {
    let mut issues = Vec::new();

    let mut depth: i64 = 0;
    for ch in formula.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        // a close before its open ends the check
        if depth < 0 {
            return vec![FormulaIssue::UnbalancedParentheses];
        }
    }
    if depth != 0 {
        issues.push(FormulaIssue::UnbalancedParentheses);
    }

    for name in function_calls(formula) {
        if !KNOWN_FUNCTIONS.contains(&name) {
            issues.push(FormulaIssue::UnknownFunction(name.to_string()));
        }
    }

    issues
}
