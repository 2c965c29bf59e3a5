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

//! End-to-end validation scenarios.

use msc_core::{
    validate, validate_with_options, Level, Severity, StyleCounts, ValidationLevel, ValidatorOptions,
};

const WELL_FORMED: &str = "\
version:1.5
sheet:c:3:r:4:w:80:h:20
col:A:w:100
row:1:h:25
font:1:normal bold 12pt Arial
font:2:* 14pt *
color:1:rgb(0,0,0)
color:2:#FFFFFF
border:1:1px solid rgb(0,0,0)
layout:1:padding:2px 2px 2px 2px;vertical-align:top;
cellformat:1:center
valueformat:1:#,##0.00
cell:A1:t:Item:f:1:c:1:bg:2:cf:1
cell:A2:v:10:ntvf:1:l:1
cell:A3:v:20:b:1:0:1:0
cell:A4:vtf:n:30:SUM(A2\\cA3)
name:TOTAL:A4
";

// =============================================================================
// Basic scenarios
// =============================================================================

#[test]
fn test_minimal_document_is_valid() {
    let result = validate("version:1.5\ncell:A1:v:10");
    assert!(result.valid);
    assert_eq!(result.cells, 1);
    assert_eq!(result.formulas, 0);
    assert_eq!(result.error_count, 0);
    assert_eq!(result.warning_count, 0);
}

#[test]
fn test_missing_version_is_single_syntax_error() {
    let result = validate("cell:A1:v:10");
    assert!(!result.valid);
    assert_eq!(result.error_count, 1);
    assert_eq!(result.errors[0].level(), Level::Syntax);
    assert_eq!(result.warning_count, 0);
}

#[test]
fn test_undefined_font_is_semantic_error() {
    let result = validate("version:1.5\ncell:A1:f:9");
    assert!(!result.valid);
    assert_eq!(result.error_count, 1);
    assert_eq!(result.errors[0].level(), Level::Semantic);
    assert!(result.errors[0].message().contains("font 9"));
    assert_eq!(result.errors[0].line(), 2);
}

#[test]
fn test_self_referencing_formula_is_logic_error() {
    let result = validate("version:1.5\ncell:A1:vtf:n:5:=A1");
    assert!(!result.valid);
    assert_eq!(result.error_count, 1);
    assert_eq!(result.errors[0].level(), Level::Logic);
    assert!(result.errors[0].message().contains("Circular reference"));
    assert!(result.errors[0].message().contains("A1"));
    assert_eq!(result.formulas, 1);
}

#[test]
fn test_undefined_borders_except_zero() {
    let result = validate("version:1.5\ncell:A1:b:1:2:3:0");
    assert_eq!(result.error_count, 3);
    assert!(result.errors.iter().all(|d| d.level() == Level::Semantic));
    let sides: Vec<_> = result
        .errors
        .iter()
        .map(|d| d.message().split_whitespace().nth(2).unwrap_or_default().to_string())
        .collect();
    assert_eq!(sides, vec!["top", "right", "bottom"]);
}

#[test]
fn test_unknown_attribute_warning_and_strict_error() {
    let text = "version:1.5\ncell:A1:zz:foo";

    let lenient = validate(text);
    assert!(lenient.valid);
    assert_eq!(lenient.warning_count, 1);
    assert_eq!(lenient.warnings[0].level(), Level::Syntax);
    assert_eq!(lenient.warnings[0].severity(), Severity::Warning);

    let strict = validate_with_options(text, ValidatorOptions::builder().strict(true).build());
    assert!(!strict.valid);
    assert_eq!(strict.error_count, 1);
    assert_eq!(strict.warning_count, 0);
    assert_eq!(strict.errors[0].level(), Level::Syntax);
    assert_eq!(strict.errors[0].severity(), Severity::Error);
}

// =============================================================================
// Complete documents
// =============================================================================

#[test]
fn test_well_formed_document() {
    let result = validate(WELL_FORMED);
    assert!(result.valid, "{:?}", result.errors);
    assert_eq!(result.warning_count, 0, "{:?}", result.warnings);
    assert_eq!(result.cells, 4);
    assert_eq!(result.formulas, 1);
    assert_eq!(result.stats.lines_processed, 17);
    assert_eq!(result.stats.syntax_checks, 17);
    assert_eq!(result.stats.semantic_checks, 8);
    // two references, two DFS edges, one range
    assert_eq!(result.stats.logic_checks, 5);
    assert_eq!(
        result.style_definitions,
        StyleCounts {
            fonts: 2,
            colors: 2,
            borders: 1,
            layouts: 1,
            cellformats: 1,
            valueformats: 1,
        }
    );
}

#[test]
fn test_diagnostics_from_every_level() {
    let text = "\
version:1.5
font:1:normal bold 12pt Arial
cell:A1:v:ten
cell:A2:f:2
cell:A3:vtf:n:0:A4+Z99
cell:A4:vtf:n:0:A3
";
    let result = validate(text);
    assert!(!result.valid);

    let levels: Vec<_> = result.errors.iter().map(|d| (d.line(), d.level())).collect();
    assert_eq!(
        levels,
        vec![(3, Level::Syntax), (4, Level::Semantic), (5, Level::Logic)]
    );
    assert_eq!(
        result.errors[2].message(),
        "Circular reference detected: A3 → A4 → A3"
    );
    assert_eq!(result.warning_count, 1);
    assert_eq!(
        result.warnings[0].message(),
        "Cell A3: formula references undefined cell Z99"
    );
}

#[test]
fn test_early_close_paren_reports_only_imbalance() {
    let result = validate("version:1.5\ncell:A1:v:1\ncell:B1:vtf:n:1:A1)+FOO(A1");
    assert_eq!(result.error_count, 1);
    assert_eq!(
        result.errors[0].message(),
        "Cell B1: unbalanced parentheses in formula"
    );
    assert_eq!(result.errors[0].line(), 3);
    assert!(result.warnings.iter().all(|d| d.level() != Level::Semantic));
}

#[test]
fn test_redeclared_cell_replaces_earlier() {
    let result = validate("version:1.5\ncell:A1:vtf:n:1:B1\ncell:B1:v:1\ncell:A1:v:2");
    assert!(result.valid);
    assert_eq!(result.cells, 2);
    assert_eq!(result.formulas, 0);
    assert_eq!(result.stats.logic_checks, 0);
}

#[test]
fn test_validation_levels() {
    let text = "version:1.5\ncell:A1:f:9:vtf:n:1:A1";

    let syntax = validate_with_options(text, ValidatorOptions::for_level(ValidationLevel::Syntax));
    assert!(syntax.valid);

    let semantic = validate_with_options(text, ValidatorOptions::for_level(ValidationLevel::Semantic));
    assert_eq!(semantic.error_count, 1);
    assert_eq!(semantic.errors[0].level(), Level::Semantic);

    let all = validate_with_options(text, ValidatorOptions::for_level(ValidationLevel::Logic));
    assert_eq!(all.error_count, 2);
    assert_eq!(all.errors[1].level(), Level::Logic);
}

#[test]
fn test_syntax_level_disabled_skips_cell_grammar() {
    let text = "version:1.5\nsheet:recalc:maybe\nbogus:1\ncell:A1:f:9:vtf:n:1:A1\ncell:a1:v:1";
    let options = ValidatorOptions::builder().syntax(false).build();
    let result = validate_with_options(text, options);

    // cells are registered as written, without attributes
    assert_eq!(result.cells, 2);
    assert_eq!(result.formulas, 0);
    assert_eq!(result.error_count, 1);
    assert_eq!(result.errors[0].level(), Level::Syntax);
    assert_eq!(result.errors[0].line(), 2);
    assert_eq!(result.warning_count, 1);
    assert_eq!(result.warnings[0].message(), "Unknown line type: bogus");
    assert_eq!(result.stats.syntax_checks, 3);
    assert_eq!(result.stats.semantic_checks, 0);
    assert_eq!(result.stats.logic_checks, 0);
}

// =============================================================================
// Limits and strict mode
// =============================================================================

#[test]
fn test_max_errors_stops_line_pass() {
    let mut text = String::from("version:1.5\n");
    for row in 1..=50 {
        text.push_str(&format!("cell:a{}:v:1\n", row));
    }

    let result = validate_with_options(&text, ValidatorOptions::builder().max_errors(10).build());
    assert_eq!(result.error_count, 10);
    assert_eq!(result.stats.lines_processed, 11);
    assert_eq!(result.stats.syntax_checks, 11);
}

#[test]
fn test_max_errors_does_not_stop_logic_pass() {
    let text = "version:1.5\ncell:B1:vtf:n:1:B1\ncell:A1:v:x\ncell:C1:v:y";
    let result = validate_with_options(text, ValidatorOptions::builder().max_errors(1).build());
    assert_eq!(result.stats.lines_processed, 3);
    assert_eq!(result.cells, 2);
    // the cutoff bounds the line pass only; the cycle is still reported
    assert_eq!(result.error_count, 2);
    assert_eq!(result.errors[1].level(), Level::Logic);
}

#[test]
fn test_strict_mode_arithmetic() {
    let text = "\
version:2.0
cell:A1:zz:1
cell:A2:vtf:n:1:B9
cell:A3:f:7
layout:1:margin:0
foo:bar
";
    let lenient = validate(text);
    let strict = validate_with_options(text, ValidatorOptions::builder().strict(true).build());

    assert_eq!(lenient.error_count, 1);
    assert_eq!(lenient.warning_count, 5);
    assert_eq!(strict.error_count, lenient.error_count + lenient.warning_count);
    assert_eq!(strict.warning_count, 0);
    assert_eq!(strict.stats, lenient.stats);
}

#[test]
fn test_repeated_runs_are_identical() {
    let first = validate(WELL_FORMED);
    let second = validate(WELL_FORMED);
    assert_eq!(first, second);

    let broken = "version:1.5\ncell:A1:vtf:n:1:B1\ncell:B1:vtf:n:1:A1\ncell:C1:zz:1";
    assert_eq!(validate(broken), validate(broken));
}
