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

//! Integration tests for the msc-validate binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::NamedTempFile;

const VALID_DOC: &str = "\
version:1.5
font:1:normal bold 12pt Arial
cell:A1:v:10:f:1
cell:A2:vtf:n:20:A1*2
";

const INVALID_DOC: &str = "\
version:1.5
cell:A1:f:9
";

fn msc_cmd() -> Command {
    let mut cmd = Command::cargo_bin("msc-validate").expect("Failed to find msc-validate binary");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn create_temp_file(content: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".msc")
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write temp file");
    file
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    msc_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SocialCalc save format validator"))
        .stdout(predicate::str::contains("--strict"));
}

#[test]
fn test_version_output() {
    msc_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("msc-validate"));
}

// ===== Report Tests =====

#[test]
fn test_valid_file() {
    let file = create_temp_file(VALID_DOC);
    msc_cmd()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("SOCIALCALC VALIDATOR"))
        .stdout(predicate::str::contains("Validation Level: Level 3 (All - Syntax + Semantic + Logic)"))
        .stdout(predicate::str::contains("Strict Mode: No"))
        .stdout(predicate::str::contains("Status:           ✅ VALID"))
        .stdout(predicate::str::contains("Cells found:    2"))
        .stdout(predicate::str::contains("Formulas found: 1"))
        .stdout(predicate::str::contains("✅ Validation passed!"));
}

#[test]
fn test_invalid_file_exits_with_failure() {
    let file = create_temp_file(INVALID_DOC);
    msc_cmd()
        .arg(file.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("❌ ERRORS:"))
        .stdout(predicate::str::contains(
            "Line 2 [SEMANTIC]: Cell A1: font 9 not defined. Add 'font:9:...' line",
        ))
        .stdout(predicate::str::contains("Status:           ❌ INVALID"))
        .stderr(predicate::str::contains("Error: Validation failed with 1 error(s)"));
}

#[test]
fn test_inline_string_with_escaped_newlines() {
    msc_cmd()
        .args(["--string", "version:1.5\\ncell:A1:v:10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Input: String ("))
        .stdout(predicate::str::contains("Cells found:    1"));
}

#[test]
fn test_string_takes_precedence_over_file() {
    msc_cmd()
        .args(["/nonexistent/sheet.msc", "--string", "version:1.5"])
        .assert()
        .success();
}

#[test]
fn test_json_output() {
    let file = create_temp_file(INVALID_DOC);
    let output = msc_cmd().arg(file.path()).arg("--json").output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("SOCIALCALC VALIDATOR"));

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["errorCount"], 1);
    assert_eq!(json["warningCount"], 0);
    assert_eq!(json["cells"], 1);
    assert_eq!(json["errors"][0]["line"], 2);
    assert_eq!(json["errors"][0]["level"], "SEMANTIC");
    assert_eq!(json["errors"][0]["type"], "ERROR");
    assert_eq!(json["stats"]["linesProcessed"], 2);
    assert_eq!(json["styleDefinitions"]["fonts"], 0);
}

// ===== Option Tests =====

#[test]
fn test_strict_mode_fails_on_warnings() {
    let doc = "version:1.5\ncell:A1:zz:1";
    msc_cmd().args(["--string", doc]).assert().success();
    msc_cmd()
        .args(["--string", doc, "--strict"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Strict Mode: Yes"))
        .stdout(predicate::str::contains("Line 2 [SYNTAX]: Cell A1: unknown attribute 'zz'"));
}

#[test]
fn test_level_one_skips_semantic_checks() {
    let file = create_temp_file(INVALID_DOC);
    msc_cmd()
        .arg(file.path())
        .args(["--level", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation Level: Level 1 (Syntax Only)"));
}

#[test]
fn test_unknown_level_is_rejected() {
    msc_cmd()
        .args(["--string", "version:1.5", "--level", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid validation level '5'"));
}

#[test]
fn test_zero_max_errors_is_rejected() {
    msc_cmd()
        .args(["--string", "version:1.5", "--max-errors", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("max_errors must be a positive integer"));
}

#[test]
fn test_max_errors_limits_report() {
    let mut doc = String::from("version:1.5");
    for row in 1..=20 {
        doc.push_str(&format!("\\ncell:a{}:v:1", row));
    }
    let output = msc_cmd()
        .args(["--string", &doc, "--max-errors", "3", "--json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["errorCount"], 3);
    assert_eq!(json["stats"]["linesProcessed"], 4);
}

#[test]
fn test_verbose_traces_to_stderr() {
    msc_cmd()
        .args(["--string", "version:1.5\\ncell:A1:v:10", "--verbose"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Version 1.5 validated"))
        .stdout(predicate::str::contains("Version 1.5 validated").not());
}

// ===== Input Errors =====

#[test]
fn test_missing_file() {
    msc_cmd()
        .arg("/nonexistent/sheet.msc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_file_size_limit() {
    let file = create_temp_file(VALID_DOC);
    msc_cmd()
        .env("MSC_MAX_FILE_SIZE", "10")
        .arg(file.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("too large"));
}

#[test]
fn test_no_input() {
    msc_cmd()
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "No input specified. Use a file path or --string option",
        ));
}
