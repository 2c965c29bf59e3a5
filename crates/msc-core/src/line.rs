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

//! Line classification and cell attribute parsing.
//!
//! A save-format line is `<type>:<payload>`. The payload of a `cell:` line is
//! a coordinate followed by colon-separated attribute/value pairs, where most
//! attributes take one token but two take more:
//!
//! - `vtf` takes a value type, a value and a formula. The formula is every
//!   remaining token joined back with `:`.
//! - `b` takes four border ids (top, right, bottom, left).

use crate::registry::StyleCategory;

/// Kind of a save-format line, from the text before the first `:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Version,
    Cell,
    Sheet,
    Col,
    Row,
    Style(StyleCategory),
    Name,
    Unknown(&'a str),
}

impl<'a> LineKind<'a> {
    fn from_type(line_type: &'a str) -> Self {
        match line_type {
            "version" => Self::Version,
            "cell" => Self::Cell,
            "sheet" => Self::Sheet,
            "col" => Self::Col,
            "row" => Self::Row,
            "name" => Self::Name,
            other => StyleCategory::from_line_type(other)
                .map(Self::Style)
                .unwrap_or(Self::Unknown(other)),
        }
    }
}

/// Split a line on its first `:` into kind and payload.
///
/// Returns `None` if the line contains no `:` at all.
///
/// # Examples
///
/// ```
/// use msc_core::line::{classify, LineKind};
///
/// assert_eq!(classify("cell:A1:v:10"), Some((LineKind::Cell, "A1:v:10")));
/// assert_eq!(classify("nonsense"), None);
/// ```
pub fn classify(line: &str) -> Option<(LineKind<'_>, &str)> {
    let (line_type, rest) = line.split_once(':')?;
    Some((LineKind::from_type(line_type), rest))
}

/// Split a style payload `<id>:<definition>` on its first `:`.
///
/// The definition keeps any further colons (layouts contain `padding:...`).
pub fn split_definition(rest: &str) -> Option<(&str, &str)> {
    rest.split_once(':')
}

/// Known cell attribute names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellAttr<'a> {
    /// `v`: numeric value
    Value,
    /// `t`: text value
    Text,
    /// `vtf`: value type, value and formula
    ValueTypeFormula,
    /// `f`: font reference
    Font,
    /// `c`: text color reference
    Color,
    /// `bg`: background color reference
    Background,
    /// `cf`: cell format reference
    CellFormat,
    /// `l`: layout reference
    Layout,
    /// `ntvf`: number value format reference
    NumberValueFormat,
    /// `tvf`: text value format reference
    TextValueFormat,
    /// `b`: four border references
    Borders,
    ColSpan,
    RowSpan,
    Unknown(&'a str),
}

impl<'a> CellAttr<'a> {
    pub fn parse(name: &'a str) -> Self {
        match name {
            "v" => Self::Value,
            "t" => Self::Text,
            "vtf" => Self::ValueTypeFormula,
            "f" => Self::Font,
            "c" => Self::Color,
            "bg" => Self::Background,
            "cf" => Self::CellFormat,
            "l" => Self::Layout,
            "ntvf" => Self::NumberValueFormat,
            "tvf" => Self::TextValueFormat,
            "b" => Self::Borders,
            "colspan" => Self::ColSpan,
            "rowspan" => Self::RowSpan,
            other => Self::Unknown(other),
        }
    }

    /// The attribute name as written in the save format.
    pub fn name(&self) -> &'a str {
        match self {
            Self::Value => "v",
            Self::Text => "t",
            Self::ValueTypeFormula => "vtf",
            Self::Font => "f",
            Self::Color => "c",
            Self::Background => "bg",
            Self::CellFormat => "cf",
            Self::Layout => "l",
            Self::NumberValueFormat => "ntvf",
            Self::TextValueFormat => "tvf",
            Self::Borders => "b",
            Self::ColSpan => "colspan",
            Self::RowSpan => "rowspan",
            Self::Unknown(name) => *name,
        }
    }
}

/// Border ids for the four sides of a cell. `"0"` means no border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Borders<'a> {
    pub top: &'a str,
    pub right: &'a str,
    pub bottom: &'a str,
    pub left: &'a str,
}

impl<'a> Borders<'a> {
    /// Sentinel id meaning "no border on this side".
    pub const NONE: &'static str = "0";

    /// `(side name, id)` pairs in top, right, bottom, left order.
    pub fn sides(&self) -> [(&'static str, &'a str); 4] {
        [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ]
    }
}

/// A parsed attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue<'a> {
    Single(&'a str),
    ValueTypeFormula {
        value_type: &'a str,
        value: &'a str,
        /// Still escaped; see [`crate::formula::decode`]
        formula: String,
    },
    Borders(Borders<'a>),
}

impl AttrValue<'_> {
    /// The value as stored in a cell's attribute map.
    pub fn to_stored(&self) -> String {
        match self {
            Self::Single(v) => (*v).to_string(),
            Self::ValueTypeFormula {
                value_type,
                value,
                formula,
            } => format!("{}:{}:{}", value_type, value, formula),
            Self::Borders(b) => format!("{}:{}:{}:{}", b.top, b.right, b.bottom, b.left),
        }
    }
}

/// A fully assembled cell attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAttr<'a> {
    pub attr: CellAttr<'a>,
    pub value: AttrValue<'a>,
}

/// Why attribute parsing stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeError<'a> {
    /// An attribute name was the last token.
    MissingValue(&'a str),
    /// `vtf` with fewer than three following tokens.
    VtfArity,
    /// `vtf` whose rejoined formula is empty.
    VtfEmptyFormula,
    /// `b` with fewer than four following tokens.
    BorderArity,
}

/// Result of parsing the attribute tokens of one cell line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeParse<'a> {
    /// Attributes assembled before parsing stopped, in source order
    pub attributes: Vec<ParsedAttr<'a>>,
    /// Set when parsing was aborted
    pub error: Option<AttributeError<'a>>,
}

/// Parse attribute tokens (everything after the coordinate) left to right.
///
/// Parsing stops at the first malformed attribute; attributes already
/// assembled are kept, and a partially read `vtf` or `b` is never returned.
pub fn parse_cell_attributes<'a>(tokens: &[&'a str]) -> AttributeParse<'a> {
    let mut parse = AttributeParse::default();
    let mut i = 0;

    while i < tokens.len() {
        let name = tokens[i];
        if i + 1 >= tokens.len() {
            parse.error = Some(AttributeError::MissingValue(name));
            break;
        }

        let attr = CellAttr::parse(name);
        let value = match attr {
            CellAttr::ValueTypeFormula => {
                if i + 3 >= tokens.len() {
                    parse.error = Some(AttributeError::VtfArity);
                    break;
                }
                let formula = tokens[i + 3..].join(":");
                if formula.is_empty() {
                    parse.error = Some(AttributeError::VtfEmptyFormula);
                    break;
                }
                let value = AttrValue::ValueTypeFormula {
                    value_type: tokens[i + 1],
                    value: tokens[i + 2],
                    formula,
                };
                i = tokens.len();
                value
            }
            CellAttr::Borders => {
                if i + 4 >= tokens.len() {
                    parse.error = Some(AttributeError::BorderArity);
                    break;
                }
                let value = AttrValue::Borders(Borders {
                    top: tokens[i + 1],
                    right: tokens[i + 2],
                    bottom: tokens[i + 3],
                    left: tokens[i + 4],
                });
                i += 5;
                value
            }
            _ => {
                let value = AttrValue::Single(tokens[i + 1]);
                i += 2;
                value
            }
        };

        parse.attributes.push(ParsedAttr { attr, value });
    }

    parse
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<&str> {
        s.split(':').collect()
    }

    #[test]
    fn test_classify_known_kinds() {
        assert_eq!(classify("version:1.5").unwrap().0, LineKind::Version);
        assert_eq!(classify("sheet:c:5").unwrap().0, LineKind::Sheet);
        assert_eq!(classify("col:A:w:80").unwrap().0, LineKind::Col);
        assert_eq!(classify("row:1:h:20").unwrap().0, LineKind::Row);
        assert_eq!(classify("name:TOTAL:A1:A5").unwrap(), (LineKind::Name, "TOTAL:A1:A5"));
        assert_eq!(
            classify("border:1:1px solid #000000").unwrap().0,
            LineKind::Style(StyleCategory::Border)
        );
    }

    #[test]
    fn test_classify_unknown_and_missing_colon() {
        assert_eq!(classify("copiedfrom:A1:B2").unwrap().0, LineKind::Unknown("copiedfrom"));
        assert_eq!(classify("no colon here"), None);
    }

    #[test]
    fn test_split_definition_keeps_colons() {
        assert_eq!(
            split_definition("1:padding:2px 2px;vertical-align:top;"),
            Some(("1", "padding:2px 2px;vertical-align:top;"))
        );
    }

    #[test]
    fn test_cell_attr_names_round_trip() {
        for name in ["v", "t", "vtf", "f", "c", "bg", "cf", "l", "ntvf", "tvf", "b", "colspan", "rowspan", "zz"] {
            assert_eq!(CellAttr::parse(name).name(), name);
        }
        assert_eq!(CellAttr::parse("zz"), CellAttr::Unknown("zz"));
    }

    #[test]
    fn test_simple_pairs() {
        let parse = parse_cell_attributes(&tokens("v:10:f:1"));
        assert!(parse.error.is_none());
        assert_eq!(parse.attributes.len(), 2);
        assert_eq!(parse.attributes[0].attr, CellAttr::Value);
        assert_eq!(parse.attributes[1].value, AttrValue::Single("1"));
    }

    #[test]
    fn test_missing_value_keeps_earlier_attributes() {
        let parse = parse_cell_attributes(&tokens("v:10:f"));
        assert_eq!(parse.attributes.len(), 1);
        assert_eq!(parse.error, Some(AttributeError::MissingValue("f")));
    }

    #[test]
    fn test_vtf_rejoins_formula() {
        let parse = parse_cell_attributes(&tokens("vtf:n:6:SUM(A1:A3)"));
        assert!(parse.error.is_none());
        assert_eq!(
            parse.attributes[0].value,
            AttrValue::ValueTypeFormula {
                value_type: "n",
                value: "6",
                formula: "SUM(A1:A3)".to_string(),
            }
        );
        assert_eq!(parse.attributes[0].value.to_stored(), "n:6:SUM(A1:A3)");
    }

    #[test]
    fn test_vtf_consumes_rest_of_line() {
        let parse = parse_cell_attributes(&tokens("vtf:n:1:A2:f:1"));
        assert_eq!(parse.attributes.len(), 1);
        match &parse.attributes[0].value {
            AttrValue::ValueTypeFormula { formula, .. } => assert_eq!(formula, "A2:f:1"),
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn test_vtf_arity_errors() {
        let parse = parse_cell_attributes(&tokens("v:1:vtf:n:5"));
        assert_eq!(parse.attributes.len(), 1);
        assert_eq!(parse.error, Some(AttributeError::VtfArity));

        let parse = parse_cell_attributes(&tokens("vtf:n:5:"));
        assert!(parse.attributes.is_empty());
        assert_eq!(parse.error, Some(AttributeError::VtfEmptyFormula));
    }

    #[test]
    fn test_borders() {
        let parse = parse_cell_attributes(&tokens("b:1:2:3:0:f:1"));
        assert!(parse.error.is_none());
        assert_eq!(parse.attributes.len(), 2);
        match parse.attributes[0].value {
            AttrValue::Borders(b) => {
                assert_eq!(b.sides()[3], ("left", "0"));
                assert_eq!(b.top, "1");
            }
            ref other => panic!("unexpected value {other:?}"),
        }
        assert_eq!(parse.attributes[0].value.to_stored(), "1:2:3:0");
    }

    #[test]
    fn test_border_arity_error() {
        let parse = parse_cell_attributes(&tokens("b:1:2:3"));
        assert!(parse.attributes.is_empty());
        assert_eq!(parse.error, Some(AttributeError::BorderArity));
    }

    #[test]
    fn test_no_attributes() {
        let parse = parse_cell_attributes(&[]);
        assert!(parse.attributes.is_empty());
        assert!(parse.error.is_none());
    }
}
