// Copyright (c) The gherkin-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structural rendering of captured assertion values.

use crate::{
    indenter::indent,
    reporter::{events::CapturedValue, helpers::Styles},
};
use owo_colors::{OwoColorize, Style};
use serde_json::{Map, Value};
use std::fmt;

/// Objects and arrays nested deeper than this are collapsed.
const MAX_DEPTH: usize = 2;

/// Containers whose single-line form is wider than this are broken over lines.
const BREAK_LENGTH: usize = 72;

/// Display adapter for a captured value rendered in `style`.
pub(super) struct DisplayCaptured<'a> {
    value: &'a CapturedValue,
    style: Style,
    placeholder_style: Style,
}

impl<'a> DisplayCaptured<'a> {
    pub(super) fn new(value: &'a CapturedValue, style: Style, styles: &Styles) -> Self {
        Self {
            value,
            style,
            placeholder_style: styles.italic(style),
        }
    }
}

impl fmt::Display for DisplayCaptured<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            CapturedValue::Null => write!(f, "{}", "null".style(self.placeholder_style)),
            CapturedValue::Undefined => {
                write!(f, "{}", "undefined".style(self.placeholder_style))
            }
            CapturedValue::Bytes(bytes) => {
                write!(f, "{}", String::from_utf8_lossy(bytes).style(self.style))
            }
            CapturedValue::Structured(value) => write!(f, "{}", inspect(value).style(self.style)),
        }
    }
}

/// Renders a JSON value the way a developer console would.
pub(super) fn inspect(value: &Value) -> String {
    inspect_at(value, 0)
}

fn inspect_at(value: &Value, depth: usize) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            if items.is_empty() {
                "[]".to_owned()
            } else if depth > MAX_DEPTH {
                "[Array]".to_owned()
            } else {
                let entries = items
                    .iter()
                    .map(|item| inspect_at(item, depth + 1))
                    .collect();
                join_entries(entries, '[', ']')
            }
        }
        Value::Object(map) => {
            if map.is_empty() {
                "{}".to_owned()
            } else if depth > MAX_DEPTH {
                "[Object]".to_owned()
            } else {
                join_entries(object_entries(map, depth), '{', '}')
            }
        }
    }
}

fn object_entries(map: &Map<String, Value>, depth: usize) -> Vec<String> {
    map.iter()
        .map(|(key, value)| {
            let key = if is_identifier(key) {
                key.clone()
            } else {
                quote(key)
            };
            format!("{key}: {}", inspect_at(value, depth + 1))
        })
        .collect()
}

fn join_entries(entries: Vec<String>, open: char, close: char) -> String {
    let single_line = format!("{open} {} {close}", entries.join(", "));
    if single_line.chars().count() <= BREAK_LENGTH && !single_line.contains('\n') {
        return single_line;
    }

    let body: Vec<String> = entries
        .iter()
        .map(|entry| indent(entry, 1, false))
        .collect();
    format!("{open}\n{}\n{close}", body.join(",\n"))
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Quotes a string with single quotes, or double quotes if that avoids escaping.
fn quote(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::helpers::Theme;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!("abc"), "'abc'" ; "string")]
    #[test_case(json!("it's"), "\"it's\"" ; "string with apostrophe")]
    #[test_case(json!("it's \"x\""), "'it\\'s \"x\"'" ; "string with both quotes")]
    #[test_case(json!("a\nb"), "'a\\nb'" ; "string with newline")]
    #[test_case(json!(42), "42" ; "integer")]
    #[test_case(json!(1.5), "1.5" ; "float")]
    #[test_case(json!(true), "true" ; "boolean")]
    #[test_case(json!(null), "null" ; "nested null")]
    #[test_case(json!([]), "[]" ; "empty array")]
    #[test_case(json!({}), "{}" ; "empty object")]
    #[test_case(json!([1, 2]), "[ 1, 2 ]" ; "array")]
    #[test_case(json!({"a": 1, "b c": "x"}), "{ a: 1, 'b c': 'x' }" ; "object keys")]
    #[test_case(json!({"a": {"b": {"c": {}}}}), "{ a: { b: { c: {} } } }" ; "empty containers are never collapsed")]
    #[test_case(json!({"a": {"b": {"c": 1}}}), "{ a: { b: { c: 1 } } }" ; "object at max depth")]
    #[test_case(json!({"a": {"b": {"c": {"d": 1}}}}), "{ a: { b: { c: [Object] } } }" ; "deep object")]
    #[test_case(json!([[[1]]]), "[ [ [ 1 ] ] ]" ; "array at max depth")]
    #[test_case(json!([[[[1]]]]), "[ [ [ [Array] ] ] ]" ; "deep array")]
    fn inspect_values(value: Value, expected: &str) {
        assert_eq!(inspect(&value), expected);
    }

    #[test]
    fn long_values_break_over_lines() {
        // Keys keep the order the engine reported them in.
        let value = json!({
            "username": "someone@example.com",
            "password": "correct horse battery staple",
            "roles": ["admin", "editor"],
        });
        assert_eq!(
            inspect(&value),
            "{\n  \
               username: 'someone@example.com',\n  \
               password: 'correct horse battery staple',\n  \
               roles: [ 'admin', 'editor' ]\n\
             }"
        );
    }

    #[test]
    fn placeholders() {
        let styles = Styles::new(Theme::Dark, false);
        let render =
            |value: CapturedValue| DisplayCaptured::new(&value, Style::new(), &styles).to_string();
        assert_eq!(render(CapturedValue::Null), "null");
        assert_eq!(render(CapturedValue::Undefined), "undefined");
        assert_eq!(render(CapturedValue::Bytes(b"raw bytes".to_vec())), "raw bytes");
        assert_eq!(render(CapturedValue::Structured(json!("null"))), "'null'");
    }

    #[test]
    fn colorized_placeholders_are_italic() {
        let styles = Styles::new(Theme::Dark, true);
        let style = styles.failure_actual_value;
        let value = CapturedValue::Null;
        assert_eq!(
            DisplayCaptured::new(&value, style, &styles).to_string(),
            "null".style(style.italic()).to_string()
        );
    }
}
