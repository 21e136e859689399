//! Printer: serializes a value subtree (or a match result) back to text.
//!
//! Rendering is shaped by the print flags of [`Config`], which compose freely:
//!
//! - **Standard**: `{"k":v,...}`, `[v,...]`, quoted strings, canonical numbers.
//!   `true`/`false`/`null` render as quoted tokens (`"true"`) unless
//!   [`Config::strict`] asks for bare JSON literals.
//! - **Flat** ([`Config::print_flat`]): no brackets, siblings separated by one space.
//! - **CSV** ([`Config::print_csv`]): no brackets, no object keys, siblings
//!   separated by `,`, strings CSV-quoted only when needed.
//! - **HTML** ([`Config::print_html`]): emitted key and string text is
//!   HTML-escaped.
//! - **Short** ([`Config::print_short`]): bare scalar payloads, no string quotes.
//! - **Real** ([`Config::string_to_real`]): strings that parse as numbers print
//!   as numbers.
//!
//! Every mode walks objects in insertion order and arrays in sequence order;
//! the modes differ only in leaf formatting and separator/bracket policy.

use crate::config::Config;
use crate::matcher::Matched;
use crate::value::{string_to_real, Value, ValueType};
use std::fmt;

/// Print `value` in standard mode.
pub fn print(value: Value<'_>) -> String {
    Printer::new(&Config::default()).print(value)
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print(*self))
    }
}

/// Renders values according to a [`Config`].
#[derive(Debug, Clone, Copy)]
pub struct Printer<'c> {
    config: &'c Config,
}

impl<'c> Printer<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    pub fn print(&self, value: Value<'_>) -> String {
        let mut out = String::new();
        self.write_value(value, &mut out);
        out
    }

    pub fn print_matched(&self, matched: &Matched<'_>) -> String {
        let mut out = String::new();
        self.write_matched(matched, &mut out);
        out
    }

    /// Append the rendering of `value` to `out`.
    pub fn write_value(&self, value: Value<'_>, out: &mut String) {
        match value.value_type() {
            ValueType::String => self.write_string(value.expect_str(), out),
            ValueType::Number => self.write_number(value.as_number().unwrap_or(0.0), out),
            ValueType::True => self.write_literal("true", out),
            ValueType::False => self.write_literal("false", out),
            ValueType::Null => self.write_literal("null", out),
            ValueType::Object => {
                let obj = value.expect_object();
                self.open('{', out);
                for (i, (name, member)) in obj.iter().enumerate() {
                    self.separate(i, out);
                    self.write_key(name, out);
                    self.write_value(member, out);
                }
                self.close('}', out);
            }
            ValueType::Array => {
                let arr = value.expect_array();
                self.open('[', out);
                for (i, item) in arr.iter().enumerate() {
                    self.separate(i, out);
                    self.write_value(item, out);
                }
                self.close(']', out);
            }
        }
    }

    /// Append the rendering of a match result to `out`. Synthesized arrays
    /// follow the same policy as tree arrays.
    pub fn write_matched(&self, matched: &Matched<'_>, out: &mut String) {
        match matched {
            Matched::Value(value) => self.write_value(*value, out),
            Matched::Number(n) => self.write_number(*n, out),
            Matched::String(s) => self.write_string(s, out),
            Matched::Array(items) => {
                self.open('[', out);
                for (i, item) in items.iter().enumerate() {
                    self.separate(i, out);
                    self.write_matched(item, out);
                }
                self.close(']', out);
            }
        }
    }

    fn bracketed(&self) -> bool {
        !(self.config.print_flat || self.config.print_csv)
    }

    fn open(&self, bracket: char, out: &mut String) {
        if self.bracketed() {
            out.push(bracket);
        }
    }

    fn close(&self, bracket: char, out: &mut String) {
        if self.bracketed() {
            out.push(bracket);
        }
    }

    /// Emit the sibling separator before every entry but the first.
    fn separate(&self, index: usize, out: &mut String) {
        if index == 0 {
            return;
        }
        if self.config.print_flat && !self.config.print_csv {
            out.push(' ');
        } else {
            out.push(',');
        }
    }

    fn write_key(&self, name: &str, out: &mut String) {
        if self.config.print_csv {
            return;
        }
        out.push('"');
        self.push_text(&escape_json(name), out);
        out.push_str("\":");
    }

    /// Overflowed numbers have no JSON form and print as the `null` literal.
    fn write_number(&self, n: f64, out: &mut String) {
        if n.is_finite() {
            out.push_str(&format_number(n));
        } else {
            self.write_literal("null", out);
        }
    }

    fn write_literal(&self, word: &str, out: &mut String) {
        if self.config.strict || self.config.print_short || self.config.print_csv {
            out.push_str(word);
        } else {
            out.push('"');
            out.push_str(word);
            out.push('"');
        }
    }

    fn write_string(&self, s: &str, out: &mut String) {
        if self.config.string_to_real {
            if let Some(n) = string_to_real(s) {
                out.push_str(&format_number(n));
                return;
            }
        }
        if self.config.print_short {
            self.push_text(s, out);
        } else if self.config.print_csv {
            self.push_text(&quote_csv(s), out);
        } else {
            out.push('"');
            self.push_text(&escape_json(s), out);
            out.push('"');
        }
    }

    fn push_text(&self, text: &str, out: &mut String) {
        if self.config.print_html {
            escape_html(text, out);
        } else {
            out.push_str(text);
        }
    }
}

/// Format a number canonically:
/// - integral values below 1e15 print without a fraction (`3`, not `3.0`)
/// - very large or very small magnitudes use exponent form (`1e300`)
/// - everything else uses the shortest text that reads back to the same value
/// - negative zero prints as `0`; NaN and infinities print as `null`
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return (n as i64).to_string();
    }
    let abs = n.abs();
    if !(1e-7..1e21).contains(&abs) {
        format!("{:e}", n)
    } else {
        format!("{}", n)
    }
}

fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            _ => out.push(ch),
        }
    }
    out
}

fn quote_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn escape_html(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(3.25), "3.25");
        assert_eq!(format_number(1e300), "1e300");
        assert_eq!(format_number(1.5e-8), "1.5e-8");
        assert_eq!(format_number(f64::NAN), "null");
    }

    #[test]
    fn csv_quoting_only_when_needed() {
        assert_eq!(quote_csv("plain"), "plain");
        assert_eq!(quote_csv("a,b"), "\"a,b\"");
        assert_eq!(quote_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn json_escapes_round_trip_characters() {
        assert_eq!(escape_json("a\"b\\c\nd"), "a\\\"b\\\\c\\nd");
    }
}
