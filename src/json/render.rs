//! Canonical text rendering.
//!
//! The format is the wire format of the router and is byte-for-byte stable:
//!
//! - one tab per nesting level, every child on its own line
//! - `"key":value` pairs with no space after the colon
//! - commas between siblings, never after the last one
//! - empty containers render as `[]` and `{}`
//!
//! Strings are wrapped in quotes without escaping their content.

use super::value::{JsonNumber, JsonValue};
use std::fmt::{self, Write};

impl JsonValue {
    /// Render this value as if it were nested `indent_level` levels deep.
    ///
    /// Only the lines following an opening bracket are indented; the first
    /// line is emitted at the current cursor position, so top-level callers
    /// pass `0`.
    #[must_use]
    pub fn render(&self, indent_level: usize) -> String {
        Rendered {
            value: self,
            level: indent_level,
        }
        .to_string()
    }
}

struct Rendered<'a> {
    value: &'a JsonValue,
    level: usize,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self.value, self.level)
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, 0)
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            JsonNumber::Int(n) => write!(f, "{n}"),
            JsonNumber::UInt(n) => write!(f, "{n}"),
            // JSON has no spelling for NaN or infinities.
            JsonNumber::Float(n) if !n.is_finite() => f.write_str("null"),
            // `{:?}` keeps the fractional part (`2.0`, not `2`).
            JsonNumber::Float(n) => write!(f, "{n:?}"),
        }
    }
}

fn write_indent<W: Write>(out: &mut W, level: usize) -> fmt::Result {
    for _ in 0..level {
        out.write_char('\t')?;
    }
    Ok(())
}

fn write_value<W: Write>(out: &mut W, value: &JsonValue, level: usize) -> fmt::Result {
    match value {
        JsonValue::Null => out.write_str("null"),
        JsonValue::Bool(b) => write!(out, "{b}"),
        JsonValue::Number(n) => write!(out, "{n}"),
        JsonValue::String(s) => write!(out, "\"{s}\""),
        JsonValue::Array(items) => {
            if items.is_empty() {
                return out.write_str("[]");
            }
            out.write_str("[\n")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_str(",\n")?;
                }
                write_indent(out, level + 1)?;
                write_value(out, item, level + 1)?;
            }
            out.write_char('\n')?;
            write_indent(out, level)?;
            out.write_char(']')
        }
        JsonValue::Object(fields) => {
            if fields.is_empty() {
                return out.write_str("{}");
            }
            out.write_str("{\n")?;
            for (i, (key, item)) in fields.iter().enumerate() {
                if i > 0 {
                    out.write_str(",\n")?;
                }
                write_indent(out, level + 1)?;
                write!(out, "\"{key}\":")?;
                write_value(out, item, level + 1)?;
            }
            out.write_char('\n')?;
            write_indent(out, level)?;
            out.write_char('}')
        }
    }
}
