//! JSON encoding with an optional line prefix and indent.
//!
//! serde_json's `PrettyFormatter` has no notion of a line prefix, so the
//! indented layout is produced by a formatter of our own. The layout is:
//! every line after the first starts with the prefix, then one indent per
//! nesting level; empty arrays and objects stay on one line; object keys
//! are followed by `": "`.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};

use crate::config::schema::JsonConfig;

/// Encode `value` compactly, or indented when `config` asks for it.
pub fn to_vec<T>(value: &T, config: &JsonConfig) -> serde_json::Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    if config.is_compact() {
        return serde_json::to_vec(value);
    }

    let mut out = Vec::with_capacity(128);
    let formatter = PrefixedFormatter::new(config.prefix.as_bytes(), config.indent.as_bytes());
    let mut ser = Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;
    Ok(out)
}

#[derive(Debug, Clone)]
struct PrefixedFormatter<'a> {
    prefix: &'a [u8],
    indent: &'a [u8],
    depth: usize,
    has_value: bool,
}

impl<'a> PrefixedFormatter<'a> {
    fn new(prefix: &'a [u8], indent: &'a [u8]) -> Self {
        Self {
            prefix,
            indent,
            depth: 0,
            has_value: false,
        }
    }

    fn newline<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"\n")?;
        writer.write_all(self.prefix)?;
        for _ in 0..self.depth {
            writer.write_all(self.indent)?;
        }
        Ok(())
    }

    fn open<W>(&mut self, writer: &mut W, token: &[u8]) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.depth += 1;
        self.has_value = false;
        writer.write_all(token)
    }

    fn close<W>(&mut self, writer: &mut W, token: &[u8]) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.depth -= 1;
        if self.has_value {
            self.newline(writer)?;
        }
        writer.write_all(token)
    }

    fn entry<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if !first {
            writer.write_all(b",")?;
        }
        self.newline(writer)
    }
}

impl Formatter for PrefixedFormatter<'_> {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.open(writer, b"[")
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.close(writer, b"]")
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.entry(writer, first)
    }

    fn end_array_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.open(writer, b"{")
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.close(writer, b"}")
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.entry(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn end_object_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.has_value = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn config(prefix: &str, indent: &str) -> JsonConfig {
        JsonConfig {
            prefix: prefix.into(),
            indent: indent.into(),
        }
    }

    fn encode(value: &Value, cfg: &JsonConfig) -> String {
        String::from_utf8(to_vec(value, cfg).unwrap()).unwrap()
    }

    #[test]
    fn compact_when_unconfigured() {
        let value = json!({"text": "test", "list": [1, 2]});
        let out = encode(&value, &JsonConfig::default());
        assert_eq!(out, serde_json::to_string(&value).unwrap());
    }

    #[test]
    fn prefix_and_indent_layout() {
        let out = encode(&json!({"text": "test"}), &config("<prefix>", "<indent>"));
        assert_eq!(out, "{\n<prefix><indent>\"text\": \"test\"\n<prefix>}");
    }

    #[test]
    fn nested_layout_matches_indent_only() {
        let value = json!({"a": [1, {"b": null}], "c": {}, "d": []});
        let out = encode(&value, &config("", "  "));
        assert_eq!(out, serde_json::to_string_pretty(&value).unwrap());
    }

    #[test]
    fn prefix_only_still_breaks_lines() {
        let out = encode(&json!([1, 2]), &config("> ", ""));
        assert_eq!(out, "[\n> 1,\n> 2\n> ]");
    }

    #[test]
    fn indented_output_differs_only_in_whitespace() {
        let value = json!({"name": "a b", "items": [true, false, {"x": 1.5}]});
        let compact = encode(&value, &JsonConfig::default());
        let pretty = encode(&value, &config("", "\t"));

        let strip = |s: &str| s.split(['\n', '\t']).collect::<String>().replace(": ", ":");
        assert_eq!(strip(&pretty), compact);

        let decoded: Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn compact_round_trip() {
        let value = json!({"k": [1, "two", null, {"three": 3}]});
        let bytes = to_vec(&value, &JsonConfig::default()).unwrap();
        let decoded: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, value);
    }
}
