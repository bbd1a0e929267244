//! Block-style YAML emitter.
//!
//! `serde_yaml` picks scalar styles on its own, which gives no way to force
//! quoting of selected fields. This emitter writes the same block layout and
//! honours [`Scalar::Quoted`]; plain strings are checked against `serde_yaml`
//! so that they read back unchanged.

use crate::tree::format_float;
use crate::{DocumentTree, Mapping, Scalar};

/// Plain scalars a YAML 1.1 reader would turn into booleans.
const YAML11_BOOLEANS: [&str; 6] = ["y", "n", "yes", "no", "on", "off"];

/// Line breaks besides `\n` and `\r`, and characters a reader rejects or
/// strips when they appear raw.
const SPECIAL_CHARS: [char; 6] = [
    '\u{85}', '\u{2028}', '\u{2029}', '\u{feff}', '\u{fffe}', '\u{ffff}',
];

/// Longest key a YAML reader accepts in the implicit `key: value` form.
const MAX_IMPLICIT_KEY: usize = 1024;

const INDICATORS: [char; 19] = [
    '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@',
    '`',
];

pub(crate) fn emit_document(root: &Mapping) -> String {
    let mut out = String::new();
    if root.is_empty() {
        out.push_str("{}\n");
    } else {
        write_mapping(&mut out, root, 0);
    }
    out
}

fn write_mapping(out: &mut String, mapping: &Mapping, indent: usize) {
    for (key, value) in mapping.iter() {
        pad(out, indent);
        write_entry(out, key, value, indent);
    }
}

// The cursor sits where the key starts.
fn write_entry(out: &mut String, key: &Scalar, value: &DocumentTree, indent: usize) {
    let key_text = scalar_text(key);
    if key_text.chars().count() > MAX_IMPLICIT_KEY {
        out.push_str("? ");
        out.push_str(&key_text);
        out.push('\n');
        pad(out, indent);
        out.push(':');
        write_value(out, value, indent, indent + 2);
    } else {
        out.push_str(&key_text);
        out.push(':');
        write_value(out, value, indent, indent);
    }
}

// The cursor sits right after the `:` of an entry at `indent`.
fn write_value(out: &mut String, value: &DocumentTree, indent: usize, sequence_indent: usize) {
    match value {
        DocumentTree::Mapping(mapping) if !mapping.is_empty() => {
            out.push('\n');
            write_mapping(out, mapping, indent + 2);
        }
        DocumentTree::Sequence(items) if !items.is_empty() => {
            out.push('\n');
            for item in items {
                pad(out, sequence_indent);
                out.push_str("- ");
                write_item(out, item, sequence_indent + 2);
            }
        }
        other => {
            out.push(' ');
            out.push_str(&inline_text(other));
            out.push('\n');
        }
    }
}

// The cursor sits right after a "- " indicator; `indent` is its column.
fn write_item(out: &mut String, item: &DocumentTree, indent: usize) {
    match item {
        DocumentTree::Mapping(mapping) if !mapping.is_empty() => {
            for (position, (key, value)) in mapping.iter().enumerate() {
                if position > 0 {
                    pad(out, indent);
                }
                write_entry(out, key, value, indent);
            }
        }
        DocumentTree::Sequence(items) if !items.is_empty() => {
            for (position, nested) in items.iter().enumerate() {
                if position > 0 {
                    pad(out, indent);
                }
                out.push_str("- ");
                write_item(out, nested, indent + 2);
            }
        }
        other => {
            out.push_str(&inline_text(other));
            out.push('\n');
        }
    }
}

fn pad(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat(' ').take(indent));
}

fn inline_text(tree: &DocumentTree) -> String {
    match tree {
        DocumentTree::Scalar(scalar) => scalar_text(scalar),
        DocumentTree::Mapping(_) => "{}".to_string(),
        DocumentTree::Sequence(_) => "[]".to_string(),
    }
}

pub(crate) fn scalar_text(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Null => "null".to_string(),
        Scalar::Bool(value) => value.to_string(),
        Scalar::Int(value) => value.to_string(),
        Scalar::UInt(value) => value.to_string(),
        Scalar::Float(value) => format_float(*value),
        Scalar::String(text) if is_plain_safe(text) => text.clone(),
        Scalar::String(text) => double_quoted(text),
        Scalar::Quoted(text) if needs_escaping(text) => double_quoted(text),
        Scalar::Quoted(text) => single_quoted(text),
    }
}

fn single_quoted(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

fn needs_escaping(text: &str) -> bool {
    text.chars()
        .any(|ch| ch.is_control() || SPECIAL_CHARS.contains(&ch))
}

fn double_quoted(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{85}' => quoted.push_str("\\N"),
            '\u{2028}' => quoted.push_str("\\L"),
            '\u{2029}' => quoted.push_str("\\P"),
            ch if ch.is_control() || SPECIAL_CHARS.contains(&ch) => {
                quoted.push_str(&format!("\\u{:04X}", u32::from(ch)));
            }
            ch => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

fn is_plain_safe(text: &str) -> bool {
    let Some(first) = text.chars().next() else {
        return false;
    };
    if INDICATORS.contains(&first) || text.trim() != text || text == "<<" {
        return false;
    }
    if needs_escaping(text)
        || text.contains(": ")
        || text.contains(" #")
        || text.ends_with(':')
    {
        return false;
    }
    if YAML11_BOOLEANS
        .iter()
        .any(|word| word.eq_ignore_ascii_case(text))
    {
        return false;
    }
    matches!(
        serde_yaml::from_str::<serde_yaml::Value>(text),
        Ok(serde_yaml::Value::String(ref parsed)) if parsed == text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_strings_stay_plain() {
        assert!(is_plain_safe("/pets"));
        assert!(is_plain_safe("Pet store"));
        assert!(is_plain_safe("application/json"));
    }

    #[test]
    fn ambiguous_strings_are_quoted() {
        for text in ["", "200", "1.5", "true", "null", "~", "yes", "Off", "#/x", "a: b", " x", "<<"] {
            assert!(!is_plain_safe(text), "{text:?} should not be plain");
        }
    }

    #[test]
    fn quoted_scalars_escape_single_quotes() {
        assert_eq!(scalar_text(&Scalar::Quoted("it's".into())), "'it''s'");
        assert_eq!(scalar_text(&Scalar::Quoted("a\nb".into())), "\"a\\nb\"");
    }

    #[test]
    fn unicode_line_breaks_are_escaped() {
        assert!(!is_plain_safe("a\u{2028}b"));
        assert_eq!(scalar_text(&Scalar::from("a\u{2028}b")), "\"a\\Lb\"");
        assert_eq!(scalar_text(&Scalar::from("a\u{2029}b")), "\"a\\Pb\"");
        assert_eq!(scalar_text(&Scalar::Quoted("a\u{85}b".into())), "\"a\\Nb\"");
        assert_eq!(scalar_text(&Scalar::Quoted("\u{1b}[0m".into())), "\"\\u001B[0m\"");
    }
}
