//! JSON column normalisation
//!
//! Analysis sub-documents arrive either as native JSON objects or as strings
//! holding JSON (sometimes a Python-style literal written by an older
//! pipeline: single quotes, `True`/`False`/`None`, trailing commas). Every
//! shape is reduced to a plain object map; anything that is not an object,
//! or cannot be decoded, becomes an empty map.

use serde_json::{Map, Value};

/// Normalise a raw column value into an object map (never fails)
pub fn normalize(raw: Option<&Value>) -> Map<String, Value> {
    match raw {
        Some(value) => normalize_value(value),
        None => Map::new(),
    }
}

/// Normalise a present column value into an object map (never fails)
pub fn normalize_value(raw: &Value) -> Map<String, Value> {
    match raw {
        Value::Object(map) => map.clone(),
        Value::String(text) => decode_object_text(text, 1),
        _ => Map::new(),
    }
}

/// Normalise a nested field of an already-normalised document
pub fn normalize_field(doc: &Map<String, Value>, key: &str) -> Map<String, Value> {
    normalize(doc.get(key))
}

fn decode_object_text(text: &str, unwrap_depth: usize) -> Map<String, Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Map::new();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => return map,
        // Double-encoded: a JSON string whose content is the object text
        Ok(Value::String(inner)) if unwrap_depth > 0 => {
            return decode_object_text(&inner, unwrap_depth - 1)
        }
        Ok(_) => return Map::new(),
        Err(_) => {}
    }

    literal_to_json(trimmed)
        .and_then(|json| serde_json::from_str::<Value>(&json).ok())
        .and_then(|value| match value {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .unwrap_or_default()
}

/// Rewrite a Python-style literal structure as JSON text
///
/// Returns `None` on any bare identifier other than `True`/`False`/`None`
/// or an unterminated string.
pub(crate) fn literal_to_json(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                out.push('"');
                let quote = c;
                let mut closed = false;
                while let Some(ch) = chars.next() {
                    match ch {
                        '\\' => match chars.next() {
                            Some('\'') => out.push('\''),
                            Some(esc) => {
                                out.push('\\');
                                out.push(esc);
                            }
                            None => return None,
                        },
                        ch if ch == quote => {
                            closed = true;
                            break;
                        }
                        '"' => out.push_str("\\\""),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        '\t' => out.push_str("\\t"),
                        ch if ch.is_control() => {}
                        ch => out.push(ch),
                    }
                }
                if !closed {
                    return None;
                }
                out.push('"');
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        ident.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match ident.as_str() {
                    "True" | "true" => out.push_str("true"),
                    "False" | "false" => out.push_str("false"),
                    "None" | "null" => out.push_str("null"),
                    // Exponent marker inside a number literal
                    exp if is_exponent(exp) && out.ends_with(|ch: char| ch.is_ascii_digit()) => {
                        out.push_str(exp)
                    }
                    _ => return None,
                }
            }
            '(' => out.push('['),
            ')' | ']' | '}' => {
                strip_trailing_comma(&mut out);
                out.push(if c == ')' { ']' } else { c });
            }
            c => out.push(c),
        }
    }

    Some(out)
}

fn is_exponent(ident: &str) -> bool {
    let mut chars = ident.chars();
    matches!(chars.next(), Some('e' | 'E')) && chars.all(|c| c.is_ascii_digit())
}

fn strip_trailing_comma(out: &mut String) {
    let trimmed_len = out.trim_end().len();
    if out[..trimmed_len].ends_with(',') {
        out.truncate(trimmed_len - 1);
    }
}
