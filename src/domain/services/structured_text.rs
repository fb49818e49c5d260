//! Structured-text transcoder
//!
//! CSV to JSON, JSON to CSV, and JSON pretty-printing / minification.
//! Object key order is preserved end to end (serde_json `preserve_order`).

use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashSet;
use thiserror::Error;

const UTF8_BOM: char = '\u{feff}';
const UTF8_BOM_BYTES: &[u8] = b"\xEF\xBB\xBF";

/// Errors raised while transcoding
#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Expected a JSON object at index {index}, found {found}")]
    NotAnObject { index: usize, found: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CsvState {
    Unquoted,
    InQuotes,
}

/// Splits CSV text into rows of fields
///
/// Never fails: unbalanced quotes run to the end of the input and ragged
/// rows are returned as they are. Carriage returns outside quotes are
/// dropped, so CRLF input parses like LF input.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut state = CsvState::Unquoted;
    // Something was consumed since the last row ended
    let mut pending = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            CsvState::InQuotes => {
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        state = CsvState::Unquoted;
                    }
                } else {
                    field.push(c);
                }
            }
            CsvState::Unquoted => match c {
                '"' => state = CsvState::InQuotes,
                ',' => row.push(std::mem::take(&mut field)),
                '\n' => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                    pending = false;
                    continue;
                }
                '\r' => continue,
                _ => field.push(c),
            },
        }
        pending = true;
    }

    if pending {
        row.push(field);
        rows.push(row);
    }
    rows
}

/// Maps CSV rows onto objects keyed by the header row
///
/// Missing trailing cells become empty strings, cells beyond the header are
/// dropped, and an empty header cell is named `col<N>` (1-based).
pub fn csv_to_records(text: &str) -> Vec<Map<String, Value>> {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    let mut rows = parse_csv(text).into_iter();
    let Some(header) = rows.next() else {
        return Vec::new();
    };

    let keys: Vec<String> = header
        .into_iter()
        .enumerate()
        .map(|(i, key)| {
            if key.is_empty() {
                format!("col{}", i + 1)
            } else {
                key
            }
        })
        .collect();

    rows.map(|cells| {
        let mut cells = cells.into_iter();
        keys.iter()
            .map(|key| (key.clone(), Value::String(cells.next().unwrap_or_default())))
            .collect()
    })
    .collect()
}

/// Converts CSV bytes into a pretty-printed JSON array of string-valued objects
pub fn json_from_csv(data: &[u8]) -> Result<String, TranscodeError> {
    let text = String::from_utf8_lossy(data);
    let records = csv_to_records(&text);
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Converts a JSON array of objects (or a single object) into CSV
///
/// The header is the union of all keys in first-seen order. Strings are
/// written as-is, `null` as an empty cell, anything else as compact JSON.
pub fn csv_from_json(data: &[u8]) -> Result<String, TranscodeError> {
    let objects = match parse_json(data)? {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(object) => Ok(object),
                other => Err(TranscodeError::NotAnObject {
                    index,
                    found: kind_of(&other),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Value::Object(object) => vec![object],
        other => {
            return Err(TranscodeError::NotAnObject {
                index: 0,
                found: kind_of(&other),
            });
        }
    };

    let mut seen = HashSet::new();
    let mut keys: Vec<&str> = Vec::new();
    for object in &objects {
        for key in object.keys() {
            if seen.insert(key.as_str()) {
                keys.push(key);
            }
        }
    }

    let mut out = String::new();
    if keys.is_empty() {
        return Ok(out);
    }

    write_row(&mut out, keys.iter().map(|k| Cow::Borrowed(*k)));
    for object in &objects {
        write_row(
            &mut out,
            keys.iter()
                .map(|key| object.get(*key).map(render_cell).unwrap_or_default()),
        );
    }
    Ok(out)
}

/// Re-serializes JSON with 2-space indentation
pub fn json_pretty(data: &[u8]) -> Result<String, TranscodeError> {
    let value = parse_json(data)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Re-serializes JSON without insignificant whitespace
pub fn json_minify(data: &[u8]) -> Result<String, TranscodeError> {
    let value = parse_json(data)?;
    Ok(serde_json::to_string(&value)?)
}

/// Quotes a field if it contains a delimiter, a quote or a line break
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

// serde_json rejects a leading byte order mark
fn parse_json(data: &[u8]) -> Result<Value, TranscodeError> {
    let data = data.strip_prefix(UTF8_BOM_BYTES).unwrap_or(data);
    Ok(serde_json::from_slice(data)?)
}

fn write_row<'a>(out: &mut String, cells: impl Iterator<Item = Cow<'a, str>>) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(&cell));
    }
    out.push('\n');
}

fn render_cell(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
