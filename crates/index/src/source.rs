//! Decoding of search index documents into [`DocEntry`] records.
//!
//! Accepted shapes:
//! - `{"docs": [ ... ]}`
//! - a bare `[ ... ]` array of records
//! - either of the above behind a JavaScript assignment, as shipped in
//!   `search_index.js` (`var documenterSearchIndex = {"docs": [...]}`)

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::FormatError;
use crate::types::{Category, DocEntry};

static JS_ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:var|let|const)\s+[A-Za-z_$][A-Za-z0-9_$]*\s*=\s*")
        .expect("static regex is valid")
});

/// Strip a leading `var name =` and trailing `;` if present
pub(crate) fn strip_js_assignment(source: &str) -> &str {
    let body = match JS_ASSIGNMENT.find(source) {
        Some(prefix) => &source[prefix.end()..],
        None => source,
    };
    let body = body.trim_end();
    body.strip_suffix(';').unwrap_or(body).trim_end()
}

/// Parse a whole index document
pub fn parse_document(source: &str) -> Result<Vec<DocEntry>, FormatError> {
    let body = strip_js_assignment(source);
    let value: Value = serde_json::from_str(body)
        .map_err(|err| FormatError::document(format!("invalid JSON: {err}")))?;
    parse_value(value)
}

/// Parse an already-decoded JSON value
pub fn parse_value(value: Value) -> Result<Vec<DocEntry>, FormatError> {
    let records = match value {
        Value::Array(records) => records,
        Value::Object(mut root) => match root.remove("docs") {
            Some(Value::Array(records)) => records,
            Some(other) => {
                return Err(FormatError::document(format!(
                    "`docs` must be an array, found {}",
                    kind_of(&other)
                )))
            }
            None => return Err(FormatError::document("missing `docs` array")),
        },
        other => {
            return Err(FormatError::document(format!(
                "expected an object with a `docs` array, found {}",
                kind_of(&other)
            )))
        }
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| parse_record(index, record))
        .collect()
}

fn parse_record(index: usize, record: Value) -> Result<DocEntry, FormatError> {
    let Value::Object(record) = record else {
        return Err(FormatError::record(
            index,
            format!("expected an object, found {}", kind_of(&record)),
        ));
    };

    let location = required_string(index, &record, "location")?;
    let page = required_string(index, &record, "page")?;
    if page.is_empty() {
        return Err(FormatError::record(index, "field `page` is empty"));
    }
    let title = optional_string(index, &record, "title")?;
    let text = optional_string(index, &record, "text")?;
    let category = required_string(index, &record, "category")?
        .parse::<Category>()
        .map_err(|err| FormatError::record(index, err.to_string()))?;

    Ok(DocEntry {
        location,
        page,
        title,
        text,
        category,
    })
}

fn required_string(
    index: usize,
    record: &Map<String, Value>,
    field: &str,
) -> Result<String, FormatError> {
    match record.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(other) => Err(wrong_type(index, field, other)),
        None => Err(FormatError::record(
            index,
            format!("missing field `{field}`"),
        )),
    }
}

fn optional_string(
    index: usize,
    record: &Map<String, Value>,
    field: &str,
) -> Result<String, FormatError> {
    match record.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        None | Some(Value::Null) => Ok(String::new()),
        Some(other) => Err(wrong_type(index, field, other)),
    }
}

fn wrong_type(index: usize, field: &str, value: &Value) -> FormatError {
    FormatError::record(
        index,
        format!("field `{field}` must be a string, found {}", kind_of(value)),
    )
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
