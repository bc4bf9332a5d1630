use std::borrow::Cow;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::Error;

/// Placeholder rendered for fields a record does not carry.
pub const UNKNOWN: &str = "Unknown";

/// One decoded JSON object from an API response list.
pub type Record = Map<String, Value>;

/// Currency entry of a country, e.g. `"USD": { "name": "United States dollar", "symbol": "$" }`.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Currency {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl Currency {
    pub(crate) fn from_value(value: &Value) -> Currency {
        Currency::deserialize(value).unwrap_or_default()
    }

    pub fn name_or_unknown(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn symbol_or_unknown(&self) -> &str {
        self.symbol.as_deref().unwrap_or(UNKNOWN)
    }
}

/// Text of `key` in `record`. Missing keys and `null` give [`UNKNOWN`], non-string
/// values are rendered as compact JSON.
pub fn text_field<'a>(record: &'a Record, key: &str) -> Cow<'a, str> {
    value_text(record.get(key))
}

/// Like [`text_field`] but walks nested objects, e.g. `&["name", "common"]`.
pub fn nested_text_field<'a>(record: &'a Record, path: &[&str]) -> Cow<'a, str> {
    let mut keys = path.iter();
    let mut current = match keys.next() {
        Some(first) => record.get(*first),
        None => None,
    };
    for key in keys {
        current = current.and_then(|value| value.get(*key));
    }
    value_text(current)
}

fn value_text(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(UNKNOWN),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

/// Splits a decoded response body into records. The body has to be an array,
/// elements that are not objects are skipped.
pub fn records_from_value(body: Value) -> Result<Vec<Record>, Error> {
    match body {
        Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                Value::Object(record) => Some(record),
                other => {
                    warn!(index, kind = kind_of(&other), "skipping non-object element");
                    None
                }
            })
            .collect()),
        other => Err(Error::UnexpectedBody(format!(
            "Expected a JSON array of objects but got {kind}",
            kind = kind_of(&other)
        ))),
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
