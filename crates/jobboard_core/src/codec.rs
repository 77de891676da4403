//! Bidirectional mapping between a typed state object and a query string.
//!
//! Each persisted field is described by a [`FieldDescriptor`]. Decoding is
//! total: values that fail coercion are reported as absent and left for the
//! caller to default. Encoding preserves every query parameter the schema
//! does not own.

use std::collections::BTreeMap;

use jobboard_logging::{board_debug, board_warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use url::form_urlencoded;

/// Largest integer a double represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    StringList,
}

/// How one state field maps onto a query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Serialized field name inside the state object.
    pub field: &'static str,
    /// Query parameter name.
    pub param: &'static str,
    pub kind: ValueKind,
    /// Drop the parameter when the value is falsy ("", false, 0, null, []).
    pub omit_when_falsy: bool,
}

impl FieldDescriptor {
    pub const fn new(field: &'static str, param: &'static str, kind: ValueKind) -> Self {
        Self {
            field,
            param,
            kind,
            omit_when_falsy: false,
        }
    }

    pub const fn omit_when_falsy(mut self) -> Self {
        self.omit_when_falsy = true;
        self
    }
}

/// A decoded, already-coerced query value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Number(f64),
    Boolean(bool),
    StringList(Vec<String>),
}

impl FieldValue {
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::String(value) => Value::String(value.clone()),
            FieldValue::Number(value) => number_to_json(*value),
            FieldValue::Boolean(value) => Value::Bool(*value),
            FieldValue::StringList(values) => {
                Value::Array(values.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// Fields present in a decoded query, keyed by state field name.
pub type PartialState = BTreeMap<&'static str, FieldValue>;

/// A state object that can be mirrored into the URL.
pub trait UrlState: Serialize + DeserializeOwned + Clone {
    /// One descriptor per serialized field.
    fn schema() -> &'static [FieldDescriptor];

    /// Restores invariants after values were merged in from outside.
    fn normalize(&mut self) {}
}

/// Reads every schema field from `query`. Absent or malformed values are omitted.
pub fn decode(query: &str, schema: &[FieldDescriptor]) -> PartialState {
    let pairs = parse_query(query);
    schema
        .iter()
        .filter_map(|descriptor| {
            decode_field(&pairs, descriptor).map(|value| (descriptor.field, value))
        })
        .collect()
}

/// Re-derives the query string for `state`, keeping parameters outside the schema.
pub fn encode<S: Serialize>(state: &S, schema: &[FieldDescriptor], existing_query: &str) -> String {
    let values = match serde_json::to_value(state) {
        Ok(Value::Object(values)) => values,
        Ok(other) => {
            board_warn!("state serialized to a non-object ({other}); encoding no fields");
            Map::new()
        }
        Err(err) => {
            board_warn!("state could not be serialized for the url: {err}");
            Map::new()
        }
    };
    encode_fields(&values, schema, existing_query)
}

/// Merges `defaults`, then the stored snapshot, then URL values, later layers winning.
///
/// A layer's field is only taken when the merged object still deserializes,
/// so a stale snapshot or a hand-edited link can never poison the state.
pub fn hydrate<S: UrlState>(defaults: &S, stored: Option<&Value>, from_url: &PartialState) -> S {
    let Ok(Value::Object(mut merged)) = serde_json::to_value(defaults) else {
        board_warn!("defaults are not an object; skipping hydration");
        return defaults.clone();
    };
    let mut current = defaults.clone();

    if let Some(stored) = stored {
        match stored {
            Value::Object(snapshot) => {
                for descriptor in S::schema() {
                    if let Some(value) = snapshot.get(descriptor.field) {
                        overlay(&mut merged, &mut current, descriptor.field, value.clone(), "store");
                    }
                }
            }
            other => board_warn!("ignoring stored snapshot that is not an object: {other}"),
        }
    }

    for (field, value) in from_url {
        overlay(&mut merged, &mut current, field, value.to_json(), "url");
    }

    current.normalize();
    current
}

fn overlay<S: DeserializeOwned>(
    merged: &mut Map<String, Value>,
    current: &mut S,
    field: &str,
    value: Value,
    source: &str,
) {
    let previous = merged.insert(field.to_owned(), value);
    match serde_json::from_value::<S>(Value::Object(merged.clone())) {
        Ok(next) => {
            board_debug!("hydrated `{field}` from {source}");
            *current = next;
        }
        Err(err) => {
            board_warn!("discarding {source} value for `{field}`: {err}");
            match previous {
                Some(previous) => {
                    merged.insert(field.to_owned(), previous);
                }
                None => {
                    merged.remove(field);
                }
            }
        }
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

fn decode_field(pairs: &[(String, String)], descriptor: &FieldDescriptor) -> Option<FieldValue> {
    let mut values = pairs
        .iter()
        .filter(|(name, _)| name == descriptor.param)
        .map(|(_, value)| value.as_str());

    match descriptor.kind {
        ValueKind::String => values.next().map(|raw| FieldValue::String(raw.to_owned())),
        ValueKind::Number => values.next().and_then(parse_number).map(FieldValue::Number),
        ValueKind::Boolean => match values.next()? {
            "true" => Some(FieldValue::Boolean(true)),
            "false" => Some(FieldValue::Boolean(false)),
            _ => None,
        },
        ValueKind::StringList => {
            let all: Vec<String> = values
                .filter(|value| !value.is_empty())
                .map(ToOwned::to_owned)
                .collect();
            (!all.is_empty()).then_some(FieldValue::StringList(all))
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn encode_fields(
    values: &Map<String, Value>,
    schema: &[FieldDescriptor],
    existing_query: &str,
) -> String {
    let mut pairs = parse_query(existing_query);
    pairs.retain(|(name, _)| !schema.iter().any(|descriptor| descriptor.param == name));

    for descriptor in schema {
        let value = values.get(descriptor.field).unwrap_or(&Value::Null);
        if descriptor.omit_when_falsy && is_falsy(value) {
            continue;
        }
        match (descriptor.kind, value) {
            (ValueKind::StringList, Value::Array(items)) => {
                for item in items {
                    if let Some(text) = stringify(item).filter(|text| !text.is_empty()) {
                        pairs.push((descriptor.param.to_owned(), text));
                    }
                }
            }
            (ValueKind::StringList, _) => {}
            (_, value) => {
                if let Some(text) = stringify(value).filter(|text| !text.is_empty()) {
                    pairs.push((descriptor.param.to_owned(), text));
                }
            }
        }
    }

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::String(text) => text.is_empty(),
        Value::Number(number) => number.as_f64().is_none_or(|n| n == 0.0 || n.is_nan()),
        Value::Array(items) => items.is_empty(),
        Value::Object(_) => false,
    }
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Object(_) => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(format_number(number)),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(stringify)
                .collect::<Vec<_>>()
                .join(","),
        ),
    }
}

fn format_number(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    match number.as_f64() {
        Some(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => format!("{}", n as i64),
        Some(n) => n.to_string(),
        None => number.to_string(),
    }
}

fn number_to_json(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        Value::from(value as i64)
    } else {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_print_without_fraction() {
        assert_eq!(number_to_json(3.0), Value::from(3));
        assert_eq!(stringify(&number_to_json(2.5)), Some("2.5".to_string()));
        assert_eq!(stringify(&Value::from(40)), Some("40".to_string()));
    }

    #[test]
    fn number_parse_rejects_non_finite_and_blank() {
        assert_eq!(parse_number(" 12 "), Some(12.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("12px"), None);
    }

    #[test]
    fn falsy_matches_loose_truthiness() {
        assert!(is_falsy(&Value::Null));
        assert!(is_falsy(&Value::from("")));
        assert!(is_falsy(&Value::from(false)));
        assert!(is_falsy(&Value::from(0)));
        assert!(is_falsy(&Value::Array(Vec::new())));
        assert!(!is_falsy(&Value::from("recent")));
        assert!(!is_falsy(&Value::from(true)));
        assert!(!is_falsy(&Value::from(1)));
    }
}
