//! Raw string coercion and `key=value` pair handling.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Number, Value};

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").expect("numeric pattern is valid"));

/// A raw value after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    /// Bracket-delimited input that parsed as a JSON array or object.
    Json(Value),
    Text(String),
}

impl Scalar {
    pub fn into_json(self) -> Value {
        match self {
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Number(n) => Value::Number(n),
            Scalar::Json(v) => v,
            Scalar::Text(s) => Value::String(s),
        }
    }

    /// JSON literal suitable for embedding in generated source.
    pub fn to_literal(&self) -> String {
        self.clone().into_json().to_string()
    }
}

/// Coerce a raw string into a typed scalar.
///
/// Precedence is fixed: boolean literals, then the numeric pattern, then
/// bracket-delimited JSON, then the trimmed string. Never fails.
pub fn parse_scalar(raw: &str) -> Scalar {
    let trimmed = raw.trim();

    match trimmed {
        "true" => return Scalar::Bool(true),
        "false" => return Scalar::Bool(false),
        _ => {}
    }

    if NUMERIC.is_match(trimmed)
        && let Some(number) = parse_number(trimmed)
    {
        return Scalar::Number(number);
    }

    let bracketed = (trimmed.starts_with('[') && trimmed.ends_with(']'))
        || (trimmed.starts_with('{') && trimmed.ends_with('}'));
    if bracketed && let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Scalar::Json(value);
    }

    Scalar::Text(trimmed.to_string())
}

/// Keep the digits as written so the literal re-coerces to the same number.
/// A leading `+` and redundant leading zeros are dropped.
fn parse_number(s: &str) -> Option<Number> {
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let whole = whole.trim_start_matches('0');

    let mut canonical = String::with_capacity(s.len() + 1);
    if negative {
        canonical.push('-');
    }
    canonical.push_str(if whole.is_empty() { "0" } else { whole });
    if let Some(fraction) = fraction {
        canonical.push('.');
        canonical.push_str(fraction);
    }
    canonical.parse().ok()
}

/// Ordered environment values; insertion order is the field order of the
/// generated descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentValues(IndexMap<String, String>);

impl EnvironmentValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; an overwritten key keeps its first-seen position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: EnvironmentValues) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Coerced JSON object of every value, in insertion order.
    pub fn to_json_object(&self) -> serde_json::Map<String, Value> {
        self.iter().map(|(k, v)| (k.to_string(), parse_scalar(v).into_json())).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvironmentValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = EnvironmentValues::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

/// Parse `key=value` strings. Entries without `=` and entries whose key is
/// empty after trimming are dropped.
pub fn parse_pairs<S: AsRef<str>>(pairs: &[S]) -> EnvironmentValues {
    let mut values = EnvironmentValues::new();
    for pair in pairs {
        let Some((key, value)) = pair.as_ref().split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        values.insert(key, value.trim());
    }
    values
}

/// Normalize a user-supplied subfolder. `None` means no subfolder.
///
/// Leading separators are stripped and every `..` is removed; the remainder
/// is not re-validated.
pub fn sanitize_folder(input: Option<&str>) -> Option<String> {
    let raw = input?;
    let stripped = raw.trim().trim_start_matches(['/', '\\']);
    let cleaned = stripped.replace("..", "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() { None } else { Some(cleaned.to_string()) }
}
