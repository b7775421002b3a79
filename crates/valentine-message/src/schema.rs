//! Field-level validation helpers and the [`Schema`] trait every message type
//! implements.
//!
//! Helpers push issues into a shared [`ValidationErrors`] and return `None` on
//! failure, so a parent evaluates all of its fields before bailing out and the
//! caller sees every problem at once.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result, ValidationErrors};
use crate::primitives::{validate_non_empty_text, validate_url_string, NonEmptyText, UrlString};
use crate::types::{Tag, MAX_DELAY_MS, MIN_DELAY_MS};
use crate::utils::dedupe;

pub trait Schema: Sized + Serialize {
    /// Parses `value`, reporting problems under `path`.
    fn parse(value: &Value, path: &str, issues: &mut ValidationErrors) -> Option<Self>;

    fn validate(raw: &Value) -> std::result::Result<Self, ValidationErrors> {
        let mut issues = ValidationErrors::new();
        let parsed = Self::parse(raw, "", &mut issues);
        issues.into_result(parsed)
    }

    fn validate_json(json: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(json).map_err(|e| {
            let mut issues = ValidationErrors::new();
            issues.shape("", format!("Invalid JSON: {}", e));
            Error::Validation(issues)
        })?;
        Ok(Self::validate(&raw)?)
    }

    /// Canonical JSON form. Absent optionals are omitted.
    fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| Error::Construction(e.to_string()))
    }

    /// Runs an already-typed value back through validation.
    fn revalidate(&self) -> std::result::Result<Self, ValidationErrors> {
        match self.to_value() {
            Ok(value) => Self::validate(&value),
            Err(e) => {
                let mut issues = ValidationErrors::new();
                issues.shape("", e.to_string());
                Err(issues)
            }
        }
    }
}

pub(crate) fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

pub(crate) fn index(path: &str, i: usize) -> String {
    format!("{}[{}]", path, i)
}

pub(crate) fn object<'a>(
    value: &'a Value,
    path: &str,
    issues: &mut ValidationErrors,
) -> Option<&'a Map<String, Value>> {
    match value.as_object() {
        Some(map) => Some(map),
        None => {
            issues.shape(path, "Expected an object.");
            None
        }
    }
}

/// Looks `keys` up in order; the first key is canonical, the rest are
/// accepted aliases.
pub(crate) fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key))
}

pub(crate) fn required<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    keys: &[&str],
    issues: &mut ValidationErrors,
) -> Option<&'a Value> {
    let found = field(obj, keys);
    if found.is_none() {
        issues.shape(join(path, keys[0]), "Field is required.");
    }
    found
}

pub(crate) fn text(
    value: &Value,
    path: &str,
    issues: &mut ValidationErrors,
) -> Option<NonEmptyText> {
    let Some(s) = value.as_str() else {
        issues.shape(path, "Expected a string.");
        return None;
    };
    match validate_non_empty_text(s.to_string()) {
        Ok(text) => Some(text),
        Err(e) => {
            issues.push(path, e.kind(), e.to_string());
            None
        }
    }
}

pub(crate) fn required_text(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    issues: &mut ValidationErrors,
) -> Option<NonEmptyText> {
    let value = required(obj, path, &[key], issues)?;
    text(value, &join(path, key), issues)
}

pub(crate) fn text_or(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    default: NonEmptyText,
    issues: &mut ValidationErrors,
) -> Option<NonEmptyText> {
    match obj.get(key) {
        None => Some(default),
        Some(value) => text(value, &join(path, key), issues),
    }
}

/// Absent and `""` both mean "no URL". The outer `Option` is `None` only when
/// the field was present and invalid.
pub(crate) fn optional_url(
    obj: &Map<String, Value>,
    path: &str,
    keys: &[&str],
    issues: &mut ValidationErrors,
) -> Option<Option<UrlString>> {
    let path = join(path, keys[0]);
    match field(obj, keys) {
        None => Some(None),
        Some(Value::String(s)) if s.is_empty() => Some(None),
        Some(Value::String(s)) => match validate_url_string(s.clone()) {
            Ok(url) => Some(Some(url)),
            Err(e) => {
                issues.push(path, e.kind(), e.to_string());
                None
            }
        },
        Some(_) => {
            issues.shape(path, "Expected a URL string.");
            None
        }
    }
}

pub(crate) fn bool_or(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    default: bool,
    issues: &mut ValidationErrors,
) -> Option<bool> {
    match obj.get(key) {
        None => Some(default),
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            issues.shape(join(path, key), "Expected a boolean.");
            None
        }
    }
}

/// Turns a number or numeric string into a delay, clamping in-range.
///
/// Fractional, NaN, infinite and non-numeric input is rejected. A blank string
/// reads as 0, like a cleared form field.
pub fn coerce_delay_ms(value: &Value) -> std::result::Result<u32, &'static str> {
    let number = match value {
        Value::Number(n) => n.as_f64().ok_or("Expected a number.")?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().map_err(|_| "Expected a number.")?
            }
        }
        _ => return Err("Expected a number."),
    };
    if !number.is_finite() || number.fract() != 0.0 {
        return Err("Expected an integer.");
    }
    Ok(number.clamp(MIN_DELAY_MS as f64, MAX_DELAY_MS as f64) as u32)
}

pub(crate) fn delay_ms(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    issues: &mut ValidationErrors,
) -> Option<u32> {
    match obj.get(key) {
        None => Some(MIN_DELAY_MS),
        Some(value) => match coerce_delay_ms(value) {
            Ok(delay) => Some(delay),
            Err(message) => {
                issues.shape(join(path, key), message);
                None
            }
        },
    }
}

/// An ordered list of `T` with `min..=max` entries.
pub(crate) fn bounded_list<T: Schema>(
    value: &Value,
    path: &str,
    min: (usize, &str),
    max: (usize, &str),
    issues: &mut ValidationErrors,
) -> Option<Vec<T>> {
    let Some(items) = value.as_array() else {
        issues.shape(path, "Expected an array.");
        return None;
    };

    let mut ok = true;
    if items.len() < min.0 {
        issues.range(path, min.1);
        ok = false;
    }
    if items.len() > max.0 {
        issues.range(path, max.1);
        return None;
    }

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match T::parse(item, &index(path, i), issues) {
            Some(parsed) => out.push(parsed),
            None => ok = false,
        }
    }
    ok.then_some(out)
}

/// A set of known tags, deduplicated before the size bounds are checked.
///
/// Accepts an array of tag strings, or an object mapping tag names to
/// booleans as written by older links.
pub(crate) fn tag_set<T: Tag>(
    value: &Value,
    path: &str,
    min: usize,
    issues: &mut ValidationErrors,
) -> Option<Vec<T>> {
    let mut tags = Vec::new();
    let mut ok = true;

    match value {
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                match item.as_str().and_then(T::from_tag) {
                    Some(tag) => tags.push(tag),
                    None => {
                        issues.shape(index(path, i), unknown_tag_message::<T>());
                        ok = false;
                    }
                }
            }
        }
        Value::Object(flags) => {
            for (name, flag) in flags {
                let Some(tag) = T::from_tag(name) else {
                    continue;
                };
                match flag {
                    Value::Bool(true) => tags.push(tag),
                    Value::Bool(false) => {}
                    _ => {
                        issues.shape(join(path, name), "Expected a boolean.");
                        ok = false;
                    }
                }
            }
            // Object keys carry no order, keep the declaration order instead.
            tags.sort_by_key(|tag| T::ALL.iter().position(|known| known == tag));
        }
        _ => {
            issues.shape(path, "Expected an array of options.");
            return None;
        }
    }

    let tags = dedupe(tags);
    if tags.len() < min {
        issues.range(path, "At least one option is required.");
        ok = false;
    }
    if tags.len() > T::ALL.len() {
        issues.range(path, "Too many options.");
        ok = false;
    }
    ok.then_some(tags)
}

fn unknown_tag_message<T: Tag>() -> String {
    let known: Vec<&str> = T::ALL.iter().map(|tag| tag.as_tag()).collect();
    format!("Expected one of: {}.", known.join(", "))
}

pub(crate) fn tag<T: Tag>(value: &Value, path: &str, issues: &mut ValidationErrors) -> Option<T> {
    match value.as_str().and_then(T::from_tag) {
        Some(tag) => Some(tag),
        None => {
            issues.shape(path, unknown_tag_message::<T>());
            None
        }
    }
}
