//! Pulls the raw `data` string out of a page's query parameters.
//!
//! Never fails: a missing, repeated or non-string `data` parameter becomes an
//! empty payload, which then fails decoding and takes the default-message
//! path.

use serde_json::Value;
use url::Url;

use crate::payload::EncodedPayload;
use crate::types::DATA_PARAM;

/// Extracts `data` from already-decoded key/value pairs.
pub fn extract_data_param<I, K, V>(pairs: I) -> EncodedPayload
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut found: Option<String> = None;
    for (key, value) in pairs {
        if key.as_ref() != DATA_PARAM {
            continue;
        }
        if found.is_some() {
            return EncodedPayload::default();
        }
        found = Some(value.as_ref().to_string());
    }
    found
        .map(|data| EncodedPayload::new(repair_plus_signs(&data)))
        .unwrap_or_default()
}

/// Extracts `data` from a raw query string, with or without the leading `?`.
pub fn extract_data_param_from_query(query: &str) -> EncodedPayload {
    let query = query.strip_prefix('?').unwrap_or(query);
    extract_data_param(url::form_urlencoded::parse(query.as_bytes()))
}

pub fn extract_data_param_from_url(url: &Url) -> EncodedPayload {
    extract_data_param(url.query_pairs())
}

/// Accepts a full link, a bare query string, or the payload itself.
pub fn extract_data_param_from_link(link: &str) -> EncodedPayload {
    let link = link.trim();
    if let Ok(url) = Url::parse(link) {
        return extract_data_param_from_url(&url);
    }
    match link.split_once('?') {
        Some((_, query)) => extract_data_param_from_query(query),
        None if looks_like_query(link) => extract_data_param_from_query(link),
        None => EncodedPayload::new(link),
    }
}

/// Base64 only carries `=` as trailing padding, so a `data=` prefix, a `&`
/// separator or anything after the first run of `=` marks a query string.
fn looks_like_query(input: &str) -> bool {
    input.contains('&')
        || input
            .strip_prefix(DATA_PARAM)
            .is_some_and(|rest| rest.starts_with('='))
        || input
            .split_once('=')
            .is_some_and(|(_, rest)| !rest.trim_start_matches('=').is_empty())
}

/// Extracts `data` from a JSON object of query parameters, as handed over by
/// a router. Arrays (repeated keys) and non-strings count as malformed.
pub fn extract_data_param_from_value(params: &Value) -> EncodedPayload {
    match params.get(DATA_PARAM) {
        Some(Value::String(data)) => EncodedPayload::new(repair_plus_signs(data)),
        _ => EncodedPayload::default(),
    }
}

/// Base64 never contains spaces; a space here is a `+` that went through form
/// decoding unescaped.
fn repair_plus_signs(data: &str) -> String {
    data.replace(' ', "+")
}
