use url::Url;

use crate::message::CombinedMessage;
use crate::payload::encode_payload;
use crate::schema::Schema;
use crate::types::{DATA_PARAM, VIEW_PATH};
use crate::{Error, Result};

/// Builds `{base_url}{base_path}/view?data=...` links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinkBuilder {
    base_url: String,
    base_path: String,
}

impl ShareLinkBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            base_path: String::new(),
        }
    }

    /// Sub-path the app is deployed under, e.g. `/valentine`.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn build(&self, message: &CombinedMessage) -> Result<Url> {
        let message = message
            .revalidate()
            .map_err(|e| Error::Construction(format!("message does not validate: {}", e)))?;
        let data = encode_payload(&message).map_err(|e| Error::Construction(e.to_string()))?;

        if self.base_url.contains(['?', '#']) {
            return Err(Error::Construction(format!(
                "base URL must not carry a query or fragment: {}",
                self.base_url
            )));
        }

        let link = format!(
            "{}{}{}?{}={}",
            self.base_url.trim_end_matches('/'),
            normalize_base_path(&self.base_path),
            VIEW_PATH,
            DATA_PARAM,
            readable_param_value(&data)
        );

        let url = Url::parse(&link)
            .map_err(|e| Error::Construction(format!("invalid link {}: {}", link, e)))?;
        if !url.has_host() {
            return Err(Error::Construction(format!("link has no host: {}", link)));
        }
        Ok(url)
    }
}

pub fn build_shareable_link(message: &CombinedMessage, base_url: &str) -> Result<Url> {
    ShareLinkBuilder::new(base_url).build(message)
}

/// Percent-encodes a base64 value, then restores `/` and `=`, which are legal
/// in a query value. `+` stays `%2B` so form decoding cannot turn it into a
/// space.
fn readable_param_value(data: &str) -> String {
    urlencoding::encode(data)
        .replace("%2F", "/")
        .replace("%3D", "=")
}

fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readable_param_value() {
        assert_eq!(readable_param_value("ab+/cd=="), "ab%2B/cd==");
        assert_eq!(readable_param_value("plain"), "plain");
    }

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(normalize_base_path(""), "");
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path("valentine"), "/valentine");
        assert_eq!(normalize_base_path("/valentine/"), "/valentine");
    }
}
