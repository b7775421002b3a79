use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use valentine_message::{create_default_combined_message, CombinedMessage, Schema};

/// Read a JSON draft from a file, or from stdin when the path is `-`
pub fn read_draft(path: &Path) -> Result<Value> {
    let content = if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read draft from stdin")?;
        content
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read draft {}", path.display()))?
    };
    serde_json::from_str(&content).context("Draft is not valid JSON")
}

/// Validated message from a draft, or the default message without one
pub fn load_message(path: Option<&Path>) -> Result<CombinedMessage> {
    match path {
        Some(path) => {
            let raw = read_draft(path)?;
            CombinedMessage::validate(&raw).context("Draft is not a valid message")
        }
        None => Ok(create_default_combined_message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_message_without_draft_is_default() {
        let message = load_message(None).unwrap();
        assert_eq!(message, CombinedMessage::default());
    }

    #[test]
    fn test_load_message_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("draft.json");
        let mut raw = create_default_combined_message().to_value().unwrap();
        raw["intro"]["delayMs"] = serde_json::json!("2000");
        std::fs::write(&path, raw.to_string()).unwrap();

        let message = load_message(Some(&path)).unwrap();
        assert_eq!(message.intro.delay_ms, 2000);
    }

    #[test]
    fn test_load_message_reports_issues() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("draft.json");
        std::fs::write(&path, r#"{"intro":{"collection":[]}}"#).unwrap();

        let err = load_message(Some(&path)).unwrap_err();
        let rendered = format!("{:#}", err);
        assert!(rendered.contains("intro.collection"), "{}", rendered);
        assert!(rendered.contains("outro"), "{}", rendered);
    }

    #[test]
    fn test_missing_draft_file() {
        let temp = TempDir::new().unwrap();
        assert!(load_message(Some(&temp.path().join("nope.json"))).is_err());
    }
}
