use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use valentine_message::{
    CombinedMessage, IntroMessage, IssueKind, OutroMessage, Schema, ValidationErrors,
};

use super::defaults::MessagePart;
use super::input::read_draft;
use crate::output::Output;

#[derive(Serialize)]
struct IssueResult {
    path: String,
    kind: &'static str,
    message: String,
}

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issues: Vec<IssueResult>,
    /// The draft after defaults and clamping were applied
    #[serde(skip_serializing_if = "Option::is_none")]
    normalized: Option<Value>,
}

/// Check a draft and report every issue with its path
pub fn check(draft: &Path, part: MessagePart, output: &Output) -> Result<()> {
    let raw = read_draft(draft)?;
    let normalized = match part {
        MessagePart::Intro => normalize::<IntroMessage>(&raw),
        MessagePart::Outro => normalize::<OutroMessage>(&raw),
        MessagePart::Combined => normalize::<CombinedMessage>(&raw),
    };

    match normalized {
        Ok(value) => {
            output.success(
                "validate",
                ValidateResult {
                    valid: true,
                    issues: Vec::new(),
                    normalized: Some(value),
                },
            );
            Ok(())
        }
        Err(issues) => {
            let count = issues.len();
            output.success(
                "validate",
                ValidateResult {
                    valid: false,
                    issues: issue_results(issues),
                    normalized: None,
                },
            );
            anyhow::bail!("Draft has {} issue(s)", count)
        }
    }
}

fn normalize<T: Schema>(raw: &Value) -> std::result::Result<Value, ValidationErrors> {
    let message = T::validate(raw)?;
    message.to_value().map_err(|e| {
        let mut issues = ValidationErrors::new();
        issues.shape("", e.to_string());
        issues
    })
}

fn issue_results(issues: ValidationErrors) -> Vec<IssueResult> {
    issues
        .into_iter()
        .map(|issue| IssueResult {
            path: issue.path,
            kind: match issue.kind {
                IssueKind::Shape => "shape",
                IssueKind::Range => "range",
            },
            message: issue.message,
        })
        .collect()
}
