use anyhow::{Context, Result};
use serde::Serialize;
use valentine_message::{extract_data_param_from_link, CombinedMessage};

use crate::output::Output;

const BROKEN_LINK_NOTICE: &str = "This link looks broken, showing the default message instead.";

#[derive(Serialize)]
struct ViewResult {
    /// True when the link could not be decoded and the default is shown
    fallback: bool,
    message: CombinedMessage,
}

/// Open a shared link and print the message it carries
pub fn open(link: &str, strict: bool, output: &Output) -> Result<()> {
    let payload = extract_data_param_from_link(link);

    let result = match payload.decode::<CombinedMessage>() {
        Ok(message) => ViewResult {
            fallback: false,
            message,
        },
        Err(e) if strict => return Err(e).context("This link looks broken"),
        Err(_) => {
            tracing::warn!("falling back to the default message");
            output.notice(BROKEN_LINK_NOTICE);
            ViewResult {
                fallback: true,
                message: CombinedMessage::default(),
            }
        }
    };

    output.success("view", result);
    Ok(())
}
