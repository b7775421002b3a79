use anyhow::{Context, Result};
use qrcode::render::unicode;
use qrcode::QrCode;
use serde::Serialize;
use std::path::Path;
use valentine_message::extract_data_param_from_url;

use super::input::load_message;
use crate::config::Config;
use crate::output::Output;

#[derive(Serialize)]
struct LinkResult {
    link: String,
    data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    qr: Option<String>,
}

/// Build a shareable link from a draft (or the default message)
pub fn create(
    draft: Option<&Path>,
    base_url: Option<&str>,
    base_path: Option<&str>,
    qr: bool,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let message = load_message(draft)?;
    let url = config
        .link_builder(base_url, base_path)
        .build(&message)
        .context("Failed to build link")?;
    tracing::debug!(length = url.as_str().len(), "built link");

    let qr = if qr {
        Some(render_qr(url.as_str())?)
    } else {
        None
    };

    if output.is_json() {
        let result = LinkResult {
            link: url.to_string(),
            data: extract_data_param_from_url(&url).data,
            qr,
        };
        output.success("link", result);
    } else {
        output.success_message("link", url.as_str());
        if let Some(qr) = qr {
            println!("{}", qr);
        }
    }
    Ok(())
}

fn render_qr(link: &str) -> Result<String> {
    let code = QrCode::new(link.as_bytes()).context("Link is too long for a QR code")?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .build())
}
