use anyhow::Result;
use serde::Serialize;

use crate::config::Config;
use crate::output::Output;

#[derive(Serialize)]
struct ConfigResult<'a> {
    base_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_path: Option<&'a str>,
    path: String,
}

/// Show the current configuration
pub fn show(config: &Config, output: &Output) -> Result<()> {
    let result = ConfigResult {
        base_url: &config.base_url,
        base_path: config.base_path.as_deref(),
        path: config.path.display().to_string(),
    };
    output.success("config", result);
    Ok(())
}

/// Set the origin links are built against
pub fn set_base_url(
    base_url: &str,
    base_path: Option<&str>,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let mut config = config.clone();
    config.set_base_url(base_url, base_path)?;

    output.success_message(
        "config",
        &format!(
            "Links will be built against {}{}",
            config.base_url,
            config.base_path.as_deref().unwrap_or("")
        ),
    );
    Ok(())
}
