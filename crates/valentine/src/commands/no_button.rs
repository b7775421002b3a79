use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::Path;
use valentine_message::no_button::random_position;
use valentine_message::{
    extract_data_param_from_link, CaptionPhase, CombinedMessage, NoButtonCycler, NoClickEffect,
    OutroMessage,
};

use super::input::load_message;
use crate::output::Output;

/// Viewport used to place a moved no button
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

#[derive(Serialize)]
struct Position {
    top: usize,
    right: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClickReport {
    click: u32,
    caption: String,
    #[serde(flatten)]
    effect: NoClickEffect,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
    phase: CaptionPhase,
    disabled: bool,
}

/// Play back clicks on the no button of a draft or shared link
pub fn simulate(
    draft: Option<&Path>,
    link: Option<&str>,
    clicks: u32,
    seed: Option<u64>,
    viewport: Viewport,
    output: &Output,
) -> Result<()> {
    let message = match link {
        Some(link) => extract_data_param_from_link(link).decode_or_default::<CombinedMessage>(),
        None => load_message(draft)?,
    };
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let reports = play(&message.outro, clicks, &mut rng, viewport)?;
    output.success("no-button", reports);
    Ok(())
}

fn play(
    outro: &OutroMessage,
    clicks: u32,
    rng: &mut StdRng,
    viewport: Viewport,
) -> Result<Vec<ClickReport>> {
    let mut cycler = NoButtonCycler::new(outro);
    let mut reports = Vec::new();

    for _ in 0..clicks {
        if cycler.is_disabled() {
            tracing::debug!(clicks = cycler.clicks(), "no button disabled");
            break;
        }
        let effect = cycler.click(rng)?;
        let caption = outro
            .no_btn_text
            .get(effect.caption_index)
            .map(|segment| segment.text.to_string())
            .context("Caption index out of range")?;
        let position = if effect.move_no_button {
            random_position(rng, viewport.width, viewport.height)
                .map(|(top, right)| Position { top, right })
        } else {
            None
        };
        reports.push(ClickReport {
            click: cycler.clicks(),
            caption,
            effect,
            position,
            phase: cycler.phase(),
            disabled: cycler.is_disabled(),
        });
    }
    Ok(reports)
}
