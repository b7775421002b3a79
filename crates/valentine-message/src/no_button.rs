//! Caption cycling for the "No" button.
//!
//! `scroll` steps through the captions and stops on the last one, which
//! disables the button. `random` redraws uniformly on every click.
//! `scrollThenRandom` scrolls until the last caption has been shown and then
//! stays random for good. Randomness comes from the caller so playback can be
//! seeded.

use rand::Rng;
use serde::Serialize;

use crate::message::{NoButtonClickActions, OutroMessage};
use crate::types::{ClickAction, TextBehavior};
use crate::utils::random_in_range_inclusive;
use crate::{Error, Result};

/// Margin kept between a relocated button and the container edge, in pixels.
pub const MOVE_MARGIN_PX: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CaptionPhase {
    NotExhausted,
    /// The last caption has been shown at least once.
    Exhausted,
}

/// What one click on "No" should do to the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoClickEffect {
    pub caption_index: usize,
    /// Opacity of the no button, when it fades out.
    pub no_button_opacity: Option<f64>,
    /// Scale of the yes button, when it grows.
    pub yes_button_scale: Option<f64>,
    pub move_no_button: bool,
}

#[derive(Debug, Clone)]
pub struct NoButtonCycler {
    behavior: TextBehavior,
    actions: NoButtonClickActions,
    caption_count: usize,
    index: usize,
    phase: CaptionPhase,
    clicks: u32,
}

impl NoButtonCycler {
    pub fn new(outro: &OutroMessage) -> Self {
        // noBtnText is never empty once validated.
        Self::start(
            outro.no_btn_action.text_behavior,
            outro.no_btn_action.click.clone(),
            outro.no_btn_text.len().max(1),
        )
    }

    pub fn from_parts(
        behavior: TextBehavior,
        actions: NoButtonClickActions,
        caption_count: usize,
    ) -> Result<Self> {
        if caption_count == 0 {
            return Err(Error::Construction(
                "the no button needs at least one caption".to_string(),
            ));
        }
        Ok(Self::start(behavior, actions, caption_count))
    }

    fn start(behavior: TextBehavior, actions: NoButtonClickActions, caption_count: usize) -> Self {
        let phase = if caption_count == 1 {
            CaptionPhase::Exhausted
        } else {
            CaptionPhase::NotExhausted
        };
        Self {
            behavior,
            actions,
            caption_count,
            index: 0,
            phase,
            clicks: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> CaptionPhase {
        self.phase
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// A `scroll` button that reached its last caption cannot be clicked.
    pub fn is_disabled(&self) -> bool {
        self.behavior == TextBehavior::Scroll && self.phase == CaptionPhase::Exhausted
    }

    pub fn click<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<NoClickEffect> {
        if self.is_disabled() {
            return Err(Error::Construction("the no button is disabled".to_string()));
        }
        self.clicks = self.clicks.saturating_add(1);

        match (self.behavior, self.phase) {
            (TextBehavior::Random, _)
            | (TextBehavior::ScrollThenRandom, CaptionPhase::Exhausted) => {
                self.index = random_in_range_inclusive(rng, 0, self.last())?;
            }
            _ => self.scroll(),
        }

        let n = self.clicks as f64;
        Ok(NoClickEffect {
            caption_index: self.index,
            no_button_opacity: self
                .actions
                .contains(ClickAction::FadeOut)
                .then(|| 1.0 - (0.1 * n).min(1.0)),
            yes_button_scale: self
                .actions
                .contains(ClickAction::GrowYesBtn)
                .then(|| 1.0 + (0.2 * n).min(5.0)),
            move_no_button: self.actions.contains(ClickAction::MoveAround),
        })
    }

    fn scroll(&mut self) {
        self.index = (self.index + 1).min(self.last());
        if self.index == self.last() {
            self.phase = CaptionPhase::Exhausted;
        }
    }

    fn last(&self) -> usize {
        self.caption_count - 1
    }
}

/// Random `(top, right)` offset for a relocated button inside a container,
/// `None` when the container is too small to keep the margin.
pub fn random_position<R: Rng + ?Sized>(
    rng: &mut R,
    width: usize,
    height: usize,
) -> Option<(usize, usize)> {
    let max_top = height.checked_sub(MOVE_MARGIN_PX)?;
    let max_right = width.checked_sub(MOVE_MARGIN_PX)?;
    let top = random_in_range_inclusive(rng, MOVE_MARGIN_PX, max_top).ok()?;
    let right = random_in_range_inclusive(rng, MOVE_MARGIN_PX, max_right).ok()?;
    Some((top, right))
}
