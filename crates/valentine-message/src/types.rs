use serde::{Deserialize, Serialize};

pub const MAX_TEXT_LENGTH: usize = 256;
pub const MIN_COLLECTION_LENGTH: usize = 1;
pub const MAX_COLLECTION_LENGTH: usize = 128;
pub const MIN_NO_BUTTON_TEXT_LENGTH: usize = 1;
pub const MAX_NO_BUTTON_TEXT_LENGTH: usize = 32;

pub const MIN_DELAY_MS: u32 = 0;
pub const MAX_DELAY_MS: u32 = 60_000;

pub const DEFAULT_DIALOG_TITLE: &str = "Will you be my valentine? :3";
pub const DEFAULT_INTRO_TEXT: &str = "I love you :3";
pub const DEFAULT_DIALOG_TEXT: &str = "Till the ends of the earth.";
pub const DEFAULT_NO_BUTTON_TEXTS: [&str; 2] = ["No", "No :("];

/// Name of the query parameter carrying an encoded payload.
pub const DATA_PARAM: &str = "data";
/// Path, relative to the deployment root, of the viewing page.
pub const VIEW_PATH: &str = "/view";

/// Upper bound on the inflated size of a payload.
pub const MAX_DECOMPRESSED_BYTES: usize = 1024 * 1024;
/// Upper bound on the base64 text accepted for decoding.
pub const MAX_ENCODED_PAYLOAD_LEN: usize = 512 * 1024;

/// A closed set of string tags that can appear in a set-like array field.
pub trait Tag: Copy + Eq + 'static {
    const ALL: &'static [Self];

    fn as_tag(self) -> &'static str;

    fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|known| known.as_tag() == tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FanfareKind {
    Hearts,
    Confetti,
}

impl Tag for FanfareKind {
    const ALL: &'static [Self] = &[FanfareKind::Hearts, FanfareKind::Confetti];

    fn as_tag(self) -> &'static str {
        match self {
            FanfareKind::Hearts => "hearts",
            FanfareKind::Confetti => "confetti",
        }
    }
}

/// What happens to the buttons each time "No" is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClickAction {
    /// Grow the yes button.
    GrowYesBtn,
    /// Jump the no button to a random position onscreen.
    MoveAround,
    /// Fade the no button towards transparent, keeping its text readable.
    FadeOut,
}

impl Tag for ClickAction {
    const ALL: &'static [Self] = &[
        ClickAction::GrowYesBtn,
        ClickAction::MoveAround,
        ClickAction::FadeOut,
    ];

    fn as_tag(self) -> &'static str {
        match self {
            ClickAction::GrowYesBtn => "growYesBtn",
            ClickAction::MoveAround => "moveAround",
            ClickAction::FadeOut => "fadeOut",
        }
    }
}

/// How the no button picks its next caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextBehavior {
    /// Draw a caption at random on every click, forever.
    Random,
    /// Step through captions in order and stop on the last one.
    Scroll,
    /// `Scroll` until every caption has been shown, then `Random`.
    ScrollThenRandom,
}

impl Tag for TextBehavior {
    const ALL: &'static [Self] = &[
        TextBehavior::Random,
        TextBehavior::Scroll,
        TextBehavior::ScrollThenRandom,
    ];

    fn as_tag(self) -> &'static str {
        match self {
            TextBehavior::Random => "random",
            TextBehavior::Scroll => "scroll",
            TextBehavior::ScrollThenRandom => "scrollThenRandom",
        }
    }
}
