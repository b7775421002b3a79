use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ValidationErrors;
use crate::primitives::{NonEmptyText, UrlString};
use crate::schema::{self, join, Schema};
use crate::types::{
    ClickAction, FanfareKind, TextBehavior, DEFAULT_DIALOG_TEXT, DEFAULT_DIALOG_TITLE,
    DEFAULT_INTRO_TEXT, DEFAULT_NO_BUTTON_TEXTS, MAX_COLLECTION_LENGTH, MAX_NO_BUTTON_TEXT_LENGTH,
    MIN_COLLECTION_LENGTH, MIN_NO_BUTTON_TEXT_LENGTH,
};
use crate::utils::dedupe;

/// A passage of text with an optional image or gif shown alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextAndImageSegment {
    pub text: NonEmptyText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<UrlString>,
}

impl TextAndImageSegment {
    pub fn new(text: NonEmptyText) -> Self {
        Self { text, image: None }
    }

    pub fn with_image(mut self, image: UrlString) -> Self {
        self.image = Some(image);
        self
    }
}

impl Schema for TextAndImageSegment {
    fn parse(value: &Value, path: &str, issues: &mut ValidationErrors) -> Option<Self> {
        let obj = schema::object(value, path, issues)?;
        let text = schema::required_text(obj, path, "text", issues);
        let image = schema::optional_url(obj, path, &["image", "img"], issues);
        Some(Self {
            text: text?,
            image: image?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedIntroOutroFields {
    /// Audio played while this part of the message is onscreen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<UrlString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image_url: Option<UrlString>,
    /// Spawn hearts wherever the recipient clicks.
    pub show_click_hearts: bool,
}

impl Default for SharedIntroOutroFields {
    fn default() -> Self {
        Self {
            audio_url: None,
            background_image_url: None,
            show_click_hearts: true,
        }
    }
}

fn parse_shared(
    obj: &Map<String, Value>,
    path: &str,
    issues: &mut ValidationErrors,
) -> Option<SharedIntroOutroFields> {
    let audio_url = schema::optional_url(obj, path, &["audioUrl", "audio"], issues);
    let background_image_url =
        schema::optional_url(obj, path, &["backgroundImageUrl", "bgImage"], issues);
    let show_click_hearts = schema::bool_or(obj, path, "showClickHearts", true, issues);
    Some(SharedIntroOutroFields {
        audio_url: audio_url?,
        background_image_url: background_image_url?,
        show_click_hearts: show_click_hearts?,
    })
}

/// The slideshow played before the question is asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntroMessage {
    pub collection: Vec<TextAndImageSegment>,
    /// Auto-advance delay between segments. 0 waits for a click instead.
    pub delay_ms: u32,
    #[serde(flatten)]
    pub shared: SharedIntroOutroFields,
}

impl Schema for IntroMessage {
    fn parse(value: &Value, path: &str, issues: &mut ValidationErrors) -> Option<Self> {
        let obj = schema::object(value, path, issues)?;
        let shared = parse_shared(obj, path, issues);
        let collection = schema::required(obj, path, &["collection"], issues).and_then(|v| {
            schema::bounded_list(
                v,
                &join(path, "collection"),
                (MIN_COLLECTION_LENGTH, "At least a blurb of text is required."),
                (MAX_COLLECTION_LENGTH, "Way too many texts in the collection."),
                issues,
            )
        });
        let delay_ms = schema::delay_ms(obj, path, "delayMs", issues);
        Some(Self {
            collection: collection?,
            delay_ms: delay_ms?,
            shared: shared?,
        })
    }
}

pub fn create_default_intro() -> IntroMessage {
    IntroMessage {
        collection: vec![TextAndImageSegment::new(NonEmptyText::from_static(
            DEFAULT_INTRO_TEXT,
        ))],
        delay_ms: 0,
        shared: SharedIntroOutroFields::default(),
    }
}

impl Default for IntroMessage {
    fn default() -> Self {
        create_default_intro()
    }
}

/// Effects played when the dialog opens. Each kind appears at most once.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct DialogFanfare(Vec<FanfareKind>);

impl DialogFanfare {
    pub fn new(kinds: impl IntoIterator<Item = FanfareKind>) -> Self {
        Self(dedupe(kinds.into_iter().collect()))
    }

    pub fn contains(&self, kind: FanfareKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn as_slice(&self) -> &[FanfareKind] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The final dialog shown once "Yes" is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dialog {
    pub title: NonEmptyText,
    pub text: NonEmptyText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<UrlString>,
    pub fanfare: DialogFanfare,
}

impl Dialog {
    pub fn new(text: NonEmptyText) -> Self {
        Self {
            title: NonEmptyText::from_static(DEFAULT_DIALOG_TITLE),
            text,
            image: None,
            fanfare: DialogFanfare::default(),
        }
    }
}

impl Schema for Dialog {
    fn parse(value: &Value, path: &str, issues: &mut ValidationErrors) -> Option<Self> {
        let obj = schema::object(value, path, issues)?;
        let title = schema::text_or(
            obj,
            path,
            "title",
            NonEmptyText::from_static(DEFAULT_DIALOG_TITLE),
            issues,
        );
        let text = schema::required_text(obj, path, "text", issues);
        let image = schema::optional_url(obj, path, &["image", "img"], issues);
        let fanfare = match obj.get("fanfare") {
            None => Some(Vec::new()),
            Some(v) => schema::tag_set(v, &join(path, "fanfare"), 0, issues),
        };
        Some(Self {
            title: title?,
            text: text?,
            image: image?,
            fanfare: DialogFanfare(fanfare?),
        })
    }
}

/// Reactions to a "No" click. Never empty, each action at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NoButtonClickActions(Vec<ClickAction>);

impl NoButtonClickActions {
    pub fn new(
        actions: impl IntoIterator<Item = ClickAction>,
    ) -> std::result::Result<Self, ValidationErrors> {
        let actions = dedupe(actions.into_iter().collect());
        if actions.is_empty() {
            let mut issues = ValidationErrors::new();
            issues.range("click", "At least one option is required.");
            return Err(issues);
        }
        Ok(Self(actions))
    }

    pub fn single(action: ClickAction) -> Self {
        Self(vec![action])
    }

    pub fn contains(&self, action: ClickAction) -> bool {
        self.0.contains(&action)
    }

    pub fn as_slice(&self) -> &[ClickAction] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoButtonAction {
    #[serde(rename = "text")]
    pub text_behavior: TextBehavior,
    pub click: NoButtonClickActions,
}

impl Schema for NoButtonAction {
    fn parse(value: &Value, path: &str, issues: &mut ValidationErrors) -> Option<Self> {
        let obj = schema::object(value, path, issues)?;
        let text_behavior = schema::required(obj, path, &["text", "textBehavior"], issues)
            .and_then(|v| schema::tag(v, &join(path, "text"), issues));
        let click = schema::required(obj, path, &["click"], issues)
            .and_then(|v| schema::tag_set(v, &join(path, "click"), 1, issues));
        Some(Self {
            text_behavior: text_behavior?,
            click: NoButtonClickActions(click?),
        })
    }
}

/// The yes/no question and everything the buttons do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutroMessage {
    pub dialog: Dialog,
    pub no_btn_action: NoButtonAction,
    /// Captions (and images) the no button cycles through.
    pub no_btn_text: Vec<TextAndImageSegment>,
    #[serde(flatten)]
    pub shared: SharedIntroOutroFields,
}

impl Schema for OutroMessage {
    fn parse(value: &Value, path: &str, issues: &mut ValidationErrors) -> Option<Self> {
        let obj = schema::object(value, path, issues)?;
        let shared = parse_shared(obj, path, issues);
        let dialog = schema::required(obj, path, &["dialog"], issues)
            .and_then(|v| Dialog::parse(v, &join(path, "dialog"), issues));
        let no_btn_action = schema::required(obj, path, &["noBtnAction"], issues)
            .and_then(|v| NoButtonAction::parse(v, &join(path, "noBtnAction"), issues));
        let no_btn_text = schema::required(obj, path, &["noBtnText"], issues).and_then(|v| {
            schema::bounded_list(
                v,
                &join(path, "noBtnText"),
                (MIN_NO_BUTTON_TEXT_LENGTH, "At least add some text like 'No'."),
                (MAX_NO_BUTTON_TEXT_LENGTH, "Too many button captions."),
                issues,
            )
        });
        Some(Self {
            dialog: dialog?,
            no_btn_action: no_btn_action?,
            no_btn_text: no_btn_text?,
            shared: shared?,
        })
    }
}

pub fn create_default_outro() -> OutroMessage {
    let mut dialog = Dialog::new(NonEmptyText::from_static(DEFAULT_DIALOG_TEXT));
    dialog.fanfare = DialogFanfare::new([FanfareKind::Hearts]);

    OutroMessage {
        dialog,
        no_btn_action: NoButtonAction {
            text_behavior: TextBehavior::ScrollThenRandom,
            click: NoButtonClickActions::single(ClickAction::GrowYesBtn),
        },
        no_btn_text: DEFAULT_NO_BUTTON_TEXTS
            .into_iter()
            .map(|text| TextAndImageSegment::new(NonEmptyText::from_static(text)))
            .collect(),
        shared: SharedIntroOutroFields::default(),
    }
}

impl Default for OutroMessage {
    fn default() -> Self {
        create_default_outro()
    }
}

/// Everything needed to play one valentine message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedMessage {
    pub intro: IntroMessage,
    pub outro: OutroMessage,
}

impl CombinedMessage {
    pub fn new(intro: IntroMessage, outro: OutroMessage) -> Self {
        Self { intro, outro }
    }

    /// A new message with `intro` replaced and the outro carried over.
    pub fn with_intro(&self, intro: IntroMessage) -> Self {
        Self {
            intro,
            outro: self.outro.clone(),
        }
    }

    /// A new message with `outro` replaced and the intro carried over.
    pub fn with_outro(&self, outro: OutroMessage) -> Self {
        Self {
            intro: self.intro.clone(),
            outro,
        }
    }
}

impl Schema for CombinedMessage {
    fn parse(value: &Value, path: &str, issues: &mut ValidationErrors) -> Option<Self> {
        let obj = schema::object(value, path, issues)?;
        let intro = schema::required(obj, path, &["intro"], issues)
            .and_then(|v| IntroMessage::parse(v, &join(path, "intro"), issues));
        let outro = schema::required(obj, path, &["outro"], issues)
            .and_then(|v| OutroMessage::parse(v, &join(path, "outro"), issues));
        Some(Self {
            intro: intro?,
            outro: outro?,
        })
    }
}

pub fn create_default_combined_message() -> CombinedMessage {
    CombinedMessage {
        intro: create_default_intro(),
        outro: create_default_outro(),
    }
}

impl Default for CombinedMessage {
    fn default() -> Self {
        create_default_combined_message()
    }
}
