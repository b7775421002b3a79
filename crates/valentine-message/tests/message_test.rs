use serde_json::json;
use valentine_message::{
    create_default_combined_message, create_default_intro, create_default_outro, ClickAction,
    CombinedMessage, FanfareKind, IntroMessage, IssueKind, NonEmptyText, OutroMessage, Result,
    Schema, TextAndImageSegment, TextBehavior, UrlString, DEFAULT_DIALOG_TITLE,
};

fn minimal_outro() -> serde_json::Value {
    json!({
        "dialog": { "text": "Forever and ever." },
        "noBtnAction": { "click": ["growYesBtn"], "text": "scrollThenRandom" },
        "noBtnText": [{ "text": "No" }],
    })
}

#[test]
fn test_minimal_intro_gets_defaults() -> Result<()> {
    let intro = IntroMessage::validate(&json!({ "collection": [{ "text": "I love you" }] }))?;

    assert_eq!(intro.collection.len(), 1);
    assert_eq!(intro.collection[0].text.as_str(), "I love you");
    assert!(intro.collection[0].image.is_none());
    assert_eq!(intro.delay_ms, 0);
    assert!(intro.shared.show_click_hearts);
    assert!(intro.shared.audio_url.is_none());
    assert!(intro.shared.background_image_url.is_none());

    Ok(())
}

#[test]
fn test_delay_is_clamped_not_rejected() -> Result<()> {
    let negative =
        IntroMessage::validate(&json!({ "collection": [{ "text": "Yo" }], "delayMs": -1 }))?;
    assert_eq!(negative.delay_ms, 0);

    let too_large =
        IntroMessage::validate(&json!({ "collection": [{ "text": "Yo" }], "delayMs": 100_000 }))?;
    assert_eq!(too_large.delay_ms, 60_000);

    let from_form =
        IntroMessage::validate(&json!({ "collection": [{ "text": "Yo" }], "delayMs": "1500" }))?;
    assert_eq!(from_form.delay_ms, 1500);

    Ok(())
}

#[test]
fn test_non_integer_delay_is_rejected() {
    for delay in [json!(1.5), json!("1.5"), json!("NaN"), json!("soon"), json!(null)] {
        let raw = json!({ "collection": [{ "text": "Yo" }], "delayMs": delay });
        let err = IntroMessage::validate(&raw).unwrap_err();
        assert_eq!(err.issues()[0].path, "delayMs", "delay {delay}");
    }
}

#[test]
fn test_empty_collection_and_text_are_rejected() {
    let err = IntroMessage::validate(&json!({ "collection": [] })).unwrap_err();
    assert_eq!(err.issues()[0].path, "collection");
    assert_eq!(err.issues()[0].kind, IssueKind::Range);

    let err = IntroMessage::validate(&json!({ "collection": [{ "text": "" }] })).unwrap_err();
    assert_eq!(err.issues()[0].path, "collection[0].text");
}

#[test]
fn test_collection_upper_bound() {
    let segments: Vec<_> = (0..129).map(|i| json!({ "text": format!("#{i}") })).collect();
    let err = IntroMessage::validate(&json!({ "collection": segments })).unwrap_err();
    assert_eq!(err.issues()[0].kind, IssueKind::Range);

    let segments: Vec<_> = (0..128).map(|i| json!({ "text": format!("#{i}") })).collect();
    assert!(IntroMessage::validate(&json!({ "collection": segments })).is_ok());
}

#[test]
fn test_blank_urls_mean_absent() -> Result<()> {
    let intro = IntroMessage::validate(&json!({
        "collection": [{ "text": "Hi", "image": "" }],
        "audioUrl": "",
        "backgroundImageUrl": "https://example.com/bg.png",
    }))?;
    assert!(intro.collection[0].image.is_none());
    assert!(intro.shared.audio_url.is_none());
    assert_eq!(
        intro.shared.background_image_url.as_ref().map(|u| u.as_str()),
        Some("https://example.com/bg.png")
    );

    let err = IntroMessage::validate(&json!({
        "collection": [{ "text": "Hi", "image": "example.com/cat.gif" }],
    }))
    .unwrap_err();
    assert_eq!(err.issues()[0].path, "collection[0].image");

    Ok(())
}

#[test]
fn test_every_issue_is_reported() {
    let err = CombinedMessage::validate(&json!({
        "intro": { "collection": [{ "text": "" }], "delayMs": 1.5, "showClickHearts": "yes" },
        "outro": {
            "dialog": {},
            "noBtnAction": { "click": [], "text": "sometimes" },
            "noBtnText": [],
        },
    }))
    .unwrap_err();

    let paths: Vec<&str> = err.issues().iter().map(|i| i.path.as_str()).collect();
    for expected in [
        "intro.showClickHearts",
        "intro.collection[0].text",
        "intro.delayMs",
        "outro.dialog.text",
        "outro.noBtnAction.text",
        "outro.noBtnAction.click",
        "outro.noBtnText",
    ] {
        assert!(paths.contains(&expected), "missing {expected} in {paths:?}");
    }
    assert_eq!(err.for_path("outro.noBtnAction").count(), 2);
}

#[test]
fn test_minimal_outro_gets_defaults() -> Result<()> {
    let outro = OutroMessage::validate(&minimal_outro())?;

    assert_eq!(outro.no_btn_text.len(), 1);
    assert_eq!(outro.no_btn_text[0].text.as_str(), "No");
    assert!(outro.no_btn_text[0].image.is_none());
    assert_eq!(outro.dialog.title.as_str(), DEFAULT_DIALOG_TITLE);
    assert!(outro.dialog.fanfare.is_empty());
    assert!(outro.shared.show_click_hearts);
    assert_eq!(outro.no_btn_action.text_behavior, TextBehavior::ScrollThenRandom);

    Ok(())
}

#[test]
fn test_outro_rejects_empty_lists() {
    let mut raw = minimal_outro();
    raw["noBtnText"] = json!([]);
    assert!(OutroMessage::validate(&raw).is_err());

    let mut raw = minimal_outro();
    raw["noBtnAction"]["click"] = json!([]);
    let err = OutroMessage::validate(&raw).unwrap_err();
    assert_eq!(err.issues()[0].path, "noBtnAction.click");
}

#[test]
fn test_duplicate_click_actions_are_deduped() -> Result<()> {
    let mut raw = minimal_outro();
    raw["noBtnAction"]["click"] = json!(["growYesBtn", "growYesBtn"]);
    let outro = OutroMessage::validate(&raw)?;
    assert_eq!(outro.no_btn_action.click.as_slice(), &[ClickAction::GrowYesBtn]);

    let mut raw = minimal_outro();
    raw["noBtnAction"]["click"] = json!(["growYesBtn", "moveAround", "fadeOut", "growYesBtn"]);
    let outro = OutroMessage::validate(&raw)?;
    assert_eq!(outro.no_btn_action.click.as_slice().len(), 3);

    let mut raw = minimal_outro();
    raw["dialog"]["fanfare"] = json!(["hearts", "hearts", "confetti", "hearts"]);
    let outro = OutroMessage::validate(&raw)?;
    assert_eq!(
        outro.dialog.fanfare.as_slice(),
        &[FanfareKind::Hearts, FanfareKind::Confetti]
    );

    Ok(())
}

#[test]
fn test_unknown_tags_are_rejected() {
    let mut raw = minimal_outro();
    raw["dialog"]["fanfare"] = json!(["fireworks"]);
    let err = OutroMessage::validate(&raw).unwrap_err();
    assert_eq!(err.issues()[0].path, "dialog.fanfare[0]");
    assert_eq!(err.issues()[0].kind, IssueKind::Shape);
}

#[test]
fn test_legacy_field_names_are_accepted() -> Result<()> {
    let outro = OutroMessage::validate(&json!({
        "audio": "https://example.com/song.mp3",
        "bgImage": "https://example.com/bg.png",
        "dialog": {
            "text": "Yay",
            "img": "https://example.com/yay.gif",
            "fanfare": { "confetti": true, "hearts": false },
        },
        "noBtnAction": { "click": { "moveAround": true, "growYesBtn": true }, "text": "random" },
        "noBtnText": [{ "text": "No", "img": "https://example.com/no.gif" }],
    }))?;

    assert_eq!(
        outro.shared.audio_url.as_ref().map(|u| u.as_str()),
        Some("https://example.com/song.mp3")
    );
    assert!(outro.shared.background_image_url.is_some());
    assert!(outro.dialog.image.is_some());
    assert_eq!(outro.dialog.fanfare.as_slice(), &[FanfareKind::Confetti]);
    assert_eq!(
        outro.no_btn_action.click.as_slice(),
        &[ClickAction::GrowYesBtn, ClickAction::MoveAround]
    );
    assert!(outro.no_btn_text[0].image.is_some());

    // Output always uses the canonical names.
    let value = outro.to_value()?;
    assert!(value.get("audioUrl").is_some());
    assert!(value.get("audio").is_none());
    assert!(value["noBtnText"][0].get("image").is_some());

    Ok(())
}

#[test]
fn test_defaults_validate_unchanged() -> Result<()> {
    let intro = create_default_intro();
    assert_eq!(IntroMessage::validate(&intro.to_value()?)?, intro);
    assert_eq!(intro.collection[0].text.as_str(), "I love you :3");

    let outro = create_default_outro();
    assert_eq!(OutroMessage::validate(&outro.to_value()?)?, outro);
    assert!(!outro.no_btn_text.is_empty());
    assert!(outro.dialog.fanfare.contains(FanfareKind::Hearts));

    let combined = create_default_combined_message();
    assert_eq!(combined.revalidate()?, combined);
    assert_eq!(CombinedMessage::default(), combined);

    Ok(())
}

#[test]
fn test_validation_is_idempotent() -> Result<()> {
    let once = CombinedMessage::validate(&json!({
        "intro": { "collection": [{ "text": "Hello", "image": "" }], "delayMs": "-50" },
        "outro": {
            "dialog": {
                "text": "Till the ends of the earth.",
                "fanfare": ["confetti", "confetti"],
            },
            "noBtnAction": { "click": ["fadeOut", "fadeOut"], "text": "scroll" },
            "noBtnText": [{ "text": "No" }, { "text": "Nope" }],
        },
    }))?;
    let twice = CombinedMessage::validate(&once.to_value()?)?;
    assert_eq!(once, twice);
    assert_eq!(twice.intro.delay_ms, 0);

    Ok(())
}

#[test]
fn test_combined_requires_both_legs() {
    let err = CombinedMessage::validate(&json!({ "intro": { "collection": [{ "text": "Hi" }] } }))
        .unwrap_err();
    assert_eq!(err.issues()[0].path, "outro");

    let err = CombinedMessage::validate(&json!({ "nope": true })).unwrap_err();
    assert_eq!(err.len(), 2);
}

#[test]
fn test_updating_one_leg_carries_the_other() {
    let original = create_default_combined_message();
    let mut intro = original.intro.clone();
    intro
        .collection
        .push(TextAndImageSegment::new(NonEmptyText::new("Second page").unwrap()));
    intro.shared.audio_url = Some(UrlString::new("https://example.com/a.mp3").unwrap());

    let updated = original.with_intro(intro.clone());
    assert_eq!(updated.intro, intro);
    assert_eq!(updated.outro, original.outro);
    assert_ne!(updated, original);
}

#[test]
fn test_canonical_json_omits_absent_optionals() -> Result<()> {
    let value = create_default_combined_message().to_value()?;
    assert_eq!(
        value,
        json!({
            "intro": {
                "collection": [{ "text": "I love you :3" }],
                "delayMs": 0,
                "showClickHearts": true,
            },
            "outro": {
                "dialog": {
                    "title": "Will you be my valentine? :3",
                    "text": "Till the ends of the earth.",
                    "fanfare": ["hearts"],
                },
                "noBtnAction": { "text": "scrollThenRandom", "click": ["growYesBtn"] },
                "noBtnText": [{ "text": "No" }, { "text": "No :(" }],
                "showClickHearts": true,
            },
        })
    );
    Ok(())
}
