use clickup_relay::clickup::{Comment, IMAGE_PLACEHOLDER, parse_comment};
use serde_json::json;

fn comment(value: serde_json::Value) -> Comment {
    serde_json::from_value(value).unwrap()
}

#[test]
fn missing_comment_yields_empty_result() {
    let parsed = parse_comment(None);
    assert!(parsed.text.is_empty());
    assert!(parsed.images.is_empty());
    assert!(parsed.display_text().is_empty());
}

#[test]
fn image_only_comment_has_empty_text_and_placeholder() {
    let c = comment(json!({
        "comment": [
            {"type": "image", "text": "a.png", "image": {"thumbnail_large": "https://x/a_large.png", "url": "https://x/a.png"}},
            {"type": "image", "text": "b.png", "image": {"url": "https://x/b.png"}},
            {"type": "image", "text": "c.png", "image": {}}
        ],
        "comment_text": "a.png b.png c.png"
    }));

    let parsed = parse_comment(Some(&c));

    assert!(parsed.text.is_empty(), "got text {:?}", parsed.text);
    // Only segments with a resolvable URL count.
    assert_eq!(
        parsed.images,
        vec!["https://x/a_large.png".to_string(), "https://x/b.png".to_string()]
    );
    assert_eq!(parsed.display_text(), IMAGE_PLACEHOLDER);
}

#[test]
fn mixed_segments_keep_order_of_text_and_images() {
    let c = comment(json!({
        "comment": [
            {"text": "Before "},
            {"type": "image", "image": {"url": "https://x/1.png"}},
            {"text": "after"},
            {"type": "image", "image": {"url": "https://x/2.png"}}
        ]
    }));

    let parsed = parse_comment(Some(&c));

    assert!(parsed.text.contains("Before"));
    assert!(parsed.text.contains("after"));
    assert!(parsed.text.find("Before") < parsed.text.find("after"));
    assert_eq!(parsed.images.len(), 2);
    assert_eq!(parsed.images[0], "https://x/1.png");
    assert_eq!(parsed.display_text(), parsed.text);
}

#[test]
fn text_is_trimmed() {
    let c = comment(json!({"comment": [{"text": "\n  Done \n"}]}));
    assert_eq!(parse_comment(Some(&c)).text, "Done");
}

#[test]
fn missing_segments_fall_back_to_comment_text() {
    let c = comment(json!({"comment_text": "plain body"}));
    assert_eq!(parse_comment(Some(&c)).text, "plain body");
}

#[test]
fn malformed_segments_are_skipped() {
    let c = comment(json!({
        "comment": [42, null, {"text": 7}, {"type": "image", "image": "nope"}, {"text": "ok"}],
        "comment_text": ""
    }));
    let parsed = parse_comment(Some(&c));
    assert_eq!(parsed.text, "ok");
    assert!(parsed.images.is_empty());
}

#[test]
fn filename_before_its_image_is_not_comment_text() {
    let c = comment(json!({
        "comment": [
            {"text": "shot.png"},
            {"type": "image", "image": {"url": "https://x/full.png"}}
        ],
        "comment_text": "shot.png"
    }));

    let parsed = parse_comment(Some(&c));

    assert!(parsed.text.is_empty(), "got text {:?}", parsed.text);
    assert_eq!(parsed.images, vec!["https://x/full.png".to_string()]);
    assert_eq!(parsed.display_text(), IMAGE_PLACEHOLDER);
}

#[test]
fn lone_filename_without_image_falls_back_to_comment_text() {
    let c = comment(json!({
        "comment": [{"text": "notes.png"}],
        "comment_text": "notes.png"
    }));
    assert_eq!(parse_comment(Some(&c)).text, "notes.png");
}
