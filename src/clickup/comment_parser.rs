//! Flattens a ClickUp comment into plain text plus image URLs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::models::Comment;

/// Shown instead of the comment text when a comment only carries images.
pub const IMAGE_PLACEHOLDER: &str = "📷 تصویر جدید";

/// A text fragment that is nothing but an image file name, e.g. `screenshot 2.png`.
static IMAGE_FILENAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[^\s/\\]+(?: [^\s/\\]+)*\.(?:png|jpe?g|gif|webp|bmp|heic|svg)$")
        .expect("static regex compile")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedComment {
    pub text: String,
    pub images: Vec<String>,
}

impl ParsedComment {
    /// Text to render; image-only comments get [`IMAGE_PLACEHOLDER`].
    #[must_use]
    pub fn display_text(&self) -> String {
        if self.text.is_empty() && !self.images.is_empty() {
            IMAGE_PLACEHOLDER.to_string()
        } else {
            self.text.clone()
        }
    }
}

fn is_image_filename(fragment: &str) -> bool {
    IMAGE_FILENAME_RE.is_match(fragment.trim())
}

fn image_url(segment: &Value) -> Option<String> {
    let image = segment.get("image")?;
    ["thumbnail_large", "url"]
        .iter()
        .filter_map(|key| image.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|url| !url.is_empty())
        .map(ToString::to_string)
}

/// Parse a comment. Never fails: anything unexpected is skipped.
#[must_use]
pub fn parse_comment(comment: Option<&Comment>) -> ParsedComment {
    let Some(comment) = comment else {
        return ParsedComment::default();
    };

    let mut text = String::new();
    let mut images = Vec::new();

    if let Some(segments) = comment.segments.as_array() {
        for segment in segments {
            let kind = segment.get("type").and_then(Value::as_str).unwrap_or("");
            if kind == "image" {
                if let Some(url) = image_url(segment) {
                    images.push(url);
                }
                continue;
            }

            let Some(fragment) = segment.get("text").and_then(Value::as_str) else {
                continue;
            };
            if fragment.trim().is_empty() && text.is_empty() {
                continue;
            }
            // ClickUp echoes image names as text next to the image segment.
            if is_image_filename(fragment) {
                continue;
            }
            text.push_str(fragment);
        }
    }

    let mut text = text.trim().to_string();
    if text.is_empty() && images.is_empty() {
        text = comment.comment_text.trim().to_string();
    }

    ParsedComment { text, images }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn comment(segments: Value, raw: &str) -> Comment {
        Comment {
            segments,
            comment_text: raw.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn filename_detection() {
        assert!(is_image_filename("image.png"));
        assert!(is_image_filename(" Screenshot 2024.JPG "));
        assert!(!is_image_filename("see image.png for details, thanks"));
        assert!(!is_image_filename("done"));
    }

    #[test]
    fn concatenates_text_segments_in_order() {
        let c = comment(
            json!([{"text": "Hello "}, {"text": "world", "attributes": {"bold": true}}, {"text": "\n"}]),
            "",
        );
        assert_eq!(parse_comment(Some(&c)).text, "Hello world");
    }

    #[test]
    fn filename_fragment_after_image_is_dropped() {
        let c = comment(
            json!([
                {"type": "image", "text": "shot.png", "image": {"url": "https://x/full.png", "thumbnail_large": "https://x/large.png"}},
                {"text": "shot.png"},
                {"text": " looks fine"}
            ]),
            "",
        );
        let parsed = parse_comment(Some(&c));
        assert_eq!(parsed.images, vec!["https://x/large.png".to_string()]);
        assert_eq!(parsed.text, "looks fine");
    }

    #[test]
    fn non_list_segments_fall_back_to_raw_text() {
        let c = comment(json!("unexpected"), "  raw body ");
        assert_eq!(parse_comment(Some(&c)).text, "raw body");
    }
}
