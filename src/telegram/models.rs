//! Inbound Telegram update shapes (only the fields the relay reads).

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message_id: i64,
    #[serde(default)]
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub photo: Vec<PhotoSize>,
    #[serde(default)]
    pub reply_to_message: Option<Box<Message>>,
}

impl Message {
    /// Text, or the caption for media messages.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        non_blank(self.text.as_deref()).or_else(|| non_blank(self.caption.as_deref()))
    }

    /// `file_id` of the largest rendition; Telegram lists sizes smallest first.
    #[must_use]
    pub fn largest_photo(&self) -> Option<&str> {
        self.photo
            .last()
            .map(|p| p.file_id.as_str())
            .filter(|id| !id.is_empty())
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Chat {
    #[serde(default)]
    pub id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoSize {
    #[serde(default)]
    pub file_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(value: serde_json::Value) -> Message {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn body_skips_blank_text_for_caption() {
        let m = message(serde_json::json!({"text": "", "caption": "photo caption"}));
        assert_eq!(m.body(), Some("photo caption"));

        let m = message(serde_json::json!({"text": "hello", "caption": "ignored"}));
        assert_eq!(m.body(), Some("hello"));

        let m = message(serde_json::json!({"text": "  ", "caption": " "}));
        assert_eq!(m.body(), None);
    }

    #[test]
    fn largest_photo_is_last_size() {
        let m = message(serde_json::json!({"photo": [{"file_id": "s"}, {"file_id": "l"}]}));
        assert_eq!(m.largest_photo(), Some("l"));
        assert_eq!(Message::default().largest_photo(), None);
    }
}
