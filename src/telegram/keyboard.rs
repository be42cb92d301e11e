//! Inline actions and the tokens they carry.
//!
//! A button's `callback_data` is `<verb>:<destination key>`. Edit prompts
//! carry their destination inside the visible text as `(ID: <key>)`, which
//! is how a later reply is tied back to a destination without any storage.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Value, json};
use std::fmt;

const SEND_LABEL: &str = "ارسال به تیم 📤";
const EDIT_LABEL: &str = "ادیت و ارسال ✏️";

static CORRELATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(ID: ([^)]*)\)").expect("static regex compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionVerb {
    Send,
    Edit,
}

impl ActionVerb {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ActionVerb::Send => "send",
            ActionVerb::Edit => "edit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionToken {
    pub verb: ActionVerb,
    pub key: String,
}

impl ActionToken {
    #[must_use]
    pub fn new(verb: ActionVerb, key: &str) -> Self {
        Self {
            verb,
            key: key.to_string(),
        }
    }

    /// `None` for anything other than `send:<key>` / `edit:<key>`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (verb, key) = raw.split_once(':')?;
        let verb = match verb {
            "send" => ActionVerb::Send,
            "edit" => ActionVerb::Edit,
            _ => return None,
        };
        if key.is_empty() {
            return None;
        }
        Some(Self::new(verb, key))
    }
}

impl fmt::Display for ActionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.verb.as_str(), self.key)
    }
}

#[derive(Debug, Clone)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineButton {
    #[must_use]
    pub fn new(text: &str, token: &ActionToken) -> Self {
        Self {
            text: text.to_string(),
            callback_data: token.to_string(),
        }
    }
}

#[must_use]
pub fn inline_keyboard(rows: Vec<Vec<InlineButton>>) -> Value {
    let inline_keyboard = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|b| json!({ "text": b.text, "callback_data": b.callback_data }))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    json!({ "inline_keyboard": inline_keyboard })
}

/// The send / edit pair attached to messages awaiting operator approval.
#[must_use]
pub fn approval_keyboard(key: &str) -> Value {
    inline_keyboard(vec![vec![
        InlineButton::new(SEND_LABEL, &ActionToken::new(ActionVerb::Send, key)),
        InlineButton::new(EDIT_LABEL, &ActionToken::new(ActionVerb::Edit, key)),
    ]])
}

/// Markup that makes the operator's client open a reply to the prompt.
#[must_use]
pub fn force_reply(placeholder: &str) -> Value {
    json!({
        "force_reply": true,
        "input_field_placeholder": placeholder,
    })
}

#[must_use]
pub fn correlation_marker(key: &str) -> String {
    format!("(ID: {key})")
}

/// Destination key from the first `(ID: <key>)` in `text`.
#[must_use]
pub fn extract_correlation_key(text: &str) -> Option<&str> {
    CORRELATION_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|key| !key.is_empty())
}
