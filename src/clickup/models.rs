//! The slice of ClickUp's task and comment JSON the relay reads.
//!
//! Everything is defaulted so a partial or unexpected payload still
//! deserializes; missing pieces surface as empty values downstream.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomField {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Opaque; for drop-downs this is usually the selected option's `orderindex`.
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub type_config: TypeConfig,
}

impl CustomField {
    #[must_use]
    pub fn options(&self) -> &[FieldOption] {
        &self.type_config.options
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeConfig {
    #[serde(default)]
    pub options: Vec<FieldOption>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldOption {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "name")]
    pub label: String,
    #[serde(default, rename = "orderindex")]
    pub index: Value,
}

/// A task comment. `segments` stays raw JSON; the comment parser walks it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "comment")]
    pub segments: Value,
    #[serde(default)]
    pub comment_text: String,
    #[serde(default)]
    pub user: Option<CommentUser>,
    /// Epoch milliseconds, as a string or a number depending on the endpoint.
    #[serde(default)]
    pub date: Option<Value>,
}

impl Comment {
    /// Username, then email, then `None`.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        let user = self.user.as_ref()?;
        user.username
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| user.email.as_deref().filter(|s| !s.trim().is_empty()))
    }

    /// The comment date as a string, whatever JSON type ClickUp used.
    #[must_use]
    pub fn timestamp(&self) -> Option<String> {
        match self.date.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentsResponse {
    #[serde(default)]
    pub comments: Vec<Value>,
}
