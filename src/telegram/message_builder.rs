//! Outbound message text.
//!
//! Output is Telegram legacy Markdown; the `**` markers are sent as-is.

use chrono::{DateTime, Utc};
use std::fmt::Write as _;

use crate::core::config::AppConfig;
use crate::utils::jalali::{format_jalali, format_timestamp_or};

pub const TASK_NAME_PLACEHOLDER: &str = "تسک";
pub const AUTHOR_PLACEHOLDER: &str = "کاربر";

/// `<base><task id>` when links are enabled and the id is known.
#[must_use]
pub fn task_link(config: &AppConfig, task_id: &str) -> Option<String> {
    let task_id = task_id.trim();
    if !config.show_task_link || task_id.is_empty() {
        return None;
    }
    Some(format!("{}{task_id}", config.task_link_base))
}

fn name_or_placeholder(name: Option<&str>) -> &str {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(TASK_NAME_PLACEHOLDER)
}

fn push_link(out: &mut String, link: Option<&str>) {
    if let Some(link) = link {
        let _ = write!(out, "\n\n🔗 [مشاهده تسک]({link})");
    }
}

/// A new comment on a task.
#[derive(Debug, Clone, Default)]
pub struct CommentMessage<'a> {
    pub task_name: Option<&'a str>,
    pub text: &'a str,
    pub author: Option<&'a str>,
    /// Raw epoch string from ClickUp.
    pub date: Option<&'a str>,
    pub link: Option<&'a str>,
}

impl CommentMessage<'_> {
    #[must_use]
    pub fn render(&self, now: DateTime<Utc>) -> String {
        let author = self
            .author
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(AUTHOR_PLACEHOLDER);

        let mut out = String::from("💬 **کامنت جدید**\n\n");
        let _ = write!(out, "📋 **تسک:** {}\n\n", name_or_placeholder(self.task_name));
        let _ = write!(out, "💬 **کامنت:** {}\n\n", self.text);
        let _ = write!(out, "👤 **نوشته:** {author}\n\n");
        let _ = write!(out, "🕐 **تاریخ:** {}", format_timestamp_or(self.date, now));
        push_link(&mut out, self.link);
        out
    }
}

/// Any task event without a comment (status change, assignment, ...).
#[must_use]
pub fn build_activity_message(task_name: Option<&str>, link: Option<&str>, now: DateTime<Utc>) -> String {
    let mut out = String::from("🔔 **فعالیت جدید**\n\n");
    let _ = write!(out, "📋 **تسک:** {}\n\n", name_or_placeholder(task_name));
    let _ = write!(out, "🕐 {}", format_jalali(now));
    push_link(&mut out, link);
    out
}

/// Prompt asking the operator for replacement text; ends with the correlation marker.
#[must_use]
pub fn build_edit_prompt(display_name: &str, marker: &str) -> String {
    format!(
        "✍️ متن ویرایش شده برای تیم **{display_name}** را در پاسخ به این پیام بنویسید.\n\n{marker}"
    )
}

#[must_use]
pub fn build_test_message(now: DateTime<Utc>) -> String {
    format!("🧪 **تست سرور**\n\n✅ سرور فعال است!\n🕐 {}", format_jalali(now))
}
