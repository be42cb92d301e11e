//! ClickUp webhook handling: fetch, classify, format, route.

use chrono::Utc;
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::parsing::v_str;
use crate::clickup::{Comment, Task, classify_task, parse_comment};
use crate::core::registry::Destination;
use crate::errors::DeliveryError;
use crate::relay::Relay;
use crate::telegram::keyboard::approval_keyboard;
use crate::telegram::message_builder::{CommentMessage, build_activity_message, task_link};
use crate::telegram::Target;

/// Summary of what one task event produced, mainly for logs and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEventReport {
    pub task_id: String,
    pub team: Option<String>,
    pub delivered: usize,
    pub failed: usize,
}

/// The task object of a webhook: `payload` when present, else the body itself.
fn task_payload(body: &Value) -> &Value {
    match body.get("payload") {
        Some(payload) if payload.is_object() => payload,
        _ => body,
    }
}

async fn fetch_details(relay: &Relay, task_id: &str) -> (Option<Task>, Option<Comment>) {
    let Some(api) = relay.tasks() else {
        return (None, None);
    };
    if task_id.is_empty() {
        return (None, None);
    }

    let task = api.get_task(task_id).await.unwrap_or_else(|e| {
        warn!(task_id = %task_id, "Task lookup failed: {}", e);
        None
    });
    let comment = api.get_latest_comment(task_id).await.unwrap_or_else(|e| {
        warn!(task_id = %task_id, "Comment lookup failed: {}", e);
        None
    });
    (task, comment)
}

/// Targets for a comment, each with the buttons it should carry.
fn comment_targets<'r>(
    relay: &'r Relay,
    team: Option<(&'r str, &'r Destination)>,
) -> Vec<(Target<'r>, Option<Value>)> {
    let config = relay.config();
    match team {
        None => vec![(Target::Default, None)],
        Some((key, _)) if config.require_approval => {
            vec![(Target::Default, Some(approval_keyboard(key)))]
        }
        Some((_, dest)) => {
            let mut targets = vec![(Target::Destination(dest), None)];
            if config.also_notify_default {
                targets.push((Target::Default, None));
            }
            targets
        }
    }
}

/// Handle one ClickUp webhook body. Never fails; problems degrade the message.
#[instrument(level = "info", skip_all)]
pub async fn handle_task_event(relay: &Relay, body: &Value) -> TaskEventReport {
    let config = relay.config();
    let payload = task_payload(body);

    let task_id = v_str(payload, &["id"])
        .or_else(|| v_str(body, &["task_id"]))
        .unwrap_or("")
        .trim()
        .to_string();

    let (task, comment) = fetch_details(relay, &task_id).await;

    let task_name = v_str(payload, &["name"])
        .filter(|n| !n.trim().is_empty())
        .map(str::to_string)
        .or_else(|| task.as_ref().map(|t| t.name.clone()));

    let team = classify_task(task.as_ref(), &config.destinations, &config.classification_field);
    let team = match team {
        Some((key, dest)) if !dest.is_sendable() => {
            info!(task_id = %task_id, key = %key, "Task classified to a disabled destination");
            None
        }
        other => other,
    };

    info!(
        task_id = %task_id,
        team = team.map_or("-", |(k, _)| k),
        has_comment = comment.is_some(),
        "Processing ClickUp event"
    );

    let link = task_link(config, &task_id);
    let now = Utc::now();
    let notifier = relay.notifier();
    let mut report = TaskEventReport {
        task_id: task_id.clone(),
        team: team.map(|(k, _)| k.to_string()),
        ..Default::default()
    };

    let mut record = |result: Result<(), DeliveryError>| {
        if result.is_ok() {
            report.delivered += 1;
        } else {
            report.failed += 1;
        }
    };

    let Some(comment) = comment else {
        let message = build_activity_message(task_name.as_deref(), link.as_deref(), now);
        record(notifier.send_text(Target::Default, &message, None).await);
        return report;
    };

    let parsed = parse_comment(Some(&comment));
    let text = parsed.display_text();
    let date = comment.timestamp();
    let message = CommentMessage {
        task_name: task_name.as_deref(),
        text: &text,
        author: comment.author(),
        date: date.as_deref(),
        link: link.as_deref(),
    }
    .render(now);

    for (target, actions) in comment_targets(relay, team) {
        if parsed.images.is_empty() {
            record(notifier.send_text(target, &message, actions).await);
        } else {
            for image in &parsed.images {
                record(
                    notifier
                        .send_photo(target, image, &message, actions.clone())
                        .await,
                );
            }
        }
    }

    report
}
