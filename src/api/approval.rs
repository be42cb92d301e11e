//! Operator approval flow driven by Telegram updates.
//!
//! Every message sits in an implicit idle state; a button press or a reply
//! triggers exactly one transition and nothing is remembered afterwards.
//! The only carried state is the `(ID: <key>)` marker inside edit prompts.

use tracing::{info, instrument, warn};

use crate::errors::DeliveryError;
use crate::relay::Relay;
use crate::telegram::keyboard::{
    ActionToken, ActionVerb, correlation_marker, extract_correlation_key, force_reply,
};
use crate::telegram::message_builder::build_edit_prompt;
use crate::telegram::models::{CallbackQuery, Message, Update};
use crate::telegram::Target;

pub const FEEDBACK_SENT: &str = "✅ ارسال شد";
pub const FEEDBACK_SEND_FAILED: &str = "❌ خطا در ارسال";
pub const FEEDBACK_UNKNOWN_TEAM: &str = "❌ تیم یافت نشد";
pub const FEEDBACK_AWAITING_TEXT: &str = "📝 منتظر متن جدید...";
pub const CONFIRM_EDIT_SENT: &str = "✅ پیام ویرایش شده ارسال شد.";
pub const CONFIRM_EDIT_FAILED: &str = "❌ ارسال پیام ویرایش شده ناموفق بود.";

/// What a single update did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalOutcome {
    Forwarded { key: String },
    ForwardFailed { key: String },
    UnknownDestination { key: String },
    PromptSent { key: String },
    EditForwarded { key: String },
    EditFailed { key: String },
    Ignored,
}

/// Route a Telegram update to the press or reply transition.
pub async fn handle_update(relay: &Relay, update: &Update) -> ApprovalOutcome {
    if let Some(callback) = &update.callback_query {
        return handle_interaction(relay, callback).await;
    }
    if let Some(message) = &update.message {
        return handle_reply(relay, message).await;
    }
    ApprovalOutcome::Ignored
}

/// A press on one of the send / edit buttons.
#[instrument(level = "info", skip_all, fields(interaction_id = %callback.id))]
pub async fn handle_interaction(relay: &Relay, callback: &CallbackQuery) -> ApprovalOutcome {
    let notifier = relay.notifier();
    let data = callback.data.as_deref().unwrap_or("");

    let Some(token) = ActionToken::parse(data) else {
        info!(data = %data, "Ignoring unrecognised callback data");
        notifier.answer_interaction(&callback.id, None).await;
        return ApprovalOutcome::Ignored;
    };

    let Some(dest) = relay.config().destinations.resolve(&token.key) else {
        warn!(key = %token.key, "Callback refers to an unknown or disabled destination");
        notifier
            .answer_interaction(&callback.id, Some(FEEDBACK_UNKNOWN_TEAM))
            .await;
        return ApprovalOutcome::UnknownDestination { key: token.key };
    };

    let Some(original) = callback.message.as_ref() else {
        warn!("Callback carries no message snapshot");
        notifier
            .answer_interaction(&callback.id, Some(FEEDBACK_SEND_FAILED))
            .await;
        return ApprovalOutcome::ForwardFailed { key: token.key };
    };

    match token.verb {
        ActionVerb::Send => {
            let text = original.body().unwrap_or("");
            let sent = match original.largest_photo() {
                Some(file_id) => {
                    notifier
                        .send_photo(Target::Destination(dest), file_id, text, None)
                        .await
                }
                None if !text.is_empty() => {
                    notifier
                        .send_text(Target::Destination(dest), text, None)
                        .await
                }
                None => {
                    warn!("Original message has neither text nor photo");
                    Err(DeliveryError::Transport("nothing to forward".to_string()))
                }
            };

            if sent.is_ok() {
                notifier
                    .clear_actions(original.chat.id, original.message_id)
                    .await;
                notifier
                    .answer_interaction(&callback.id, Some(FEEDBACK_SENT))
                    .await;
                ApprovalOutcome::Forwarded { key: token.key }
            } else {
                notifier
                    .answer_interaction(&callback.id, Some(FEEDBACK_SEND_FAILED))
                    .await;
                ApprovalOutcome::ForwardFailed { key: token.key }
            }
        }
        ActionVerb::Edit => {
            let name = dest.display_name();
            let prompt = build_edit_prompt(name, &correlation_marker(&token.key));
            let placeholder = format!("متن برای {name}...");

            // The operator gets the "waiting" toast even if the prompt failed.
            if let Err(e) = notifier
                .send_text(
                    Target::Chat(original.chat.id),
                    &prompt,
                    Some(force_reply(&placeholder)),
                )
                .await
            {
                warn!(key = %token.key, "Edit prompt was not delivered: {}", e);
            }
            notifier
                .answer_interaction(&callback.id, Some(FEEDBACK_AWAITING_TEXT))
                .await;
            ApprovalOutcome::PromptSent { key: token.key }
        }
    }
}

/// A reply to an edit prompt carrying the replacement text.
///
/// Replies to anything else are ignored without a word.
#[instrument(level = "info", skip_all, fields(chat_id = message.chat.id))]
pub async fn handle_reply(relay: &Relay, message: &Message) -> ApprovalOutcome {
    let Some(replied) = message.reply_to_message.as_deref() else {
        return ApprovalOutcome::Ignored;
    };
    let Some(key) = replied.text.as_deref().and_then(extract_correlation_key) else {
        return ApprovalOutcome::Ignored;
    };
    let Some(dest) = relay.config().destinations.resolve(key) else {
        info!(key = %key, "Reply names an unknown or disabled destination");
        return ApprovalOutcome::Ignored;
    };
    let Some(new_text) = message.text.as_deref().filter(|t| !t.trim().is_empty()) else {
        return ApprovalOutcome::Ignored;
    };

    let notifier = relay.notifier();
    let operator = Target::Chat(message.chat.id);

    if notifier
        .send_text(Target::Destination(dest), new_text, None)
        .await
        .is_ok()
    {
        if let Err(e) = notifier.send_text(operator, CONFIRM_EDIT_SENT, None).await {
            warn!(key = %key, "Edit confirmation was not delivered: {}", e);
        }
        ApprovalOutcome::EditForwarded {
            key: key.to_string(),
        }
    } else {
        if let Err(e) = notifier.send_text(operator, CONFIRM_EDIT_FAILED, None).await {
            warn!(key = %key, "Edit failure notice was not delivered: {}", e);
        }
        ApprovalOutcome::EditFailed {
            key: key.to_string(),
        }
    }
}
