mod common;

use clickup_relay::errors::DeliveryError;
use clickup_relay::telegram::keyboard::approval_keyboard;
use clickup_relay::telegram::{Notifier, Target};

use common::{DEFAULT_CHAT, FACILITY_CHAT, RecordingBot, config, facility};

#[tokio::test]
async fn send_text_to_default_uses_markdown_and_actions() {
    let bot = RecordingBot::new();
    let cfg = config();
    let notifier = Notifier::new(&*bot, &cfg);

    let result = notifier
        .send_text(Target::Default, "hello", Some(approval_keyboard("facility")))
        .await;

    assert!(result.is_ok());
    let calls = bot.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "sendMessage");
    assert_eq!(calls[0].chat(), DEFAULT_CHAT);
    assert_eq!(calls[0].params["parse_mode"], "Markdown");
    assert_eq!(
        calls[0].params["reply_markup"]["inline_keyboard"][0][0]["callback_data"],
        "send:facility"
    );
}

#[tokio::test]
async fn send_photo_carries_caption() {
    let bot = RecordingBot::new();
    let cfg = config();
    let notifier = Notifier::new(&*bot, &cfg);
    let dest = facility();

    let result = notifier
        .send_photo(Target::Destination(&dest), "file-id-xl", "caption text", None)
        .await;

    assert!(result.is_ok());
    let call = &bot.calls()[0];
    assert_eq!(call.method, "sendPhoto");
    assert_eq!(call.chat(), FACILITY_CHAT);
    assert_eq!(call.params["photo"], "file-id-xl");
    assert_eq!(call.params["caption"], "caption text");
    assert!(call.params.get("reply_markup").is_none());
}

#[tokio::test]
async fn disabled_destination_is_refused_without_a_call() {
    let bot = RecordingBot::new();
    let cfg = config();
    let notifier = Notifier::new(&*bot, &cfg);
    let disabled = facility().disabled();
    let mut no_chat = facility();
    no_chat.chat_id = String::new();

    let a = notifier
        .send_text(Target::Destination(&disabled), "x", None)
        .await;
    let b = notifier
        .send_photo(Target::Destination(&no_chat), "img", "x", None)
        .await;

    assert_eq!(
        a,
        Err(DeliveryError::DestinationUnavailable("facility".to_string()))
    );
    assert!(matches!(b, Err(DeliveryError::DestinationUnavailable(_))));
    assert!(bot.calls().is_empty());
}

#[tokio::test]
async fn api_failure_is_reported_not_raised() {
    let bot = RecordingBot::failing_for_chat(FACILITY_CHAT);
    let cfg = config();
    let notifier = Notifier::new(&*bot, &cfg);
    let dest = facility();

    let result = notifier
        .send_text(Target::Destination(&dest), "x", None)
        .await;

    assert!(matches!(result, Err(DeliveryError::Rejected(_))));
    assert_eq!(bot.calls().len(), 1);
}

#[tokio::test]
async fn clearing_actions_twice_is_harmless() {
    // The second edit is what Telegram rejects with "message is not modified".
    let bot = RecordingBot::failing_method("editMessageReplyMarkup");
    let cfg = config();
    let notifier = Notifier::new(&*bot, &cfg);

    notifier.clear_actions(42, 7).await;
    notifier.clear_actions(42, 7).await;

    let edits = bot.calls_to("editMessageReplyMarkup");
    assert_eq!(edits.len(), 2);
    assert_eq!(edits[0].params["message_id"], 7);
    assert_eq!(edits[0].params["reply_markup"]["inline_keyboard"], serde_json::json!([]));
    assert!(bot.sends().is_empty());
}

#[tokio::test]
async fn answer_interaction_with_and_without_feedback() {
    let bot = RecordingBot::new();
    let cfg = config();
    let notifier = Notifier::new(&*bot, &cfg);

    notifier.answer_interaction("cb-1", Some("done")).await;
    notifier.answer_interaction("cb-2", None).await;

    let acks = bot.calls_to("answerCallbackQuery");
    assert_eq!(acks.len(), 2);
    assert_eq!(acks[0].params["callback_query_id"], "cb-1");
    assert_eq!(acks[0].params["text"], "done");
    assert!(acks[1].params.get("text").is_none());
}

#[tokio::test]
async fn operator_chat_target_sends_numeric_chat_id() {
    let bot = RecordingBot::new();
    let cfg = config();
    let notifier = Notifier::new(&*bot, &cfg);

    notifier.send_text(Target::Chat(555), "ok", None).await.unwrap();

    assert_eq!(bot.calls()[0].params["chat_id"], 555);
}
