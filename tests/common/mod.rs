#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clickup_relay::clickup::{Comment, Task, TaskApi};
use clickup_relay::core::config::AppConfig;
use clickup_relay::core::registry::Destination;
use clickup_relay::errors::RelayError;
use clickup_relay::relay::Relay;
use clickup_relay::telegram::BotApi;

pub const DEFAULT_CHAT: &str = "918656204";
pub const FACILITY_CHAT: &str = "-1002914241474";
pub const OPERATOR_CHAT: i64 = 918_656_204;

#[derive(Debug, Clone)]
pub struct Call {
    pub method: String,
    pub params: Value,
}

impl Call {
    /// Chat id as a string, whichever JSON type was sent.
    pub fn chat(&self) -> String {
        match &self.params["chat_id"] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        self.params
            .get("text")
            .or_else(|| self.params.get("caption"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn is_send(&self) -> bool {
        self.method == "sendMessage" || self.method == "sendPhoto"
    }
}

/// Records every Bot API call; fails calls aimed at chosen chats or methods.
#[derive(Default)]
pub struct RecordingBot {
    calls: Mutex<Vec<Call>>,
    failing_chats: Vec<String>,
    failing_methods: Vec<String>,
}

impl RecordingBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_for_chat(chat: &str) -> Arc<Self> {
        Arc::new(Self {
            failing_chats: vec![chat.to_string()],
            ..Default::default()
        })
    }

    pub fn failing_method(method: &str) -> Arc<Self> {
        Arc::new(Self {
            failing_methods: vec![method.to_string()],
            ..Default::default()
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sends(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_send).collect()
    }

    pub fn calls_to(&self, method: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method)
            .collect()
    }
}

#[async_trait]
impl BotApi for RecordingBot {
    async fn call(
        &self,
        method: &str,
        params: Value,
        _timeout: Duration,
    ) -> Result<Value, RelayError> {
        let call = Call {
            method: method.to_string(),
            params,
        };
        let fail = self.failing_methods.iter().any(|m| m == method)
            || self.failing_chats.iter().any(|c| *c == call.chat());
        self.calls.lock().unwrap().push(call);

        if fail {
            Err(RelayError::TelegramError(format!(
                "{method} HTTP 400 Bad Request: chat not found"
            )))
        } else {
            Ok(json!({ "message_id": 1 }))
        }
    }
}

/// Serves a fixed task and latest comment, or fails every lookup.
#[derive(Default)]
pub struct FakeTasks {
    pub task: Option<Value>,
    pub comment: Option<Value>,
    pub fail: bool,
}

#[async_trait]
impl TaskApi for FakeTasks {
    async fn get_task(&self, _task_id: &str) -> Result<Option<Task>, RelayError> {
        if self.fail {
            return Err(RelayError::HttpError("connection reset".to_string()));
        }
        Ok(self
            .task
            .clone()
            .map(|v| serde_json::from_value(v).unwrap()))
    }

    async fn get_latest_comment(&self, _task_id: &str) -> Result<Option<Comment>, RelayError> {
        if self.fail {
            return Err(RelayError::HttpError("connection reset".to_string()));
        }
        Ok(self
            .comment
            .clone()
            .map(|v| serde_json::from_value(v).unwrap()))
    }
}

pub fn facility() -> Destination {
    Destination::new("facility", FACILITY_CHAT, "Facility & Partnership").with_emoji("🏢")
}

pub fn config() -> AppConfig {
    AppConfig::new("123456:test-token", DEFAULT_CHAT).with_destinations(vec![facility()])
}

pub fn relay_with(config: AppConfig, bot: &Arc<RecordingBot>, tasks: Option<FakeTasks>) -> Relay {
    Relay::with_apis(
        config,
        Arc::clone(bot) as Arc<dyn BotApi>,
        tasks.map(|t| Arc::new(t) as Arc<dyn TaskApi>),
    )
}

/// A task whose "Requestor" drop-down selects `label`.
pub fn task_with_requestor(label: &str) -> Value {
    json!({
        "id": "86abc",
        "name": "Fix the lobby door",
        "custom_fields": [
            {"id": "f1", "name": "Priority note", "type": "short_text", "value": "high"},
            {
                "id": "f2",
                "name": "Requestor",
                "type": "drop_down",
                "value": 1,
                "type_config": {"options": [
                    {"id": "o0", "name": "IT", "orderindex": 0},
                    {"id": "o1", "name": label, "orderindex": 1}
                ]}
            }
        ]
    })
}

pub fn plain_task() -> Value {
    json!({ "id": "86abc", "name": "Fix the lobby door", "custom_fields": [] })
}

pub fn text_comment(text: &str) -> Value {
    json!({
        "id": "c1",
        "comment": [{"text": text}],
        "comment_text": text,
        "user": {"username": "Sara", "email": "sara@example.com"},
        "date": "1710937800000"
    })
}

pub fn image_comment() -> Value {
    json!({
        "id": "c2",
        "comment": [{
            "type": "image",
            "text": "photo.png",
            "image": {
                "name": "photo.png",
                "url": "https://attachments.clickup.com/photo.png",
                "thumbnail_large": "https://attachments.clickup.com/photo_large.png"
            }
        }],
        "comment_text": "photo.png",
        "user": {"username": "Sara"},
        "date": "1710937800000"
    })
}

/// API Gateway v2 event wrapping a JSON body.
pub fn post_event(body: &Value) -> Value {
    json!({
        "requestContext": {"http": {"method": "POST"}},
        "rawPath": "/webhook",
        "headers": {"content-type": "application/json"},
        "body": body.to_string(),
        "isBase64Encoded": false
    })
}

pub fn clickup_webhook(task_id: &str) -> Value {
    json!({ "payload": { "id": task_id, "name": "Fix the lobby door" } })
}
