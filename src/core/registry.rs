//! Static table of team destinations.
//!
//! Loaded once with the rest of [`AppConfig`](super::config::AppConfig) and
//! never mutated afterwards. Order is the configuration order and is the
//! tie-break order for classification.

use serde::Deserialize;

fn default_enabled() -> bool {
    true
}

/// A Telegram chat a classified task can be routed to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Destination {
    pub key: String,
    #[serde(default)]
    pub chat_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Destination {
    #[must_use]
    pub fn new(key: &str, chat_id: &str, name: &str) -> Self {
        Self {
            key: key.to_string(),
            chat_id: chat_id.to_string(),
            name: name.to_string(),
            emoji: String::new(),
            enabled: true,
        }
    }

    #[must_use]
    pub fn with_emoji(mut self, emoji: &str) -> Self {
        self.emoji = emoji.to_string();
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Whether a send to this destination is allowed at all.
    #[must_use]
    pub fn is_sendable(&self) -> bool {
        self.enabled && !self.chat_id.trim().is_empty()
    }

    /// Name shown to operators; falls back to the key.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.key
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationRegistry {
    entries: Vec<Destination>,
}

impl DestinationRegistry {
    /// Later duplicates of a key are dropped so lookups stay unambiguous.
    #[must_use]
    pub fn new(destinations: Vec<Destination>) -> Self {
        let mut entries: Vec<Destination> = Vec::with_capacity(destinations.len());
        for dest in destinations {
            if entries.iter().any(|d| d.key == dest.key) {
                tracing::warn!(key = %dest.key, "Duplicate destination key ignored");
                continue;
            }
            entries.push(dest);
        }
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Destination> {
        self.entries.iter().find(|d| d.key == key)
    }

    /// Lookup that only succeeds for destinations that may receive sends.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&Destination> {
        self.get(key).filter(|d| d.is_sendable())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.entries.iter()
    }

    pub fn enabled(&self) -> impl Iterator<Item = &Destination> {
        self.entries.iter().filter(|d| d.enabled)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
