//! All Telegram-specific functionality

pub mod client;
pub mod keyboard;
pub mod message_builder;
pub mod models;
pub mod notifier;

pub use client::{BotApi, TelegramClient};
pub use notifier::{Notifier, Target};
