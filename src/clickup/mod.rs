//! Everything ClickUp-specific: API access, payload models, and the
//! comment/classification logic that reads them.

pub mod classifier;
pub mod client;
pub mod comment_parser;
pub mod models;

pub use classifier::classify_task;
pub use client::{ClickUpClient, TaskApi};
pub use comment_parser::{IMAGE_PLACEHOLDER, ParsedComment, parse_comment};
pub use models::{Comment, Task};
