//! Lambda request handling: routing, verification, and the two event flows

pub mod approval;
pub mod handler;
pub mod helpers;
pub mod parsing;
pub mod signature;
pub mod task_events;

// Re-export the main handler for convenience
pub use handler::{function_handler, handle_request};
