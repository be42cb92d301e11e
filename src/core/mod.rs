//! Configuration and the destination table shared by every handler.

pub mod config;
pub mod registry;
