//! Executors drive a single HTTP exchange for a prepared request body.

pub mod chat;

pub use chat::{ChatExecutor, HttpChatExecutor};
