//! Single-room chat relay.
//!
//! Clients connect over WebSocket, claim a unique name and chat. Messages that
//! start with a configured command prefix are routed to a weather lookup, a
//! video-link rewriter or a scripted chatbot.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::{ServerOptions, run};
