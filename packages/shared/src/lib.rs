//! Shared utilities for Chaguan.
//!
//! Logger initialisation and the server clock used by the chat relay.

pub mod logger;
pub mod time;
