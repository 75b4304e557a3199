//! Handler modules for HTTP, WebSocket and proxy endpoints.

pub mod http;
pub mod proxy;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{check_username, health_check, list_users};

// Re-export proxy handlers
pub use proxy::{proxy_health, proxy_stream};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
