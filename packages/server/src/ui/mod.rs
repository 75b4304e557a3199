//! UI layer: the axum application serving WebSocket and HTTP endpoints.

mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{ServerError, ServerOptions, build_router, run};
