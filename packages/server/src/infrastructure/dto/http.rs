//! HTTP API request and response DTOs for the chat application.

use serde::{Deserialize, Serialize};

/// Body of `POST /check_username`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckUsernameRequest {
    pub username: String,
}

/// Response of `POST /check_username`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckUsernameResponse {
    pub available: bool,
}

/// Member entry for `GET /api/users`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDto {
    pub username: String,
    pub joined_at: String, // RFC 3339, UTC+8
}

/// Query of `GET /proxy`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProxyQuery {
    pub url: String,
}

/// Response of `GET /proxy/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyHealthDto {
    pub status: String,
    pub timestamp: String, // RFC 3339, UTC+8
}
