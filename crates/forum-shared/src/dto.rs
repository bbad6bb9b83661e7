//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Query parameters of a feed request.
///
/// `page` stays a raw string so that malformed values reach validation
/// instead of failing extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub page: Option<String>,
}

/// Comment submission form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub post_id: String,
    #[serde(default)]
    pub body: String,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}
