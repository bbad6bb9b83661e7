use serde::{Deserialize, Serialize};

use super::Post;

/// Navigation links for one feed page. Derived per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub current: u64,
    /// `None` on page 1: there is no previous page.
    pub previous: Option<String>,
    pub next: String,
    pub last: String,
    /// True when the current page is not the computed last page.
    pub has_more: bool,
}

/// A page-ready feed result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub pagination: PaginationState,
    pub total: u64,
}
