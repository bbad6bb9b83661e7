use serde::{Deserialize, Serialize};

/// Comment entity as read back with its author's display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub author_name: String,
    pub author_image: Option<String>,
    pub body: String,
    pub created_at: i64,
    pub modified_at: i64,
}

/// The most-liked comment of a post, shown as a preview in the feed.
pub type TopComment = Comment;

/// A comment about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub user_id: i64,
    pub post_id: i64,
    pub body: String,
    pub created_at: i64,
    pub modified_at: i64,
}

impl NewComment {
    /// Create a new comment; both timestamps are set to `now`.
    pub fn new(user_id: i64, post_id: i64, body: String, now: i64) -> Self {
        Self {
            user_id,
            post_id,
            body,
            created_at: now,
            modified_at: now,
        }
    }
}
