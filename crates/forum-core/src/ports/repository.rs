use async_trait::async_trait;

use crate::domain::{Category, NewComment, PostRow, TopComment};
use crate::error::RepoError;
use crate::query::Fragment;

/// Read side of the feed: executes composed queries and the per-post lookups.
#[async_trait]
pub trait FeedRepository: Send + Sync {
    /// Execute a count query and return its single scalar.
    async fn count(&self, query: &Fragment) -> Result<u64, RepoError>;

    /// Execute a fetch query. The outer error is a failed query; an inner
    /// error is a single row that could not be decoded.
    async fn fetch(&self, query: &Fragment) -> Result<Vec<Result<PostRow, RepoError>>, RepoError>;

    /// Categories attached to a post, in storage order.
    async fn categories_for(&self, post_id: i64) -> Result<Vec<Category>, RepoError>;

    /// The comment with the most likes on a post, if any comment has one.
    async fn top_comment_for(&self, post_id: i64) -> Result<Option<TopComment>, RepoError>;
}

/// Write side of comments.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment and return its generated identifier.
    async fn insert(&self, comment: NewComment) -> Result<i64, RepoError>;
}
