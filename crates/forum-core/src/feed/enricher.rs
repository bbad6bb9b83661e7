use std::sync::Arc;

use crate::domain::{Category, Post, PostRow, TopComment};
use crate::ports::FeedRepository;

/// Attaches categories and the top comment to fetched posts.
///
/// Lookup failures are logged and degrade to an empty category list or a
/// missing top comment; they never fail the page.
#[derive(Clone)]
pub struct PostEnricher {
    repo: Arc<dyn FeedRepository>,
}

impl PostEnricher {
    pub fn new(repo: Arc<dyn FeedRepository>) -> Self {
        Self { repo }
    }

    pub async fn enrich(&self, row: PostRow, age: String) -> Post {
        let categories = self.categories(row.id).await;
        let top_comment = self.top_comment(row.id).await;
        Post::assemble(row, age, categories, top_comment)
    }

    async fn categories(&self, post_id: i64) -> Vec<Category> {
        match self.repo.categories_for(post_id).await {
            Ok(categories) => categories,
            Err(e) => {
                tracing::warn!(post_id, error = %e, "Failed to load post categories");
                Vec::new()
            }
        }
    }

    async fn top_comment(&self, post_id: i64) -> Option<TopComment> {
        match self.repo.top_comment_for(post_id).await {
            Ok(comment) => comment,
            Err(e) => {
                tracing::warn!(post_id, error = %e, "Failed to load top comment");
                None
            }
        }
    }
}
