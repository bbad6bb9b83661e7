use std::sync::Arc;

use tracing::instrument;

use crate::domain::{FeedPage, Post};
use crate::error::DomainError;
use crate::ports::FeedRepository;
use crate::query::{Fragment, PAGE_SIZE, compose_count, compose_fetch};

use super::{PostEnricher, humanize_age, page_offset, pagination_state, parse_page};

/// One feed request as seen by [`FeedService::load_page`].
#[derive(Debug, Clone, Copy)]
pub struct FeedRequest<'a> {
    /// Raw `page` query parameter, if present.
    pub page: Option<&'a str>,
    /// Request path the navigation links point at.
    pub base_path: &'a str,
    /// Raw query string of the request, without the leading `?`.
    pub query_string: &'a str,
    /// Half-query selecting the posts of this feed.
    pub fragment: &'a Fragment,
    /// The requesting user, if signed in.
    pub viewer: Option<i64>,
}

/// Loads paginated, enriched feeds for arbitrary half-queries.
#[derive(Clone)]
pub struct FeedService {
    repo: Arc<dyn FeedRepository>,
    enricher: PostEnricher,
}

impl FeedService {
    pub fn new(repo: Arc<dyn FeedRepository>) -> Self {
        let enricher = PostEnricher::new(repo.clone());
        Self { repo, enricher }
    }

    /// Load one feed page. `now` is the current Unix time in seconds.
    #[instrument(skip(self, request), fields(page = request.page, path = request.base_path))]
    pub async fn load_page(&self, request: FeedRequest<'_>, now: i64) -> Result<FeedPage, DomainError> {
        let page = parse_page(request.page)?;
        let offset = page_offset(page)?;

        let total = self.repo.count(&compose_count(request.fragment)).await?;
        let pagination = pagination_state(page, total, request.base_path, request.query_string);

        let query = compose_fetch(request.fragment, request.viewer, offset, PAGE_SIZE);
        let rows = self.repo.fetch(&query).await?;

        let mut posts: Vec<Post> = Vec::with_capacity(rows.len());
        for row in rows {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to decode post row, skipping");
                    continue;
                }
            };
            let age = humanize_age(row.created_at, now);
            posts.push(self.enricher.enrich(row, age).await);
        }

        tracing::debug!(total, returned = posts.len(), "Feed page loaded");

        Ok(FeedPage {
            posts,
            pagination,
            total,
        })
    }
}
