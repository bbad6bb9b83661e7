//! Application state - shared across all handlers.

use std::sync::Arc;

use async_trait::async_trait;

use forum_core::comments::CommentService;
use forum_core::domain::{Category, NewComment, PostRow, TopComment};
use forum_core::error::RepoError;
use forum_core::feed::FeedService;
use forum_core::ports::{CommentRepository, CooldownStore, FeedRepository};
use forum_core::query::Fragment;
use forum_infra::database::{DatabaseConfig, DatabaseConnections};
use forum_infra::{CooldownConfig, InMemoryCooldownCache};

#[cfg(feature = "postgres")]
use forum_infra::PostgresForumRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub feed: FeedService,
    pub comments: CommentService,
    pub db: Option<Arc<DatabaseConnections>>,
}

/// Stand-in repository for when no database is configured: feeds are empty
/// and comments cannot be stored.
pub struct UnconfiguredRepository;

#[async_trait]
impl FeedRepository for UnconfiguredRepository {
    async fn count(&self, _query: &Fragment) -> Result<u64, RepoError> {
        tracing::warn!("Database not configured - serving an empty feed");
        Ok(0)
    }

    async fn fetch(&self, _query: &Fragment) -> Result<Vec<Result<PostRow, RepoError>>, RepoError> {
        Ok(Vec::new())
    }

    async fn categories_for(&self, _post_id: i64) -> Result<Vec<Category>, RepoError> {
        Ok(Vec::new())
    }

    async fn top_comment_for(&self, _post_id: i64) -> Result<Option<TopComment>, RepoError> {
        Ok(None)
    }
}

#[async_trait]
impl CommentRepository for UnconfiguredRepository {
    async fn insert(&self, _comment: NewComment) -> Result<i64, RepoError> {
        Err(RepoError::Connection("database not configured".to_string()))
    }
}

impl AppState {
    /// Wire services over the given repositories and cooldown store.
    pub fn from_parts<R>(
        repo: Arc<R>,
        cooldown: Arc<dyn CooldownStore>,
        db: Option<Arc<DatabaseConnections>>,
    ) -> Self
    where
        R: FeedRepository + CommentRepository + 'static,
    {
        Self {
            feed: FeedService::new(repo.clone()),
            comments: CommentService::new(repo, cooldown),
            db,
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>, cooldown: CooldownConfig) -> Self {
        // One cooldown map for the whole process
        let cooldown: Arc<dyn CooldownStore> = Arc::new(InMemoryCooldownCache::new(cooldown));

        #[cfg(feature = "postgres")]
        let state = {
            match db_config {
                Some(config) => match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        let conn = Arc::new(connections);
                        let repo = Arc::new(PostgresForumRepository::new(conn.main.clone()));
                        Self::from_parts(repo, cooldown, Some(conn))
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Running without storage.",
                            e
                        );
                        Self::from_parts(Arc::new(UnconfiguredRepository), cooldown, None)
                    }
                },
                None => {
                    tracing::warn!("DATABASE_URL not set. Running without storage.");
                    Self::from_parts(Arc::new(UnconfiguredRepository), cooldown, None)
                }
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - feeds are empty");
            Self::from_parts(Arc::new(UnconfiguredRepository), cooldown, None)
        };

        tracing::info!("Application state initialized");
        state
    }
}
