//! PostgreSQL repository executing composed fragments as raw statements.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbBackend, DbConn, DbErr, FromQueryResult, Statement, Value};

use forum_core::domain::{Category, Comment, NewComment, PostRow, TopComment};
use forum_core::error::RepoError;
use forum_core::ports::{CommentRepository, FeedRepository};
use forum_core::query::{Fragment, Placeholder, SqlValue};

const CATEGORIES_SQL: &str = "SELECT C.id, C.name FROM posts_categories PC \
JOIN categories C ON PC.category_id = C.id WHERE PC.post_id = ";

const TOP_COMMENT_SQL: &str = "SELECT C.id, C.post_id, C.user_id, C.body, C.created_at, \
C.modified_at, U.username AS author_name, U.image AS author_image \
FROM (SELECT comment_id, COUNT(*) AS nb_likes FROM likes \
WHERE comment_id IS NOT NULL AND is_like GROUP BY comment_id) AS L \
JOIN comments C ON L.comment_id = C.id AND C.post_id = ";

const TOP_COMMENT_TAIL: &str = " JOIN users U ON C.user_id = U.id ORDER BY L.nb_likes DESC LIMIT 1";

const INSERT_COMMENT_SQL: &str =
    "INSERT INTO comments (user_id, post_id, body, created_at, modified_at) VALUES (";

/// Forum repository over a SeaORM connection.
pub struct PostgresForumRepository {
    pub(crate) db: DbConn,
}

impl PostgresForumRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn to_value(value: SqlValue) -> Value {
    match value {
        SqlValue::BigInt(v) => Value::from(v),
        SqlValue::Text(v) => Value::from(v),
    }
}

pub(crate) fn statement(query: &Fragment) -> Statement {
    let (sql, values) = query.clone().build(Placeholder::Dollar);
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values.into_iter().map(to_value))
}

fn db_error(e: DbErr) -> RepoError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

fn decode_error(e: DbErr) -> RepoError {
    RepoError::Decode(e.to_string())
}

#[derive(Debug, FromQueryResult)]
struct PostRecord {
    id: i64,
    user_id: i64,
    title: String,
    body: String,
    image: Option<String>,
    created_at: i64,
    modified_at: i64,
    author_name: String,
    author_image: Option<String>,
    likes: i64,
    dislikes: i64,
    viewer_reaction: String,
}

impl TryFrom<PostRecord> for PostRow {
    type Error = RepoError;

    fn try_from(record: PostRecord) -> Result<Self, Self::Error> {
        let viewer_reaction = record
            .viewer_reaction
            .parse()
            .map_err(|e| RepoError::Decode(format!("post {}: {}", record.id, e)))?;

        Ok(Self {
            id: record.id,
            user_id: record.user_id,
            title: record.title,
            body: record.body,
            image: record.image,
            created_at: record.created_at,
            modified_at: record.modified_at,
            author_name: record.author_name,
            author_image: record.author_image,
            likes: record.likes,
            dislikes: record.dislikes,
            viewer_reaction,
        })
    }
}

#[derive(Debug, FromQueryResult)]
struct CategoryRecord {
    id: i64,
    name: String,
}

#[derive(Debug, FromQueryResult)]
struct CommentRecord {
    id: i64,
    post_id: i64,
    user_id: i64,
    body: String,
    created_at: i64,
    modified_at: i64,
    author_name: String,
    author_image: Option<String>,
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            post_id: record.post_id,
            user_id: record.user_id,
            author_name: record.author_name,
            author_image: record.author_image,
            body: record.body,
            created_at: record.created_at,
            modified_at: record.modified_at,
        }
    }
}

#[async_trait]
impl FeedRepository for PostgresForumRepository {
    async fn count(&self, query: &Fragment) -> Result<u64, RepoError> {
        let row = self
            .db
            .query_one(statement(query))
            .await
            .map_err(db_error)?
            .ok_or_else(|| RepoError::Decode("count query returned no row".to_string()))?;

        let total: i64 = row.try_get("", "total").map_err(decode_error)?;
        u64::try_from(total).map_err(|_| RepoError::Decode(format!("negative count {total}")))
    }

    async fn fetch(&self, query: &Fragment) -> Result<Vec<Result<PostRow, RepoError>>, RepoError> {
        let rows = self
            .db
            .query_all(statement(query))
            .await
            .map_err(db_error)?;

        tracing::debug!(rows = rows.len(), "Fetched feed rows");

        Ok(rows
            .iter()
            .map(|row| {
                PostRecord::from_query_result(row, "")
                    .map_err(decode_error)
                    .and_then(PostRow::try_from)
            })
            .collect())
    }

    async fn categories_for(&self, post_id: i64) -> Result<Vec<Category>, RepoError> {
        let query = Fragment::new(CATEGORIES_SQL).bind(post_id);
        let rows = self
            .db
            .query_all(statement(&query))
            .await
            .map_err(db_error)?;

        let mut categories = Vec::with_capacity(rows.len());
        for row in &rows {
            match CategoryRecord::from_query_result(row, "") {
                Ok(record) => categories.push(Category {
                    id: record.id,
                    name: record.name,
                }),
                Err(e) => tracing::warn!(post_id, error = %e, "Skipping undecodable category"),
            }
        }
        Ok(categories)
    }

    async fn top_comment_for(&self, post_id: i64) -> Result<Option<TopComment>, RepoError> {
        let query = Fragment::new(TOP_COMMENT_SQL)
            .bind(post_id)
            .push(TOP_COMMENT_TAIL);

        let Some(row) = self
            .db
            .query_one(statement(&query))
            .await
            .map_err(db_error)?
        else {
            return Ok(None);
        };

        let record = CommentRecord::from_query_result(&row, "").map_err(decode_error)?;
        Ok(Some(record.into()))
    }
}

#[async_trait]
impl CommentRepository for PostgresForumRepository {
    async fn insert(&self, comment: NewComment) -> Result<i64, RepoError> {
        let query = Fragment::new(INSERT_COMMENT_SQL)
            .bind(comment.user_id)
            .push(", ")
            .bind(comment.post_id)
            .push(", ")
            .bind(comment.body)
            .push(", ")
            .bind(comment.created_at)
            .push(", ")
            .bind(comment.modified_at)
            .push(") RETURNING id");

        let row = self
            .db
            .query_one(statement(&query))
            .await
            .map_err(|e| {
                tracing::error!(post_id = comment.post_id, error = %e, "Failed to insert comment");
                db_error(e)
            })?
            .ok_or_else(|| RepoError::Query("insert returned no id".to_string()))?;

        let id: i64 = row.try_get("", "id").map_err(decode_error)?;
        tracing::info!(comment_id = id, post_id = comment.post_id, user_id = comment.user_id, "Comment stored");
        Ok(id)
    }
}
