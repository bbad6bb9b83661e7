use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{Category, Comment, PostRow, Reaction, TopComment};
use crate::error::{DomainError, RepoError};
use crate::ports::FeedRepository;
use crate::query::{Fragment, Placeholder, SqlValue};

use super::{FeedRequest, FeedService};

const NOW: i64 = 1_700_000_000;

#[derive(Default)]
struct FakeFeedRepository {
    total: u64,
    rows: Vec<Result<PostRow, RepoError>>,
    categories: HashMap<i64, Vec<Category>>,
    top_comments: HashMap<i64, TopComment>,
    failing_categories: Vec<i64>,
    failing_top_comments: Vec<i64>,
    executed: Mutex<Vec<(String, Vec<SqlValue>)>>,
}

impl FakeFeedRepository {
    fn record(&self, query: &Fragment) {
        let (sql, values) = query.clone().build(Placeholder::Dollar);
        self.executed.lock().unwrap().push((sql, values));
    }

    fn executed(&self) -> Vec<(String, Vec<SqlValue>)> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedRepository for FakeFeedRepository {
    async fn count(&self, query: &Fragment) -> Result<u64, RepoError> {
        self.record(query);
        Ok(self.total)
    }

    async fn fetch(&self, query: &Fragment) -> Result<Vec<Result<PostRow, RepoError>>, RepoError> {
        self.record(query);
        Ok(self
            .rows
            .iter()
            .map(|row| match row {
                Ok(row) => Ok(row.clone()),
                Err(e) => Err(RepoError::Decode(e.to_string())),
            })
            .collect())
    }

    async fn categories_for(&self, post_id: i64) -> Result<Vec<Category>, RepoError> {
        if self.failing_categories.contains(&post_id) {
            return Err(RepoError::Query("categories table missing".to_string()));
        }
        Ok(self.categories.get(&post_id).cloned().unwrap_or_default())
    }

    async fn top_comment_for(&self, post_id: i64) -> Result<Option<TopComment>, RepoError> {
        if self.failing_top_comments.contains(&post_id) {
            return Err(RepoError::Query("likes table missing".to_string()));
        }
        Ok(self.top_comments.get(&post_id).cloned())
    }
}

fn row(id: i64, created_at: i64) -> PostRow {
    PostRow {
        id,
        user_id: 1,
        title: format!("post {id}"),
        body: "body".to_string(),
        image: None,
        created_at,
        modified_at: created_at,
        author_name: "alice".to_string(),
        author_image: None,
        likes: 2,
        dislikes: 1,
        viewer_reaction: Reaction::Like,
    }
}

fn comment(id: i64, post_id: i64) -> Comment {
    Comment {
        id,
        post_id,
        user_id: 2,
        author_name: "bob".to_string(),
        author_image: Some("bob.png".to_string()),
        body: "first!".to_string(),
        created_at: NOW,
        modified_at: NOW,
    }
}

fn home() -> Fragment {
    Fragment::new("FROM posts P JOIN users U ON P.user_id = U.id")
}

fn request<'a>(page: Option<&'a str>, fragment: &'a Fragment) -> FeedRequest<'a> {
    FeedRequest {
        page,
        base_path: "/",
        query_string: "",
        fragment,
        viewer: Some(7),
    }
}

#[tokio::test]
async fn test_page_three_of_twenty_five() {
    let repo = Arc::new(FakeFeedRepository {
        total: 25,
        rows: (1..=5).map(|id| Ok(row(id, NOW - 120))).collect(),
        ..Default::default()
    });
    let service = FeedService::new(repo.clone());
    let fragment = home();

    let page = service
        .load_page(request(Some("3"), &fragment), NOW)
        .await
        .unwrap();

    assert_eq!(page.total, 25);
    assert_eq!(page.posts.len(), 5);
    assert_eq!(page.pagination.current, 3);
    assert_eq!(page.pagination.last, "/?page=3");
    assert_eq!(page.pagination.previous.as_deref(), Some("/?page=2"));
    assert!(!page.pagination.has_more);

    let executed = repo.executed();
    assert_eq!(executed.len(), 2);
    assert!(executed[0].0.starts_with("SELECT COUNT(*)"));
    assert!(executed[0].1.is_empty());
    assert_eq!(executed[1].1, vec![SqlValue::from(7i64), SqlValue::from(20i64)]);
}

#[tokio::test]
async fn test_page_zero_runs_no_query() {
    let repo = Arc::new(FakeFeedRepository::default());
    let service = FeedService::new(repo.clone());
    let fragment = home();

    let result = service.load_page(request(Some("0"), &fragment), NOW).await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert!(repo.executed().is_empty());
}

#[tokio::test]
async fn test_fragment_binds_sit_between_viewer_and_offset() {
    let repo = Arc::new(FakeFeedRepository::default());
    let service = FeedService::new(repo.clone());
    let fragment = Fragment::new(
        "FROM posts P JOIN users U ON P.user_id = U.id \
         JOIN posts_categories PC ON PC.post_id = P.id WHERE PC.category_id = ",
    )
    .bind(4i64);

    service
        .load_page(request(None, &fragment), NOW)
        .await
        .unwrap();

    let executed = repo.executed();
    assert_eq!(executed[0].1, vec![SqlValue::from(4i64)]);
    assert_eq!(
        executed[1].1,
        vec![SqlValue::from(7i64), SqlValue::from(4i64), SqlValue::from(0i64)]
    );
}

#[tokio::test]
async fn test_undecodable_row_is_skipped() {
    let repo = Arc::new(FakeFeedRepository {
        total: 3,
        rows: vec![
            Ok(row(1, NOW - 30)),
            Err(RepoError::Decode("bad title".to_string())),
            Ok(row(3, NOW - 7_200)),
        ],
        ..Default::default()
    });
    let service = FeedService::new(repo);
    let fragment = home();

    let page = service.load_page(request(None, &fragment), NOW).await.unwrap();

    let ids: Vec<i64> = page.posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(page.posts[0].age, "30 seconds");
    assert_eq!(page.posts[1].age, "2 hours");
}

#[tokio::test]
async fn test_enrichment_attaches_categories_and_top_comment() {
    let repo = Arc::new(FakeFeedRepository {
        total: 2,
        rows: vec![Ok(row(1, NOW)), Ok(row(2, NOW))],
        categories: HashMap::from([(
            1,
            vec![
                Category { id: 3, name: "rust".to_string() },
                Category { id: 1, name: "news".to_string() },
            ],
        )]),
        top_comments: HashMap::from([(1, comment(11, 1))]),
        ..Default::default()
    });
    let service = FeedService::new(repo);
    let fragment = home();

    let page = service.load_page(request(None, &fragment), NOW).await.unwrap();

    let first = &page.posts[0];
    let names: Vec<&str> = first.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["rust", "news"]);
    assert_eq!(first.top_comment.as_ref().map(|c| c.id), Some(11));
    assert_eq!(first.viewer_reaction, Reaction::Like);

    let second = &page.posts[1];
    assert!(second.categories.is_empty());
    assert!(second.top_comment.is_none());
}

#[tokio::test]
async fn test_enrichment_failures_degrade() {
    let repo = Arc::new(FakeFeedRepository {
        total: 1,
        rows: vec![Ok(row(1, NOW))],
        top_comments: HashMap::from([(1, comment(11, 1))]),
        failing_categories: vec![1],
        failing_top_comments: vec![1],
        ..Default::default()
    });
    let service = FeedService::new(repo);
    let fragment = home();

    let page = service.load_page(request(None, &fragment), NOW).await.unwrap();

    assert_eq!(page.posts.len(), 1);
    assert!(page.posts[0].categories.is_empty());
    assert!(page.posts[0].top_comment.is_none());
}

#[tokio::test]
async fn test_empty_feed() {
    let repo = Arc::new(FakeFeedRepository::default());
    let service = FeedService::new(repo);
    let fragment = home();

    let page = service.load_page(request(None, &fragment), NOW).await.unwrap();

    assert!(page.posts.is_empty());
    assert_eq!(page.pagination.previous, None);
    assert_eq!(page.pagination.last, "/?page=0");
    assert!(!page.pagination.has_more);
}
