//! Post feeds.

use actix_web::{HttpRequest, HttpResponse, web};
use forum_core::feed::FeedRequest;
use forum_core::query::Fragment;
use forum_shared::ApiResponse;
use forum_shared::dto::FeedQuery;

use crate::middleware::error::AppResult;
use crate::middleware::identity::OptionalIdentity;
use crate::state::AppState;

const HOME_FEED: &str = "FROM posts P JOIN users U ON P.user_id = U.id";

const CATEGORY_FEED: &str = "FROM posts P JOIN users U ON P.user_id = U.id \
JOIN posts_categories PC ON PC.post_id = P.id WHERE PC.category_id = ?";

/// GET / - every post.
pub async fn home(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<FeedQuery>,
    viewer: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let fragment = Fragment::new(HOME_FEED);
    render(&state, &req, query.page.as_deref(), &fragment, viewer).await
}

/// GET /categories/{id} - posts filed under one category.
pub async fn category(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<FeedQuery>,
    viewer: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let fragment = Fragment::from_template(CATEGORY_FEED, vec![path.into_inner().into()])?;
    render(&state, &req, query.page.as_deref(), &fragment, viewer).await
}

async fn render(
    state: &AppState,
    req: &HttpRequest,
    page: Option<&str>,
    fragment: &Fragment,
    viewer: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let request = FeedRequest {
        page,
        base_path: req.path(),
        query_string: req.query_string(),
        fragment,
        viewer: viewer.user_id(),
    };

    let page = state
        .feed
        .load_page(request, chrono::Utc::now().timestamp())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}
