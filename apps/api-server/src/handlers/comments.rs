//! Comment submission.

use actix_web::cookie::{Cookie, time::Duration};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use forum_core::comments::{CommentSubmission, SubmissionOutcome, referer_path};
use forum_shared::dto::CommentForm;

use crate::middleware::error::AppResult;
use crate::middleware::identity::Identity;
use crate::state::AppState;

/// Cookie carrying a one-shot error notice to the next page view.
pub const NOTICE_COOKIE: &str = "error";

/// POST /comments
pub async fn create(
    state: web::Data<AppState>,
    req: HttpRequest,
    identity: Identity,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let submission = CommentSubmission {
        user_id: identity.user_id,
        post_id: form.post_id,
        body: form.body,
    };

    let outcome = state
        .comments
        .submit(submission, chrono::Utc::now().timestamp())
        .await?;

    let response = match outcome {
        SubmissionOutcome::Accepted { redirect, .. } => HttpResponse::Found()
            .insert_header((header::LOCATION, redirect))
            .finish(),
        SubmissionOutcome::CooldownBlocked { redirect, notice } => {
            let referer = req
                .headers()
                .get(header::REFERER)
                .and_then(|v| v.to_str().ok());
            let cookie = Cookie::build(NOTICE_COOKIE, notice)
                .path(referer_path(referer))
                .max_age(Duration::seconds(1))
                .http_only(true)
                .finish();

            HttpResponse::Found()
                .insert_header((header::LOCATION, redirect))
                .cookie(cookie)
                .finish()
        }
    };

    Ok(response)
}
