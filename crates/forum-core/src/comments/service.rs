use std::sync::Arc;

use tracing::instrument;

use crate::domain::NewComment;
use crate::error::DomainError;
use crate::ports::{CommentRepository, CooldownStore};

use super::{CooldownReservation, post_path};

/// Longest accepted comment body, in characters.
pub const MAX_BODY_CHARS: usize = 5000;

/// Notice shown to a user who comments again while on cooldown.
pub const COOLDOWN_NOTICE: &str = "You are on cooldown! Wait for a bit and try again ^_^.";

/// A comment as submitted by a signed-in user.
#[derive(Debug, Clone)]
pub struct CommentSubmission {
    pub user_id: i64,
    /// Raw `post_id` form field.
    pub post_id: String,
    pub body: String,
}

/// How an accepted request ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The comment was stored.
    Accepted { comment_id: i64, redirect: String },
    /// The user is on cooldown; nothing was stored.
    CooldownBlocked {
        redirect: String,
        notice: &'static str,
    },
}

/// Check that a comment body is between 1 and [`MAX_BODY_CHARS`] characters.
pub fn validate_body(body: &str) -> Result<(), DomainError> {
    let len = body.chars().count();
    if !(1..=MAX_BODY_CHARS).contains(&len) {
        return Err(DomainError::validation(format!(
            "comment body must be between 1 and {MAX_BODY_CHARS} characters, got {len}"
        )));
    }
    Ok(())
}

/// Validates, rate-limits and stores comments.
#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    cooldown: Arc<dyn CooldownStore>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, cooldown: Arc<dyn CooldownStore>) -> Self {
        Self { comments, cooldown }
    }

    /// Handle one submission. `now` is the current Unix time in seconds.
    ///
    /// The cooldown entry is only written after the insert succeeds.
    #[instrument(skip(self, submission), fields(user_id = submission.user_id, post_id = %submission.post_id))]
    pub async fn submit(
        &self,
        submission: CommentSubmission,
        now: i64,
    ) -> Result<SubmissionOutcome, DomainError> {
        let redirect = post_path(&submission.post_id);

        let Some(reservation) =
            CooldownReservation::acquire(self.cooldown.clone(), submission.user_id, now)
        else {
            tracing::info!("Comment rejected, user on cooldown");
            return Ok(SubmissionOutcome::CooldownBlocked {
                redirect,
                notice: COOLDOWN_NOTICE,
            });
        };

        validate_body(&submission.body)?;
        let post_id: i64 = submission
            .post_id
            .trim()
            .parse()
            .map_err(|_| DomainError::validation(format!("invalid post id: {:?}", submission.post_id)))?;

        let comment = NewComment::new(submission.user_id, post_id, submission.body, now);
        let comment_id = self.comments.insert(comment).await?;

        reservation.commit(now);
        tracing::info!(comment_id, "Comment created");

        Ok(SubmissionOutcome::Accepted {
            comment_id,
            redirect,
        })
    }
}
