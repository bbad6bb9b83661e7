//! Comment submission with a per-user cooldown.

mod redirect;
mod reservation;
mod service;


pub use redirect::{post_path, referer_path};
pub use reservation::CooldownReservation;
pub use service::{
    COOLDOWN_NOTICE, CommentService, CommentSubmission, MAX_BODY_CHARS, SubmissionOutcome,
    validate_body,
};
