//! Caller identity extractors.
//!
//! Sessions are resolved upstream; the resolved user id arrives in the
//! `X-User-Id` header and is trusted as-is.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};

use super::error::AppError;

/// Header carrying the resolved user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Signed-in user identity extractor.
///
/// Use this in handlers that need a known user:
/// ```ignore
/// async fn create(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: i64,
}

impl Identity {
    fn from_headers(req: &HttpRequest) -> Option<Self> {
        let user_id = req
            .headers()
            .get(USER_ID_HEADER)?
            .to_str()
            .ok()?
            .trim()
            .parse()
            .ok()?;
        Some(Self { user_id })
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req).ok_or(AppError::Unauthorized))
    }
}

/// Optional identity extractor - anonymous visitors yield `None`.
pub struct OptionalIdentity(pub Option<Identity>);

impl OptionalIdentity {
    pub fn user_id(&self) -> Option<i64> {
        self.0.map(|identity| identity.user_id)
    }
}

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(Identity::from_headers(req))))
    }
}
