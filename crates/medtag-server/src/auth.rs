//! Request authentication context.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Identity attached to a request.
///
/// The mutation endpoints (label CRUD, image upload/delete, association)
/// accept no credential or token, so every request resolves to
/// [`AuthContext::Anonymous`]. Taking the context as an extractor keeps
/// that surface visible in each handler signature instead of implied by a
/// missing check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthContext {
    Anonymous,
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(AuthContext::Anonymous)
    }
}
