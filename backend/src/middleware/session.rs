//! Session extractor
//!
//! Builds a `Session` from the request's bearer token. A missing or
//! malformed Authorization header gives an anonymous session, never a
//! rejection.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use shared::session::{MemoryTokenStore, Session};

/// Extractor for the caller's session
/// Use this in handlers that act on behalf of the signed-in farmer
#[derive(Clone, Debug)]
pub struct CurrentSession(pub Session<MemoryTokenStore>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let store = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map(|TypedHeader(auth)| MemoryTokenStore::with_token(auth.token()))
            .unwrap_or_default();

        Ok(CurrentSession(Session::init(store)))
    }
}
