//! Request extractors.
//!
//! [`CurrentUser`] resolves the `x-user-id` header to a stored user. [`JsonBody`],
//! [`QueryParams`], and [`IdPath`] wrap axum's `Json`, `Query`, and `Path` with their
//! rejections turned into a validation [`Error`], so malformed input gets the same
//! error shape as everything else.

use super::AppState;
use crate::{
    core::user,
    entities,
    errors::{Error, Result},
};
use axum::{
    Json,
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{HeaderMap, request::Parts},
};
use serde::de::DeserializeOwned;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The user making the request. Rejects with 400 when the header is missing or not a
/// number, and 404 when no such user exists.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub entities::user::Model);

/// Like [`CurrentUser`], but the header may be absent.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<entities::user::Model>);

fn header_user_id(headers: &HeaderMap) -> Result<Option<i64>> {
    let Some(value) = headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };

    let text = value
        .to_str()
        .map_err(|_| Error::validation(USER_ID_HEADER, "must be valid text"))?
        .trim();
    if text.is_empty() {
        return Ok(None);
    }

    text.parse()
        .map(Some)
        .map_err(|_| Error::validation(USER_ID_HEADER, format!("'{text}' is not a user id")))
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let user_id = header_user_id(&parts.headers)?
            .ok_or_else(|| Error::validation(USER_ID_HEADER, "User ID is required"))?;
        user::require_user(&state.db, user_id).await.map(Self)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        match header_user_id(&parts.headers)? {
            Some(user_id) => user::require_user(&state.db, user_id)
                .await
                .map(|user| Self(Some(user))),
            None => Ok(Self(None)),
        }
    }
}

/// A JSON request body.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|rejection| Error::validation("body", rejection.body_text()))
    }
}

/// A query string.
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| Error::validation("query", rejection.body_text()))
    }
}

/// The numeric `:id` segment of a route.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        Path::<i64>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| Self(id))
            .map_err(|_| Error::validation("id", "must be a whole number"))
    }
}
