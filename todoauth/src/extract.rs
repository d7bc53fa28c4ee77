use crate::{AuthorizeError, Authorizer, Decision, Principal};
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{async_trait, Json};
use serde::Serialize;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, warn};

//--------------------------------------------------------------------------------------------------
// Trait for Axum states to comply with to provide the authorizer
//--------------------------------------------------------------------------------------------------

pub trait AuthorizerProvider {
    fn authorizer(&self) -> &Authorizer;
}

impl<T: AuthorizerProvider> AuthorizerProvider for Arc<T> {
    fn authorizer(&self) -> &Authorizer {
        self.deref().authorizer()
    }
}

//--------------------------------------------------------------------------------------------------
// Extract Error
//--------------------------------------------------------------------------------------------------

// The reason for a deny stays in the logs; callers only learn whether a credential was sent
pub enum ExtractError {
    NoCredentials,
    AccessDenied,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    code: &'static str,
    message: String,
}

fn error_response_unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            code: "unauthorized",
            message: "Unauthorized".to_string(),
        }),
    )
        .into_response()
}

fn error_response_forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse {
            code: "forbidden",
            message: "Forbidden".to_string(),
        }),
    )
        .into_response()
}

impl IntoResponse for ExtractError {
    fn into_response(self) -> Response {
        match self {
            ExtractError::NoCredentials => error_response_unauthorized(),
            ExtractError::AccessDenied => error_response_forbidden(),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Enforcing the decision
//--------------------------------------------------------------------------------------------------

fn authorize_request<S>(parts: &mut Parts, state: &S) -> Result<Principal, ExtractError>
where
    S: AuthorizerProvider + Send + Sync,
{
    // Check to see if we already authorized this request
    if let Some(principal) = parts.extensions.get::<Principal>() {
        debug!("Request already authorized for {}", principal);
        return Ok(principal.clone());
    }

    let header = match parts.headers.get(AUTHORIZATION) {
        Some(value) => match value.to_str() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Request made with Authorization header with more than visible ASCII characters");
                return Err(ExtractError::AccessDenied);
            }
        },
        None => None,
    };

    match state.authorizer().authorize(header) {
        Decision::Allow(principal) => {
            parts.extensions.insert(principal.clone());
            Ok(principal)
        }
        Decision::Deny(AuthorizeError::MissingHeader) => Err(ExtractError::NoCredentials),
        Decision::Deny(_) => Err(ExtractError::AccessDenied),
    }
}

//--------------------------------------------------------------------------------------------------
// Axum extractor to get the authorized caller
//--------------------------------------------------------------------------------------------------

/// The principal of a request whose bearer token was allowed. Handlers taking this never run for
/// denied requests.
pub struct Caller(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: AuthorizerProvider + Send + Sync,
{
    type Rejection = ExtractError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let principal = authorize_request(parts, state)?;
        Ok(Caller(principal))
    }
}

//--------------------------------------------------------------------------------------------------
