use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

//--------------------------------------------------------------------------------------------------
// Error handling
//--------------------------------------------------------------------------------------------------

// Any errors returned by a handler should confirm to this
pub trait ApiError: Sized {
    fn response_data(&self) -> (StatusCode, &'static str, String);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    code: &'static str,
    message: String,
}

fn error_response<E: ApiError>(err: E) -> Response {
    let (status_code, code, message) = err.response_data();
    (status_code, Json(ErrorResponse { code, message })).into_response()
}

//--------------------------------------------------------------------------------------------------
// Response JSON handling
//--------------------------------------------------------------------------------------------------

pub struct JsonResponse<T: Serialize, E: ApiError>(Result<T, E>);

impl<T: Serialize, E: ApiError> From<Result<T, E>> for JsonResponse<T, E> {
    fn from(r: Result<T, E>) -> Self {
        JsonResponse(r)
    }
}

impl<T: Serialize, E: ApiError> IntoResponse for JsonResponse<T, E> {
    fn into_response(self) -> Response {
        match self.0 {
            Ok(resp) => Json(resp).into_response(),
            Err(err) => error_response(err),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// HTTP 204 handling
//--------------------------------------------------------------------------------------------------

pub struct NoContentResponse<E: ApiError>(Result<(), E>);

impl<E: ApiError> From<Result<(), E>> for NoContentResponse<E> {
    fn from(r: Result<(), E>) -> Self {
        NoContentResponse(r)
    }
}

impl<E: ApiError> IntoResponse for NoContentResponse<E> {
    fn into_response(self) -> Response {
        match self.0 {
            Ok(()) => StatusCode::NO_CONTENT.into_response(),
            Err(err) => error_response(err),
        }
    }
}

//--------------------------------------------------------------------------------------------------
