use crate::domain::todo::driving_ports::TodoError;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum_macros::FromRequest;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Contains diagnostic information about an API failure
#[derive(Serialize, Debug, ToSchema)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct BasicErrorResponse {
    #[schema(example = "not_found")]
    pub error_code: String,
    #[schema(example = "The requested entity could not be found.")]
    pub error_description: String,
    pub extra_info: Option<String>,
}

impl BasicErrorResponse {
    fn not_found() -> Self {
        BasicErrorResponse {
            error_code: "not_found".into(),
            error_description: "The requested entity could not be found.".into(),
            extra_info: None,
        }
    }

    fn internal_error() -> Self {
        BasicErrorResponse {
            error_code: "internal_error".into(),
            error_description: "Could not access data to complete your request".into(),
            extra_info: None,
        }
    }
}

/// A 400 with no body. The JSON content type is still set so every response from the
/// API looks the same to clients.
fn empty_bad_request() -> Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
    )
        .into_response()
}

/// Response type that wraps validation errors and turns them into an empty 400
pub struct ValidationErrorResponse(ValidationErrors);

impl IntoResponse for ValidationErrorResponse {
    fn into_response(self) -> Response {
        info!("Rejected invalid input: {}", self.0);
        empty_bad_request()
    }
}

impl From<ValidationErrors> for ValidationErrorResponse {
    fn from(value: ValidationErrors) -> Self {
        Self(value)
    }
}

/// Response type that maps domain errors onto HTTP statuses. Store failures never leak
/// their details to the client.
pub struct TodoErrorResponse(TodoError);

impl IntoResponse for TodoErrorResponse {
    fn into_response(self) -> Response {
        match self.0 {
            TodoError::EmptySubject => empty_bad_request(),
            TodoError::NotFound => {
                (StatusCode::NOT_FOUND, Json(BasicErrorResponse::not_found())).into_response()
            }
            TodoError::PortError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(BasicErrorResponse::internal_error()),
            )
                .into_response(),
        }
    }
}

impl From<TodoError> for TodoErrorResponse {
    fn from(value: TodoError) -> Self {
        Self(value)
    }
}

/// Wrapper for [axum::Json] which customizes the error response to use our
/// data structure for API errors
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonErrorResponse))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Response type representing JSON parse errors
pub struct JsonErrorResponse {
    parse_problem: String,
}

impl From<JsonRejection> for JsonErrorResponse {
    fn from(value: JsonRejection) -> Self {
        JsonErrorResponse {
            parse_problem: value.body_text(),
        }
    }
}

impl IntoResponse for JsonErrorResponse {
    fn into_response(self) -> Response {
        info!("Rejected malformed JSON: {}", self.parse_problem);
        (
            StatusCode::BAD_REQUEST,
            axum::Json(BasicErrorResponse {
                error_code: "invalid_json".into(),
                error_description:
                    "The passed request body contained malformed or unreadable JSON.".into(),
                extra_info: Some(self.parse_problem),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_util::deserialize_body;
    use anyhow::anyhow;

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let response = TodoErrorResponse::from(TodoError::NotFound).into_response();
        assert_eq!(StatusCode::NOT_FOUND, response.status());

        let body: BasicErrorResponse = deserialize_body(response.into_body()).await;
        assert_eq!("not_found", body.error_code);
    }

    #[tokio::test]
    async fn port_error_hides_details() {
        let response =
            TodoErrorResponse::from(TodoError::PortError(anyhow!("disk on fire at /var/db")))
                .into_response();
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());

        let body: BasicErrorResponse = deserialize_body(response.into_body()).await;
        assert_eq!("internal_error", body.error_code);
        assert!(!body.error_description.contains("disk on fire"));
        assert!(body.extra_info.is_none());
    }

    #[tokio::test]
    async fn empty_subject_is_an_empty_400() {
        let response = TodoErrorResponse::from(TodoError::EmptySubject).into_response();
        assert_eq!(StatusCode::BAD_REQUEST, response.status());
        assert_eq!(
            Some("application/json"),
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
        );
    }
}
