//! Request extractors whose rejections are [`AppError`]s.
//!
//! [`ValidatedJson`] parses a JSON body and runs `validator` rules.
//! [`ValidatedPath`] parses path parameters such as resource ids. Every
//! rejection is a 400 with a JSON body naming the problem.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use shopfront_core::AppError;

fn collect_messages(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => out.extend(errs.iter().map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{path} is invalid"))
            })),
            ValidationErrorsKind::Struct(nested) => collect_messages(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(&format!("{path}[{index}]"), nested, out);
                }
            }
        }
    }
}

pub fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages("", errors, &mut messages);
    messages.join(", ")
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request("Missing 'Content-Type: application/json' header");
    }

    let error_msg = rejection.body_text();

    if let Some(field) = error_msg
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
    {
        return AppError::bad_request(format!("{field} is required"));
    }

    if error_msg.contains("invalid type") {
        return AppError::bad_request("Invalid field type in request");
    }

    if error_msg.contains("unknown variant") {
        return AppError::bad_request("Invalid value in request");
    }

    AppError::bad_request("Invalid request body")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value
            .validate()
            .map_err(|errors| AppError::bad_request(format_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

fn path_rejection_to_error(rejection: PathRejection) -> AppError {
    match rejection {
        PathRejection::FailedToDeserializePathParams(_) => {
            AppError::bad_request("Invalid path parameter")
        }
        other => AppError::internal_error(other.body_text()),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(path_rejection_to_error)?;
        Ok(ValidatedPath(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Line {
        #[validate(range(min = 1, message = "quantity must be positive"))]
        quantity: i32,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 3, message = "name must be at least 3 characters"))]
        name: String,
        #[validate(nested)]
        #[serde(default)]
        lines: Vec<Line>,
    }

    async fn extract(content_type: Option<&str>, body: &str) -> Result<Payload, AppError> {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        let req = builder.body(Body::from(body.to_string())).unwrap();
        ValidatedJson::<Payload>::from_request(req, &())
            .await
            .map(|ValidatedJson(p)| p)
    }

    #[tokio::test]
    async fn test_valid_body() {
        let payload = extract(Some("application/json"), r#"{"name":"mug"}"#)
            .await
            .unwrap();
        assert_eq!(payload.name, "mug");
    }

    #[tokio::test]
    async fn test_missing_field_named() {
        let err = extract(Some("application/json"), "{}").await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), "name is required");
    }

    #[tokio::test]
    async fn test_wrong_type() {
        let err = extract(Some("application/json"), r#"{"name":5}"#)
            .await
            .unwrap_err();
        assert_eq!(err.error.to_string(), "Invalid field type in request");
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let err = extract(Some("application/json"), "{not json")
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let err = extract(None, r#"{"name":"mug"}"#).await.unwrap_err();
        assert!(err.error.to_string().contains("Content-Type"));
    }

    #[tokio::test]
    async fn test_validation_failure_is_400_with_message() {
        let err = extract(Some("application/json"), r#"{"name":"x"}"#)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), "name must be at least 3 characters");
    }

    #[tokio::test]
    async fn test_nested_messages_collected() {
        let err = extract(
            Some("application/json"),
            r#"{"name":"mug","lines":[{"quantity":1},{"quantity":0}]}"#,
        )
        .await
        .unwrap_err();
        assert_eq!(err.error.to_string(), "quantity must be positive");
    }

    async fn get_thing(uri: &str) -> (StatusCode, String) {
        use axum::{Router, routing::get};
        use tower::ServiceExt;

        let app = Router::new().route(
            "/things/{id}",
            get(|ValidatedPath(id): ValidatedPath<uuid::Uuid>| async move { id.to_string() }),
        );
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_path_id_parsed() {
        let id = uuid::Uuid::new_v4();
        let (status, body) = get_thing(&format!("/things/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, id.to_string());
    }

    #[tokio::test]
    async fn test_bad_path_id_is_json_400() {
        let (status, body) = get_thing("/things/not-a-uuid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"], "Invalid path parameter");
    }
}
