use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_core::{DomainError, ValidationErrors};

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(errors) => validation_error(errors),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        DomainError::Unavailable(msg) => {
            tracing::error!("item store unavailable: {msg}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
        }
    }
}

/// 422 with one `{field, message}` entry per violated constraint.
pub fn validation_error(errors: ValidationErrors) -> axum::response::Response {
    tracing::debug!(fields = ?errors.fields(), "rejected input");
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        axum::Json(json!({
            "error": "validation_error",
            "message": errors.to_string(),
            "details": errors,
        })),
    )
        .into_response()
}

/// Malformed JSON (or JSON of the wrong shape) is a validation failure of the
/// body; a missing content type or unreadable body keeps axum's status.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            let mut errors = ValidationErrors::new();
            errors.push("body", rejection.body_text());
            validation_error(errors)
        }
        other => json_error(other.status(), "invalid_request", other.body_text()),
    }
}

pub fn query_rejection_to_response(rejection: QueryRejection) -> axum::response::Response {
    let mut errors = ValidationErrors::new();
    errors.push("query", rejection.body_text());
    validation_error(errors)
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(res: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unavailable_store_maps_to_internal_error() {
        let res = domain_error_to_response(DomainError::unavailable("item store lock poisoned"));
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(res).await;
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "item store lock poisoned");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn not_found_maps_to_404_envelope() {
        let res = domain_error_to_response(DomainError::NotFound);
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(res).await["message"], "item not found");
    }
}
