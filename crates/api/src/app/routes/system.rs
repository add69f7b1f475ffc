use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::app::dto;

pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, Json(dto::welcome_json()))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(dto::health_json()))
}
