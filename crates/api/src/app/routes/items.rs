use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use serde_json::Value;

use stockroom_core::{DomainError, ItemId};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/search", get(search_items))
        .route("/items/search/", get(search_items))
        .route(
            "/items/:item_id",
            get(get_item).put(replace_item).patch(update_item).delete(delete_item),
        )
}

fn parse_item_id(raw: &str) -> Result<ItemId, axum::response::Response> {
    raw.parse::<ItemId>()
        .map_err(errors::domain_error_to_response)
}

fn item_response<T: serde::Serialize>(status: StatusCode, result: Result<T, DomainError>) -> axum::response::Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_items(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    item_response(StatusCode::OK, services.items().list())
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    item_response(StatusCode::OK, services.items().get(&id))
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let draft = match dto::draft_from_json(&body) {
        Ok(v) => v,
        Err(e) => return errors::validation_error(e),
    };
    item_response(StatusCode::CREATED, services.items().create(draft))
}

pub async fn replace_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let draft = match dto::draft_from_json(&body) {
        Ok(v) => v,
        Err(e) => return errors::validation_error(e),
    };
    item_response(StatusCode::OK, services.items().replace(&id, draft))
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let patch = match dto::patch_from_json(&body) {
        Ok(v) => v,
        Err(e) => return errors::validation_error(e),
    };
    item_response(StatusCode::OK, services.items().update(&id, patch))
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    item_response(StatusCode::OK, services.items().delete(&id).map(dto::deleted_json))
}

pub async fn search_items(
    Extension(services): Extension<Arc<AppServices>>,
    params: Result<Query<dto::SearchParams>, QueryRejection>,
) -> axum::response::Response {
    let Query(params) = match params {
        Ok(v) => v,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let filter = match params.into_filter() {
        Ok(v) => v,
        Err(e) => return errors::validation_error(e),
    };
    item_response(StatusCode::OK, services.items().search(&filter))
}
