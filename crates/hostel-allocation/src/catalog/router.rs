use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use super::domain::{HostelForm, HostelId};
use crate::context::AppContext;
use crate::error::AppError;
use crate::http;

pub fn catalog_router() -> Router<AppContext> {
    Router::new()
        .route(
            "/api/v1/hostels",
            post(create_hostel_handler).get(list_hostels_handler),
        )
        .route("/api/v1/hostels/:hostel_id", get(fetch_hostel_handler))
}

pub(crate) async fn create_hostel_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Json(form): Json<HostelForm>,
) -> Result<Response, AppError> {
    context.identity.require_admin(&headers)?;
    let hostel = context.catalog.create(form)?;
    Ok(http::created("hostel created", json!({ "hostel": hostel })))
}

pub(crate) async fn list_hostels_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    context.identity.authenticate(&headers)?;
    let hostels = context.catalog.list()?;
    Ok(http::ok("hostels listed", json!({ "hostels": hostels })))
}

pub(crate) async fn fetch_hostel_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Path(hostel_id): Path<String>,
) -> Result<Response, AppError> {
    context.identity.authenticate(&headers)?;
    let hostel = context
        .catalog
        .fetch(&HostelId(hostel_id))?
        .ok_or_else(|| AppError::not_found("hostel"))?;
    Ok(http::ok("hostel", json!({ "hostel": hostel })))
}
