use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::domain::{RoomDraft, RoomId, RoomView};
use super::repository::RoomFilter;
use crate::catalog::HostelId;
use crate::context::AppContext;
use crate::error::AppError;
use crate::http;

pub fn rooms_router() -> Router<AppContext> {
    Router::new()
        .route(
            "/api/v1/rooms",
            post(create_room_handler).get(list_rooms_handler),
        )
        .route(
            "/api/v1/rooms/:room_id",
            axum::routing::delete(delete_room_handler),
        )
        .route(
            "/api/v1/rooms/:room_id/deactivate",
            post(deactivate_room_handler),
        )
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RoomListQuery {
    pub(crate) hostel: Option<String>,
    #[serde(default)]
    pub(crate) available: bool,
}

pub(crate) async fn create_room_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Json(draft): Json<RoomDraft>,
) -> Result<Response, AppError> {
    context.identity.require_admin(&headers)?;
    let room = context.rooms.create(draft)?;
    Ok(http::created(
        "room created",
        json!({ "room": RoomView::from(&room) }),
    ))
}

pub(crate) async fn list_rooms_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Query(query): Query<RoomListQuery>,
) -> Result<Response, AppError> {
    context.identity.require_admin(&headers)?;
    let filter = RoomFilter {
        hostel: query.hostel.map(HostelId),
        available_only: query.available,
    };
    let rooms = context.rooms.list(&filter)?;
    let views: Vec<RoomView> = rooms.iter().map(RoomView::from).collect();
    Ok(http::ok("rooms listed", json!({ "rooms": views })))
}

pub(crate) async fn deactivate_room_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Path(room_id): Path<String>,
) -> Result<Response, AppError> {
    context.identity.require_admin(&headers)?;
    let room = context.rooms.deactivate(&RoomId(room_id))?;
    Ok(http::ok(
        "room deactivated",
        json!({ "room": RoomView::from(&room) }),
    ))
}

pub(crate) async fn delete_room_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Path(room_id): Path<String>,
) -> Result<Response, AppError> {
    context.identity.require_admin(&headers)?;
    context.rooms.delete(&RoomId(room_id))?;
    Ok(http::ok("room deleted", json!({})))
}
