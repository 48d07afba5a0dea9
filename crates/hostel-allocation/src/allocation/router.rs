use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::service::AssignmentRequest;
use crate::applications::ApplicationView;
use crate::context::AppContext;
use crate::error::AppError;
use crate::http;
use crate::identity::UserId;
use crate::rooms::{RoomId, RoomView};

pub fn allocation_router() -> Router<AppContext> {
    Router::new()
        .route("/api/v1/rooms/assign", post(assign_handler))
        .route(
            "/api/v1/rooms/:room_id/remove-student",
            post(remove_student_handler),
        )
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveStudentRequest {
    pub(crate) student: String,
}

pub(crate) async fn assign_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Json(request): Json<AssignmentRequest>,
) -> Result<Response, AppError> {
    context.identity.require_admin(&headers)?;
    let outcome = context.allocation.assign(request)?;
    Ok(http::ok(
        "student assigned",
        json!({
            "room": RoomView::from(&outcome.room),
            "bed_number": outcome.bed_number,
            "application": outcome.application.as_ref().map(ApplicationView::from),
        }),
    ))
}

pub(crate) async fn remove_student_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Path(room_id): Path<String>,
    Json(request): Json<RemoveStudentRequest>,
) -> Result<Response, AppError> {
    context.identity.require_admin(&headers)?;
    let outcome = context
        .allocation
        .release(&RoomId(room_id), &UserId(request.student))?;
    Ok(http::ok(
        "student removed",
        json!({
            "room": RoomView::from(&outcome.room),
            "application": outcome.reset_application.as_ref().map(ApplicationView::from),
        }),
    ))
}
