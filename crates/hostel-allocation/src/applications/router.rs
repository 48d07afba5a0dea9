use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationForm, ApplicationId, ApplicationView};
use super::repository::ApplicationFilter;
use crate::context::AppContext;
use crate::error::AppError;
use crate::http;

pub fn applications_router() -> Router<AppContext> {
    Router::new()
        .route("/api/v1/applications/submit", post(submit_handler))
        .route("/api/v1/applications", get(list_handler))
        .route("/api/v1/applications/mine", get(mine_handler))
        .route(
            "/api/v1/applications/:application_id",
            put(update_handler).delete(delete_handler),
        )
        .route(
            "/api/v1/applications/:application_id/approve",
            post(approve_handler),
        )
        .route(
            "/api/v1/applications/:application_id/reject",
            post(reject_handler),
        )
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewRequest {
    #[serde(default)]
    pub(crate) comments: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApplicationListQuery {
    pub(crate) status: Option<String>,
    pub(crate) academic_year: Option<String>,
}

pub(crate) async fn submit_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Json(form): Json<ApplicationForm>,
) -> Result<Response, AppError> {
    let student = context.identity.require_student(&headers)?;
    let application = context.applications.submit(&student, form)?;
    Ok(http::created(
        "application submitted",
        json!({ "application": ApplicationView::from(&application) }),
    ))
}

pub(crate) async fn list_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Query(query): Query<ApplicationListQuery>,
) -> Result<Response, AppError> {
    context.identity.require_admin(&headers)?;
    let filter = ApplicationFilter {
        status: query.status,
        academic_year: query.academic_year,
    };
    let applications = context.applications.list(&filter)?;
    let views: Vec<ApplicationView> = applications.iter().map(ApplicationView::from).collect();
    Ok(http::ok(
        "applications listed",
        json!({ "applications": views }),
    ))
}

pub(crate) async fn mine_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let student = context.identity.require_student(&headers)?;
    let applications = context.applications.list_for(&student.id)?;
    let views: Vec<ApplicationView> = applications.iter().map(ApplicationView::from).collect();
    Ok(http::ok(
        "applications listed",
        json!({ "applications": views }),
    ))
}

pub(crate) async fn update_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
    Json(form): Json<ApplicationForm>,
) -> Result<Response, AppError> {
    let student = context.identity.require_student(&headers)?;
    let application =
        context
            .applications
            .update(&ApplicationId(application_id), &student, form)?;
    Ok(http::ok(
        "application updated",
        json!({ "application": ApplicationView::from(&application) }),
    ))
}

pub(crate) async fn delete_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
) -> Result<Response, AppError> {
    let actor = context.identity.authenticate(&headers)?;
    context
        .applications
        .delete(&ApplicationId(application_id), &actor)?;
    Ok(http::ok("application deleted", json!({})))
}

pub(crate) async fn approve_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
    Json(request): Json<ReviewRequest>,
) -> Result<Response, AppError> {
    let admin = context.identity.require_admin(&headers)?;
    let application = context.applications.approve(
        &ApplicationId(application_id),
        &admin,
        request.comments,
    )?;
    Ok(http::ok(
        "application approved",
        json!({ "application": ApplicationView::from(&application) }),
    ))
}

pub(crate) async fn reject_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
    Json(request): Json<ReviewRequest>,
) -> Result<Response, AppError> {
    let admin = context.identity.require_admin(&headers)?;
    let application = context.applications.reject(
        &ApplicationId(application_id),
        &admin,
        request.comments,
    )?;
    Ok(http::ok(
        "application rejected",
        json!({ "application": ApplicationView::from(&application) }),
    ))
}
