use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::json;

use crate::context::AppContext;
use crate::error::AppError;
use crate::http;

pub fn reports_router() -> Router<AppContext> {
    Router::new()
        .route("/api/v1/admin/dashboard", get(dashboard_handler))
        .route("/api/v1/admin/reports/occupancy", get(occupancy_handler))
        .route(
            "/api/v1/admin/reports/applications",
            get(applications_report_handler),
        )
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApplicationsReportQuery {
    pub(crate) academic_year: Option<String>,
}

pub(crate) async fn dashboard_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    context.identity.require_admin(&headers)?;
    let dashboard = context.reports.dashboard()?;
    Ok(http::ok("dashboard", json!(dashboard)))
}

pub(crate) async fn occupancy_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    context.identity.require_admin(&headers)?;
    let report = context.reports.occupancy()?;
    Ok(http::ok("occupancy report", json!(report)))
}

pub(crate) async fn applications_report_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Query(query): Query<ApplicationsReportQuery>,
) -> Result<Response, AppError> {
    context.identity.require_admin(&headers)?;
    let report = context.reports.applications(query.academic_year)?;
    Ok(http::ok("applications report", json!(report)))
}
