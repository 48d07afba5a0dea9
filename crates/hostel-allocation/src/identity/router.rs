use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::domain::{RegisterForm, UserView};
use crate::context::AppContext;
use crate::error::AppError;
use crate::http;

pub fn auth_router() -> Router<AppContext> {
    Router::new()
        .route("/api/v1/auth/register", post(register_handler))
        .route("/api/v1/auth/login", post(login_handler))
        .route("/api/v1/auth/me", get(me_handler))
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

pub(crate) async fn register_handler(
    State(context): State<AppContext>,
    Json(form): Json<RegisterForm>,
) -> Result<Response, AppError> {
    let user = context.identity.register(form)?;
    Ok(http::created(
        "account registered",
        json!({ "user": UserView::from(&user) }),
    ))
}

pub(crate) async fn login_handler(
    State(context): State<AppContext>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let issued = context.identity.login(&request.email, &request.password)?;
    Ok(http::ok("login successful", json!(issued)))
}

pub(crate) async fn me_handler(
    State(context): State<AppContext>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let user = context.identity.authenticate(&headers)?;
    Ok(http::ok(
        "authenticated",
        json!({ "user": UserView::from(&user) }),
    ))
}
