//! The `{success, message, data, errors}` envelope every route responds with.

use crate::error::FieldError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

pub fn ok(message: impl Into<String>, data: Value) -> Response {
    respond(StatusCode::OK, message, data)
}

pub fn created(message: impl Into<String>, data: Value) -> Response {
    respond(StatusCode::CREATED, message, data)
}

fn respond(status: StatusCode, message: impl Into<String>, data: Value) -> Response {
    let body = Envelope {
        success: true,
        message: Some(message.into()),
        data: Some(data),
        errors: None,
    };
    (status, Json(body)).into_response()
}

pub(crate) fn failure(
    status: StatusCode,
    message: String,
    errors: Option<Vec<FieldError>>,
) -> Response {
    let body = Envelope {
        success: false,
        message: Some(message),
        data: None,
        errors,
    };
    (status, Json(body)).into_response()
}
