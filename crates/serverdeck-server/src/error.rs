//! Типы ошибок сервера serverdeck.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

/// Ошибки валидации по полям: имя поля → сообщения.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Не найдено: {0}")]
    NotFound(String),

    #[error("Ошибка валидации: {}", summarize(.0))]
    Validation(FieldErrors),

    #[error("Неверный формат: {0}")]
    Unprocessable(String),

    #[error("Неверный запрос: {0}")]
    BadRequest(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

fn summarize(errors: &FieldErrors) -> String {
    errors
        .iter()
        .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field}: {m}")))
        .collect::<Vec<_>>()
        .join("; ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": summarize(errors), "errors": errors }),
            ),
            AppError::Unprocessable(m) => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "error": m }))
            }
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
            AppError::Internal(m) => {
                tracing::error!("Внутренняя ошибка: {m}");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": m }))
            }
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}
