//! Ошибки клиента API.

use std::collections::BTreeMap;
use thiserror::Error;

/// Ошибки по полям формы: имя поля → сообщения.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Сервер не найден")]
    NotFound,

    #[error("Ошибка валидации: {message}")]
    Validation { message: String, errors: FieldErrors },

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Некорректный адрес сервера: {0}")]
    InvalidUrl(String),

    #[error("Сетевая ошибка: {0}")]
    Transport(#[from] reqwest::Error),
}
