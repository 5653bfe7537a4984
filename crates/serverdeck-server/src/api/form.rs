//! Разбор multipart-формы сервера и валидация полей.
//!
//! Создание требует все поля и изображение. При обновлении каждое поле
//! проверяется, только если оно передано. Ошибки собираются по всем полям
//! сразу и возвращаются как [`AppError::Validation`].

use crate::error::{AppError, FieldErrors};
use crate::services::image_store::{ImageKind, ALLOWED_EXTENSIONS};
use crate::services::server_service::ServerChanges;
use axum::body::Bytes;
use axum::extract::Multipart;
use serverdeck_entities::ipv4::is_dotted_quad;

/// Файл из поля `image`.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Изображение, прошедшее проверку типа и размера.
#[derive(Debug, Clone)]
pub struct ValidImage {
    pub extension: String,
    pub bytes: Bytes,
}

/// Сырые поля формы; отсутствующее поле — `None`.
#[derive(Debug, Clone, Default)]
pub struct ServerForm {
    pub host: Option<String>,
    pub ip: Option<String>,
    pub description: Option<String>,
    pub order: Option<String>,
    pub image: Option<UploadedImage>,
}

/// Проверенные данные для создания.
#[derive(Debug, Clone)]
pub struct CreateInput {
    pub host: String,
    pub ip: String,
    pub description: String,
    pub order: Option<i32>,
    pub image: ValidImage,
}

/// Проверенные данные для обновления (ссылка на изображение ещё не известна).
#[derive(Debug, Clone)]
pub struct UpdateInput {
    pub changes: ServerChanges,
    pub image: Option<ValidImage>,
}

impl ServerForm {
    /// Прочитать поля multipart-запроса. Неизвестные поля игнорируются.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = ServerForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Некорректный multipart: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == "image" {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Не удалось прочитать изображение: {e}"))
                })?;
                // Пустой input type=file браузер отправляет как файл без имени и данных
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.image = Some(UploadedImage {
                    file_name,
                    content_type,
                    bytes,
                });
                continue;
            }

            let slot = match name.as_str() {
                "host" => &mut form.host,
                "ip" => &mut form.ip,
                "description" => &mut form.description,
                "order" => &mut form.order,
                _ => continue,
            };
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Некорректное поле {name}: {e}")))?;
            *slot = Some(value);
        }

        Ok(form)
    }

    /// Проверить форму создания: host, ip, description и image обязательны.
    pub fn validate_create(self, max_image_bytes: usize) -> Result<CreateInput, AppError> {
        let mut errors = FieldErrors::new();

        let host = required_text(&mut errors, "host", self.host);
        let ip = required_text(&mut errors, "ip", self.ip);
        let description = required_text(&mut errors, "description", self.description);
        let order = optional_order(&mut errors, self.order);
        let image = match self.image {
            Some(upload) => check_image(&mut errors, upload, max_image_bytes),
            None => {
                push(&mut errors, "image", "Поле image обязательно");
                None
            }
        };
        if let Some(ip) = &ip {
            check_ip(&mut errors, ip);
        }

        match (host, ip, description, image) {
            (Some(host), Some(ip), Some(description), Some(image)) if errors.is_empty() => {
                Ok(CreateInput {
                    host,
                    ip,
                    description,
                    order,
                    image,
                })
            }
            _ => Err(AppError::Validation(errors)),
        }
    }

    /// Проверить форму обновления: проверяются только переданные поля.
    pub fn validate_update(self, max_image_bytes: usize) -> Result<UpdateInput, AppError> {
        let mut errors = FieldErrors::new();

        let host = sometimes_text(&mut errors, "host", self.host);
        let ip = sometimes_text(&mut errors, "ip", self.ip);
        let description = sometimes_text(&mut errors, "description", self.description);
        let order = optional_order(&mut errors, self.order);
        let image = self
            .image
            .and_then(|upload| check_image(&mut errors, upload, max_image_bytes));
        if let Some(ip) = &ip {
            check_ip(&mut errors, ip);
        }

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        Ok(UpdateInput {
            changes: ServerChanges {
                host,
                ip,
                description,
                image: None,
                order,
            },
            image,
        })
    }
}

fn push(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}

/// Обязательное текстовое поле; пробелы по краям отбрасываются.
fn required_text(errors: &mut FieldErrors, field: &str, value: Option<String>) -> Option<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            push(errors, field, format!("Поле {field} обязательно"));
            None
        }
    }
}

/// Поле «иногда обязательное»: если передано, не может быть пустым.
fn sometimes_text(errors: &mut FieldErrors, field: &str, value: Option<String>) -> Option<String> {
    let value = value?.trim().to_string();
    if value.is_empty() {
        push(errors, field, format!("Поле {field} не может быть пустым"));
        return None;
    }
    Some(value)
}

/// Необязательный целочисленный order; пустая строка — как отсутствие.
fn optional_order(errors: &mut FieldErrors, value: Option<String>) -> Option<i32> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<i32>() {
        Ok(order) => Some(order),
        Err(_) => {
            push(errors, "order", "Поле order должно быть целым числом");
            None
        }
    }
}

fn check_ip(errors: &mut FieldErrors, ip: &str) {
    if !is_dotted_quad(ip) {
        push(
            errors,
            "ip",
            "Неверный формат IP: ожидается IPv4-адрес (например 192.168.1.1)",
        );
    }
}

/// Тип по расширению и сигнатуре (jpg, jpeg, png, gif), размер не больше лимита.
fn check_image(
    errors: &mut FieldErrors,
    upload: UploadedImage,
    max_image_bytes: usize,
) -> Option<ValidImage> {
    let extension = upload
        .file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        push(
            errors,
            "image",
            format!(
                "Изображение должно быть файлом типа: {}",
                ALLOWED_EXTENSIONS.join(", ")
            ),
        );
        return None;
    }

    if upload.bytes.len() > max_image_bytes {
        push(
            errors,
            "image",
            format!(
                "Размер изображения не может превышать {} КиБ",
                max_image_bytes / 1024
            ),
        );
        return None;
    }

    match ImageKind::sniff(&upload.bytes) {
        Some(kind) if kind.matches_extension(&extension) => Some(ValidImage {
            extension,
            bytes: upload.bytes,
        }),
        _ => {
            tracing::warn!(
                "Отклонено изображение {} (content-type: {:?}): содержимое не совпадает с расширением",
                upload.file_name,
                upload.content_type
            );
            push(errors, "image", "Файл не является изображением");
            None
        }
    }
}
