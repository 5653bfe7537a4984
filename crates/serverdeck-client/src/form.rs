//! Форма сервера на стороне клиента: локальная проверка и сборка multipart.

use crate::error::{ClientError, FieldErrors};
use reqwest::multipart::{Form, Part};
use serverdeck_entities::ipv4::is_dotted_quad;

/// Файл изображения, выбранный пользователем.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    fn mime(&self) -> &'static str {
        let extension = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "png" => "image/png",
            "gif" => "image/gif",
            "jpg" | "jpeg" => "image/jpeg",
            _ => "application/octet-stream",
        }
    }
}

/// Поля формы; при редактировании передаются только заданные.
#[derive(Debug, Clone, Default)]
pub struct ServerForm {
    pub host: Option<String>,
    pub ip: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
    pub image: Option<ImageFile>,
}

impl ServerForm {
    /// Полная форма создания.
    pub fn new(host: &str, ip: &str, description: &str, image: ImageFile) -> Self {
        Self {
            host: Some(host.to_string()),
            ip: Some(ip.to_string()),
            description: Some(description.to_string()),
            order: None,
            image: Some(image),
        }
    }

    /// Проверка до отправки: при создании все поля обязательны, IP — IPv4.
    pub fn validate(&self, creating: bool) -> Result<(), ClientError> {
        let mut errors = FieldErrors::new();
        let mut push = |field: &str, message: String| {
            errors.entry(field.to_string()).or_default().push(message);
        };

        for (field, value) in [
            ("host", &self.host),
            ("ip", &self.ip),
            ("description", &self.description),
        ] {
            match value.as_deref().map(str::trim) {
                Some("") => push(field, format!("Поле {field} не может быть пустым")),
                None if creating => push(field, format!("Поле {field} обязательно")),
                _ => {}
            }
        }
        if let Some(ip) = self.ip.as_deref().map(str::trim) {
            if !ip.is_empty() && !is_dotted_quad(ip) {
                push(
                    "ip",
                    "Неверный формат IP: ожидается IPv4-адрес (например 192.168.1.1)".into(),
                );
            }
        }
        match &self.image {
            None if creating => push("image", "Изображение обязательно".into()),
            Some(image) if image.mime() == "application/octet-stream" => push(
                "image",
                "Изображение должно быть файлом типа: jpg, jpeg, png, gif".into(),
            ),
            _ => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ClientError::Validation {
                message: "Форма заполнена неверно".into(),
                errors,
            })
        }
    }

    pub(crate) fn to_multipart(&self) -> Result<Form, ClientError> {
        let mut form = Form::new();
        for (field, value) in [
            ("host", &self.host),
            ("ip", &self.ip),
            ("description", &self.description),
        ] {
            if let Some(value) = value {
                form = form.text(field, value.trim().to_string());
            }
        }
        if let Some(order) = self.order {
            form = form.text("order", order.to_string());
        }
        if let Some(image) = &self.image {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(image.mime())?;
            form = form.part("image", part);
        }
        Ok(form)
    }
}
