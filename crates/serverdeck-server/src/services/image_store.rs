//! Файловое хранилище изображений серверов.

use crate::error::AppError;
use std::path::{Path, PathBuf};
use tokio::fs::create_dir_all;
use tokio::io::AsyncWriteExt;

/// Допустимые расширения файлов изображений.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Поддиректория хранилища для изображений серверов.
const SERVERS_DIR: &str = "servers";

/// Формат изображения, определённый по сигнатуре содержимого.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
}

impl ImageKind {
    /// Определить формат по первым байтам файла.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageKind::Jpeg)
        } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageKind::Png)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageKind::Gif)
        } else {
            None
        }
    }

    /// Соответствует ли расширение (в нижнем регистре) этому формату.
    pub fn matches_extension(self, extension: &str) -> bool {
        matches!(
            (self, extension),
            (ImageKind::Jpeg, "jpg" | "jpeg") | (ImageKind::Png, "png") | (ImageKind::Gif, "gif")
        )
    }
}

/// Хранилище: файлы лежат в `root/servers`, раздаются по `/storage`.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    public_url: String,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>, public_url: &str) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    /// Корневая директория (раздаётся как `/storage`).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Сохранить изображение под новым UUID-именем и вернуть его публичный URL.
    pub async fn store(&self, extension: &str, bytes: &[u8]) -> Result<String, AppError> {
        let file_name = format!("{}.{}", uuid::Uuid::new_v4(), extension);
        let dir = self.root.join(SERVERS_DIR);
        create_dir_all(&dir).await?;

        let path = dir.join(&file_name);
        let mut file = tokio::fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        tracing::info!("Изображение сохранено: {}", path.display());
        Ok(format!("{}/storage/{SERVERS_DIR}/{file_name}", self.public_url))
    }
}
