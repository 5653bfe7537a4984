//! Конфигурация сервера serverdeck.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Адрес для прослушивания (например "0.0.0.0:8000")
    pub listen: String,

    /// URL подключения к БД (sqlite или postgres)
    pub db_url: String,

    /// Корневая директория хранилища изображений
    pub storage_dir: PathBuf,

    /// Публичный базовый URL, из которого строятся ссылки на изображения
    pub public_url: String,

    /// Максимальный размер изображения, КиБ
    pub max_image_kb: u32,

    /// Режим применения пакета сортировки
    pub reorder_mode: ReorderMode,
}

impl ServerConfig {
    pub fn max_image_bytes(&self) -> usize {
        (self.max_image_kb as usize).saturating_mul(1024)
    }
}

/// Как применяется пакет `{id, order}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReorderMode {
    /// Каждая пара записывается сразу, без общей транзакции.
    #[default]
    BestEffort,
    /// Весь пакет в одной транзакции: ошибка хранилища откатывает все записи пакета.
    Transactional,
}

impl std::str::FromStr for ReorderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "best-effort" | "besteffort" => Ok(ReorderMode::BestEffort),
            "transactional" | "tx" => Ok(ReorderMode::Transactional),
            other => Err(format!(
                "Неизвестный режим сортировки: {other}. Допустимые: best-effort, transactional"
            )),
        }
    }
}

impl std::fmt::Display for ReorderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReorderMode::BestEffort => write!(f, "best-effort"),
            ReorderMode::Transactional => write!(f, "transactional"),
        }
    }
}
