//! Бизнес-логика: репозиторий серверов, сортировка, хранилище изображений.

pub mod image_store;
pub mod reorder_service;
pub mod server_service;
