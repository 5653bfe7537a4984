//! Entity для таблицы servers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "servers")]
pub struct Model {
    /// UUID первичного ключа
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Имя хоста
    pub host: String,

    /// IPv4-адрес в точечной нотации
    pub ip: String,

    /// Описание сервера
    pub description: String,

    /// Публичный URL загруженного изображения
    pub image: String,

    /// Позиция в списке (сортировка по возрастанию)
    pub order: i32,

    /// Время создания (RFC 3339, микросекунды, UTC)
    pub created_at: String,

    /// Время последнего изменения (RFC 3339, микросекунды, UTC)
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
