//! Репозиторий серверов: список, чтение, создание, частичное обновление, удаление.

use crate::error::AppError;
use chrono::{SecondsFormat, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectionTrait, EntityTrait, QueryOrder};
use serverdeck_entities::servers::{ActiveModel, Column, Entity as ServerEntity, Model};
use uuid::Uuid;

/// Данные для создания сервера (изображение уже сохранено, здесь только ссылка).
#[derive(Debug, Clone)]
pub struct NewServer {
    pub host: String,
    pub ip: String,
    pub description: String,
    pub image: String,
    /// Явная позиция; `None` — в конец списка.
    pub order: Option<i32>,
}

/// Частичное обновление: применяются только заданные поля.
#[derive(Debug, Clone, Default)]
pub struct ServerChanges {
    pub host: Option<String>,
    pub ip: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub order: Option<i32>,
}

/// Текущее время в фиксированном формате, сортируемом как строка.
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Все серверы по возрастанию order; при равенстве — по времени создания, затем по id.
pub async fn list_servers<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, AppError> {
    let servers = ServerEntity::find()
        .order_by_asc(Column::Order)
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(servers)
}

/// Найти сервер по id.
pub async fn get_server_by_id<C: ConnectionTrait>(
    db: &C,
    id: &str,
) -> Result<Option<Model>, AppError> {
    Ok(ServerEntity::find_by_id(id).one(db).await?)
}

/// Позиция для новой записи: максимум + 1, для пустой таблицы — 1.
pub async fn next_order<C: ConnectionTrait>(db: &C) -> Result<i32, AppError> {
    let last = ServerEntity::find()
        .order_by_desc(Column::Order)
        .one(db)
        .await?;
    Ok(last.map_or(1, |m| m.order.saturating_add(1)))
}

/// Создать сервер. Без явного order запись добавляется в конец.
pub async fn create_server<C: ConnectionTrait>(db: &C, data: NewServer) -> Result<Model, AppError> {
    let order = match data.order {
        Some(order) => order,
        None => next_order(db).await?,
    };
    let now = now_timestamp();

    let model = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        host: Set(data.host),
        ip: Set(data.ip),
        description: Set(data.description),
        image: Set(data.image),
        order: Set(order),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    };
    let created = model.insert(db).await?;

    tracing::info!("Сервер создан: {} ({}, order {})", created.id, created.host, created.order);
    Ok(created)
}

/// Обновить сервер. `None`, если записи с таким id нет.
pub async fn update_server<C: ConnectionTrait>(
    db: &C,
    id: &str,
    changes: ServerChanges,
) -> Result<Option<Model>, AppError> {
    let Some(record) = ServerEntity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let mut model: ActiveModel = record.into();
    if let Some(host) = changes.host {
        model.host = Set(host);
    }
    if let Some(ip) = changes.ip {
        model.ip = Set(ip);
    }
    if let Some(description) = changes.description {
        model.description = Set(description);
    }
    if let Some(image) = changes.image {
        model.image = Set(image);
    }
    if let Some(order) = changes.order {
        model.order = Set(order);
    }
    model.updated_at = Set(now_timestamp());

    let updated = model.update(db).await?;
    tracing::info!("Сервер обновлён: {}", updated.id);
    Ok(Some(updated))
}

/// Удалить сервер. Возвращает, существовала ли запись.
pub async fn delete_server<C: ConnectionTrait>(db: &C, id: &str) -> Result<bool, AppError> {
    let result = ServerEntity::delete_by_id(id).exec(db).await?;
    let deleted = result.rows_affected > 0;
    if deleted {
        tracing::info!("Сервер удалён: {id}");
    }
    Ok(deleted)
}
