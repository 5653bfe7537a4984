//! Маршруты серверов: список, чтение, создание, обновление, удаление, сортировка.

use crate::api::form::ServerForm;
use crate::api::AppState;
use crate::error::AppError;
use crate::services::reorder_service;
use crate::services::server_service::{self, NewServer};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::Value;
use serverdeck_entities::resources::{MessageResponse, ReorderEntry, ServerResource};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/servers", get(list_servers).post(create_server))
        .route(
            "/servers/{id}",
            get(show_server).put(update_server).delete(delete_server),
        )
        .route("/servers/reorder/order", put(reorder_servers))
}

// ── Обработчики ──────────────────────────────────────────────────────────────

/// GET /api/servers — все серверы по возрастанию order.
async fn list_servers(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServerResource>>, AppError> {
    let servers = server_service::list_servers(&state.db).await?;
    Ok(Json(servers.into_iter().map(ServerResource::from).collect()))
}

/// GET /api/servers/{id}
async fn show_server(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ServerResource>, AppError> {
    match server_service::get_server_by_id(&state.db, &id).await? {
        Some(server) => Ok(Json(server.into())),
        None => Err(not_found(&id)),
    }
}

/// POST /api/servers — создание (multipart, изображение обязательно).
async fn create_server(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ServerResource>, AppError> {
    let input = ServerForm::from_multipart(multipart)
        .await?
        .validate_create(state.max_image_bytes)?;

    let image = state
        .images
        .store(&input.image.extension, &input.image.bytes)
        .await?;

    let server = server_service::create_server(
        &state.db,
        NewServer {
            host: input.host,
            ip: input.ip,
            description: input.description,
            image,
            order: input.order,
        },
    )
    .await?;

    Ok(Json(server.into()))
}

/// PUT /api/servers/{id} — частичное обновление (multipart, все поля необязательны).
async fn update_server(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<ServerResource>, AppError> {
    let input = ServerForm::from_multipart(multipart)
        .await?
        .validate_update(state.max_image_bytes)?;

    // Не сохраняем файл для записи, которой нет
    if server_service::get_server_by_id(&state.db, &id)
        .await?
        .is_none()
    {
        return Err(not_found(&id));
    }

    let mut changes = input.changes;
    if let Some(image) = input.image {
        changes.image = Some(state.images.store(&image.extension, &image.bytes).await?);
    }

    match server_service::update_server(&state.db, &id, changes).await? {
        Some(server) => Ok(Json(server.into())),
        None => Err(not_found(&id)),
    }
}

/// DELETE /api/servers/{id}
async fn delete_server(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !server_service::delete_server(&state.db, &id).await? {
        return Err(not_found(&id));
    }
    Ok(Json(MessageResponse {
        message: "Сервер удалён".into(),
    }))
}

/// PUT /api/servers/reorder/order — пакетная сортировка `{servers: [{id, order}]}`.
///
/// Неизвестные id и неполные элементы пропускаются; ответ всегда подтверждение,
/// если верхний уровень тела корректен.
async fn reorder_servers(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(body) =
        body.map_err(|e| AppError::Unprocessable(format!("Некорректное тело запроса: {e}")))?;
    let entries = parse_reorder_batch(&body)?;

    let outcome = reorder_service::reorder(&state.db, state.reorder_mode, &entries).await?;
    tracing::info!(
        "Порядок обновлён: {} записей изменено, {} пропущено",
        outcome.applied,
        outcome.skipped.len()
    );

    Ok(Json(MessageResponse {
        message: "Порядок обновлён".into(),
    }))
}

/// Разобрать пакет сортировки. Если `servers` не массив — ошибка до любых записей;
/// элементы без корректных `id` и `order` пропускаются.
pub(crate) fn parse_reorder_batch(body: &Value) -> Result<Vec<ReorderEntry>, AppError> {
    let items = body
        .get("servers")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::Unprocessable("Поле servers должно быть массивом".into()))?;

    let entries = items
        .iter()
        .filter_map(|item| {
            let entry = parse_reorder_entry(item);
            if entry.is_none() {
                tracing::warn!("Сортировка: пропущен некорректный элемент: {item}");
            }
            entry
        })
        .collect();
    Ok(entries)
}

fn parse_reorder_entry(item: &Value) -> Option<ReorderEntry> {
    let id = match item.get("id")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let order = i32::try_from(item.get("order")?.as_i64()?).ok()?;
    Some(ReorderEntry { id, order })
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Сервер {id} не найден"))
}
