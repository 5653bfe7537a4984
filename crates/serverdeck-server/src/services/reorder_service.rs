//! Пакетная сортировка: применение пар `{id, order}` по принципу best-effort.
//!
//! Пакет не проверяется на полноту или уникальность позиций: каждая пара пишет
//! только в свою запись, неизвестные id пропускаются. Итоговый порядок — это
//! просто сортировка всех записей по текущему значению order.

use crate::config::ReorderMode;
use crate::error::AppError;
use crate::services::server_service::now_timestamp;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, DatabaseConnection, EntityTrait,
    TransactionTrait,
};
use serverdeck_entities::resources::ReorderEntry;
use serverdeck_entities::servers::{ActiveModel, Entity as ServerEntity};

/// Итог применения пакета. Наружу не отдаётся, только логируется.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReorderOutcome {
    /// Записи, у которых order изменился.
    pub applied: usize,
    /// Записи, у которых order уже совпадал.
    pub unchanged: usize,
    /// id, не найденные в хранилище.
    pub skipped: Vec<String>,
}

/// Применить пакет на переданном соединении (или внутри транзакции).
pub async fn apply_order<C: ConnectionTrait>(
    db: &C,
    entries: &[ReorderEntry],
) -> Result<ReorderOutcome, AppError> {
    let mut outcome = ReorderOutcome::default();

    for entry in entries {
        let Some(record) = ServerEntity::find_by_id(entry.id.as_str()).one(db).await? else {
            tracing::warn!("Сортировка: сервер не найден, пропускаю: {}", entry.id);
            outcome.skipped.push(entry.id.clone());
            continue;
        };

        // Без изменения позиции запись не трогаем, updated_at остаётся прежним
        if record.order == entry.order {
            outcome.unchanged += 1;
            continue;
        }

        let mut model: ActiveModel = record.into();
        model.order = Set(entry.order);
        model.updated_at = Set(now_timestamp());
        model.update(db).await?;
        outcome.applied += 1;
    }

    Ok(outcome)
}

/// Применить пакет в выбранном режиме.
pub async fn reorder(
    db: &DatabaseConnection,
    mode: ReorderMode,
    entries: &[ReorderEntry],
) -> Result<ReorderOutcome, AppError> {
    let outcome = match mode {
        ReorderMode::BestEffort => apply_order(db, entries).await?,
        ReorderMode::Transactional => {
            let txn = db.begin().await?;
            // При ошибке txn удаляется без commit — откат
            let outcome = apply_order(&txn, entries).await?;
            txn.commit().await?;
            outcome
        }
    };

    tracing::debug!(
        "Сортировка ({mode}): применено {}, без изменений {}, пропущено {}",
        outcome.applied,
        outcome.unchanged,
        outcome.skipped.len()
    );
    Ok(outcome)
}
