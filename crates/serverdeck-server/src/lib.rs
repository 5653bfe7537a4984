//! Ядро serverdeck: HTTP API администрирования упорядоченного списка серверов.

pub mod api;
pub mod config;
pub mod error;
pub mod services;


use api::AppState;
use axum::Router;
use config::ServerConfig;
use sea_orm::{Database, DatabaseConnection};
use serverdeck_migration::{Migrator, MigratorTrait};
use services::image_store::ImageStore;
use std::net::SocketAddr;
use tokio::sync::watch;
use tracing::info;

/// Запустить сервер serverdeck.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    // 1. Подключение к БД
    info!("Подключение к базе данных: {}", config.db_url);
    let db: DatabaseConnection = Database::connect(&config.db_url).await?;

    // 2. Автоматические миграции
    info!("Выполнение миграций...");
    Migrator::up(&db, None).await?;

    // 3. Состояние приложения
    let state = AppState {
        db,
        images: ImageStore::new(&config.storage_dir, &config.public_url),
        max_image_bytes: config.max_image_bytes(),
        reorder_mode: config.reorder_mode,
    };
    info!(
        "Хранилище изображений: {}, режим сортировки: {}",
        config.storage_dir.display(),
        config.reorder_mode
    );

    // 4. Маршрутизатор
    let app = api::build_router(state);

    // 5. Graceful shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Получен сигнал завершения, останавливаю сервер...");
        let _ = shutdown_tx.send(true);
    });

    // 6. Запуск сервера
    serve(&config.listen, app, shutdown_rx).await?;

    info!("Сервер serverdeck остановлен");
    Ok(())
}

/// Слушать HTTP до сигнала завершения.
async fn serve(
    listen: &str,
    app: Router,
    mut shutdown_rx: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    let addr: SocketAddr = listen.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Сервер serverdeck запущен на {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            while !*shutdown_rx.borrow_and_update() {
                if shutdown_rx.changed().await.is_err() {
                    break;
                }
            }
        })
        .await?;
    Ok(())
}
