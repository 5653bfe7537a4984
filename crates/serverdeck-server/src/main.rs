//! Точка входа сервера serverdeck.

use clap::Parser;
use serverdeck_server::config::{ReorderMode, ServerConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "serverdeck-server",
    about = "serverdeck — администрирование упорядоченного списка серверов"
)]
struct Cli {
    /// Адрес для прослушивания (host:port)
    #[arg(long, default_value = "0.0.0.0:8000")]
    listen: String,

    /// URL базы данных
    #[arg(
        long,
        default_value = "sqlite:./serverdeck.db?mode=rwc",
        env = "DATABASE_URL"
    )]
    db_url: String,

    /// Директория для загруженных изображений
    #[arg(long, default_value = "./storage", env = "STORAGE_DIR")]
    storage_dir: PathBuf,

    /// Публичный URL сервера (для ссылок на изображения)
    #[arg(long, default_value = "http://localhost:8000", env = "PUBLIC_URL")]
    public_url: String,

    /// Максимальный размер изображения, КиБ
    #[arg(long, default_value_t = 2048, value_parser = clap::value_parser!(u32).range(1..))]
    max_image_kb: u32,

    /// Режим сортировки: best-effort, transactional
    #[arg(long, default_value = "best-effort")]
    reorder_mode: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Инициализация логгера
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let reorder_mode: ReorderMode = cli
        .reorder_mode
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let config = ServerConfig {
        listen: cli.listen,
        db_url: cli.db_url,
        storage_dir: cli.storage_dir,
        public_url: cli.public_url,
        max_image_kb: cli.max_image_kb,
        reorder_mode,
    };

    serverdeck_server::run(config).await
}
