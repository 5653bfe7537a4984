//! Интеграционные тесты клиента против настоящего сервера на случайном порту.

#[cfg(test)]
mod tests {
    use crate::{ClientError, Dashboard, ImageFile, ListAction, ServerForm, ServerListState, ServersApi};
    use sea_orm::{Database, DatabaseConnection};
    use serverdeck_migration::{Migrator, MigratorTrait};
    use serverdeck_server::api::{build_router, AppState};
    use serverdeck_server::config::ReorderMode;
    use serverdeck_server::services::image_store::ImageStore;
    use serverdeck_server::services::server_service::list_servers;
    use tempfile::TempDir;

    struct TestServer {
        base_url: String,
        db: DatabaseConnection,
        _storage: TempDir,
    }

    async fn spawn_server() -> TestServer {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let storage = tempfile::tempdir().unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let state = AppState {
            db: db.clone(),
            images: ImageStore::new(storage.path(), &base_url),
            max_image_bytes: 2048 * 1024,
            reorder_mode: ReorderMode::BestEffort,
        };
        let app = build_router(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        TestServer {
            base_url,
            db,
            _storage: storage,
        }
    }

    fn image() -> ImageFile {
        ImageFile {
            file_name: "logo.png".into(),
            bytes: b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR".to_vec(),
        }
    }

    fn hosts(state: &ServerListState) -> Vec<&str> {
        state.servers().iter().map(|s| s.host.as_str()).collect()
    }

    async fn seeded_dashboard(server: &TestServer) -> Dashboard {
        let dashboard = Dashboard::new(ServersApi::new(&server.base_url));
        for host in ["A", "B", "C"] {
            dashboard
                .save(&ServerForm::new(host, "10.0.0.1", "d", image()), None)
                .await
                .unwrap();
        }
        dashboard
    }

    #[tokio::test]
    async fn test_load_and_create() {
        let server = spawn_server().await;
        let dashboard = seeded_dashboard(&server).await;

        let state = dashboard.snapshot();
        assert_eq!(hosts(&state), ["A", "B", "C"]);
        assert_eq!(
            state.servers().iter().map(|s| s.order).collect::<Vec<_>>(),
            [1, 2, 3]
        );

        let fresh = Dashboard::new(ServersApi::new(&server.base_url));
        fresh.load().await.unwrap();
        assert_eq!(fresh.snapshot().servers(), state.servers());
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let server = spawn_server().await;
        let dashboard = seeded_dashboard(&server).await;
        let b = dashboard.snapshot().servers()[1].clone();

        let form = ServerForm {
            host: Some("B2".into()),
            ..ServerForm::default()
        };
        let updated = dashboard.save(&form, Some(&b.id)).await.unwrap();
        assert_eq!(updated.host, "B2");
        assert_eq!(updated.image, b.image);
        assert_eq!(hosts(&dashboard.snapshot()), ["A", "B2", "C"]);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_server() {
        let server = spawn_server().await;
        let dashboard = seeded_dashboard(&server).await;
        let before = dashboard.snapshot();

        let form = ServerForm::new("h", "10.0.0", "d", image());
        let err = dashboard.save(&form, None).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation { ref errors, .. } if errors.contains_key("ip")));

        assert_eq!(dashboard.snapshot(), before);
        assert_eq!(list_servers(&server.db).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_remove_waits_for_server() {
        let server = spawn_server().await;
        let dashboard = seeded_dashboard(&server).await;
        let a = dashboard.snapshot().servers()[0].id.clone();

        dashboard.remove(&a).await.unwrap();
        assert_eq!(hosts(&dashboard.snapshot()), ["B", "C"]);

        let before = dashboard.snapshot();
        let err = dashboard.remove(&a).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound));
        assert_eq!(dashboard.snapshot(), before, "Неудачное удаление не меняет список");

        let api = ServersApi::new(&server.base_url);
        assert!(matches!(api.get(&a).await, Err(ClientError::NotFound)));
    }

    #[tokio::test]
    async fn test_id_with_path_characters_stays_one_segment() {
        let server = spawn_server().await;
        let api = ServersApi::new(&server.base_url);

        // Без кодирования это был бы маршрут пакетной сортировки (только PUT)
        assert!(matches!(api.get("reorder/order").await, Err(ClientError::NotFound)));
        assert!(matches!(api.delete("reorder/order").await, Err(ClientError::NotFound)));
        assert!(matches!(api.get("a?b#c").await, Err(ClientError::NotFound)));
    }

    #[tokio::test]
    async fn test_drag_end_is_optimistic_then_synced() {
        let server = spawn_server().await;
        let dashboard = seeded_dashboard(&server).await;
        let mut updates = dashboard.subscribe();
        let ids: Vec<String> = dashboard
            .snapshot()
            .servers()
            .iter()
            .map(|s| s.id.clone())
            .collect();

        // C перетаскивается на место A
        let handle = dashboard.drag_end(&ids[2], &ids[0]).expect("перемещение должно начаться");
        assert!(updates.has_changed().unwrap());
        assert_eq!(hosts(&updates.borrow_and_update()), ["C", "A", "B"]);

        handle.await.unwrap();
        let stored: Vec<_> = list_servers(&server.db)
            .await
            .unwrap()
            .into_iter()
            .map(|s| (s.host, s.order))
            .collect();
        assert_eq!(
            stored,
            [("C".to_string(), 1), ("A".to_string(), 2), ("B".to_string(), 3)]
        );
    }

    #[tokio::test]
    async fn test_drag_end_noop_sends_nothing() {
        let server = spawn_server().await;
        let dashboard = seeded_dashboard(&server).await;
        let a = dashboard.snapshot().servers()[0].id.clone();

        assert!(dashboard.drag_end(&a, &a).is_none());
        assert!(dashboard.drag_end(&a, "missing").is_none());
    }

    #[tokio::test]
    async fn test_failed_reorder_push_is_not_rolled_back() {
        let server = spawn_server().await;
        let seeded = seeded_dashboard(&server).await;
        let snapshot = seeded.snapshot();
        let ids: Vec<String> = snapshot.servers().iter().map(|s| s.id.clone()).collect();

        // Порт 9 (discard) закрыт: отправка пакета завершится сетевой ошибкой
        let offline = Dashboard::with_state(ServersApi::new("http://127.0.0.1:9"), snapshot);
        let handle = offline.drag_end(&ids[0], &ids[2]).unwrap();
        handle.await.unwrap();

        assert_eq!(hosts(&offline.snapshot()), ["B", "C", "A"]);
        let stored: Vec<_> = list_servers(&server.db)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.host)
            .collect();
        assert_eq!(stored, ["A", "B", "C"], "Сервер не должен был получить пакет");
    }

    #[tokio::test]
    async fn test_load_failure_keeps_state() {
        let dashboard = Dashboard::new(ServersApi::new("http://127.0.0.1:9"));
        let err = dashboard.load().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(!dashboard.snapshot().is_loaded());

        let state = ServerListState::default().apply(ListAction::Loaded(Vec::new()));
        assert!(state.is_loaded() && state.is_empty());
    }
}
