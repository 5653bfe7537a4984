//! Состояние упорядоченного списка серверов.
//!
//! [`ServerListState`] — неизменяемый снимок. Новый снимок получается только
//! через [`ServerListState::apply`] с одним из [`ListAction`].

use serverdeck_entities::resources::{ReorderEntry, ServerResource};
use std::sync::Arc;

/// Действия над списком.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// Список загружен с сервера (уже отсортирован по order).
    Loaded(Vec<ServerResource>),
    /// Сервер подтвердил создание: запись в конец.
    Created(ServerResource),
    /// Сервер подтвердил обновление: замена на месте.
    Updated(ServerResource),
    /// Сервер подтвердил удаление.
    Deleted(String),
    /// Перетаскивание: `active` встаёт на позицию `over`.
    Moved { active: String, over: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerListState {
    servers: Arc<Vec<ServerResource>>,
    loaded: bool,
}

impl ServerListState {
    pub fn servers(&self) -> &[ServerResource] {
        &self.servers
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.servers.iter().position(|s| s.id == id)
    }

    /// Применить действие и вернуть новый снимок; текущий не меняется.
    pub fn apply(&self, action: ListAction) -> Self {
        let servers = match action {
            ListAction::Loaded(servers) => servers,
            ListAction::Created(server) => {
                let mut servers = self.servers.to_vec();
                servers.push(server);
                servers
            }
            ListAction::Updated(server) => self
                .servers
                .iter()
                .map(|s| if s.id == server.id { server.clone() } else { s.clone() })
                .collect(),
            ListAction::Deleted(id) => self
                .servers
                .iter()
                .filter(|s| s.id != id)
                .cloned()
                .collect(),
            ListAction::Moved { active, over } => {
                match (self.position(&active), self.position(&over)) {
                    (Some(from), Some(to)) if from != to => {
                        let mut servers = self.servers.to_vec();
                        let moved = servers.remove(from);
                        servers.insert(to, moved);
                        servers
                    }
                    _ => return self.clone(),
                }
            }
        };

        Self {
            servers: Arc::new(servers),
            loaded: true,
        }
    }

    /// Пакет сортировки по текущим позициям: order = индекс + 1.
    pub fn reorder_payload(&self) -> Vec<ReorderEntry> {
        self.servers
            .iter()
            .zip(1..)
            .map(|(s, order)| ReorderEntry {
                id: s.id.clone(),
                order,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(id: &str, order: i32) -> ServerResource {
        ServerResource {
            id: id.into(),
            host: format!("host-{id}"),
            ip: "10.0.0.1".into(),
            description: "d".into(),
            image: format!("http://localhost:8000/storage/servers/{id}.png"),
            order,
            created_at: "2026-01-01T00:00:00.000000Z".into(),
            updated_at: "2026-01-01T00:00:00.000000Z".into(),
        }
    }

    fn ids(state: &ServerListState) -> Vec<&str> {
        state.servers().iter().map(|s| s.id.as_str()).collect()
    }

    fn loaded() -> ServerListState {
        ServerListState::default().apply(ListAction::Loaded(vec![
            server("a", 1),
            server("b", 2),
            server("c", 3),
            server("d", 4),
        ]))
    }

    fn moved(active: &str, over: &str) -> ListAction {
        ListAction::Moved {
            active: active.into(),
            over: over.into(),
        }
    }

    #[test]
    fn test_default_is_not_loaded() {
        let state = ServerListState::default();
        assert!(!state.is_loaded());
        assert!(state.is_empty());
        assert!(loaded().is_loaded());
    }

    #[test]
    fn test_move_forward_and_backward() {
        let state = loaded();
        assert_eq!(ids(&state.apply(moved("a", "c"))), ["b", "c", "a", "d"]);
        assert_eq!(ids(&state.apply(moved("d", "b"))), ["a", "d", "b", "c"]);
    }

    #[test]
    fn test_move_noop_cases() {
        let state = loaded();
        assert_eq!(state.apply(moved("b", "b")), state);
        assert_eq!(state.apply(moved("x", "b")), state);
        assert_eq!(state.apply(moved("b", "x")), state);
    }

    #[test]
    fn test_apply_keeps_previous_snapshot() {
        let before = loaded();
        let after = before.apply(moved("a", "d"));
        assert_eq!(ids(&before), ["a", "b", "c", "d"]);
        assert_eq!(ids(&after), ["b", "c", "d", "a"]);
    }

    #[test]
    fn test_payload_is_one_based_position() {
        let state = loaded().apply(moved("c", "a"));
        let payload: Vec<_> = state
            .reorder_payload()
            .into_iter()
            .map(|e| (e.id, e.order))
            .collect();
        assert_eq!(
            payload,
            [
                ("c".to_string(), 1),
                ("a".to_string(), 2),
                ("b".to_string(), 3),
                ("d".to_string(), 4)
            ]
        );
    }

    #[test]
    fn test_created_updated_deleted() {
        let state = loaded().apply(ListAction::Created(server("e", 5)));
        assert_eq!(ids(&state), ["a", "b", "c", "d", "e"]);

        let mut renamed = server("b", 2);
        renamed.host = "renamed".into();
        let state = state.apply(ListAction::Updated(renamed));
        assert_eq!(state.servers()[1].host, "renamed");
        assert_eq!(state.len(), 5);

        let state = state.apply(ListAction::Deleted("c".into()));
        assert_eq!(ids(&state), ["a", "b", "d", "e"]);
        assert_eq!(state.apply(ListAction::Deleted("zzz".into())), state);
    }
}
