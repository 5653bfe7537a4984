//! Контроллер списка серверов для UI.
//!
//! Создание, изменение и удаление ждут ответа сервера и только потом меняют
//! состояние. Перетаскивание применяется локально сразу, а пакет сортировки
//! уходит в фоне: результат не ожидается, при ошибке откат и повтор не
//! выполняются, расхождение с сервером лишь логируется.

use crate::api::ServersApi;
use crate::error::ClientError;
use crate::form::ServerForm;
use crate::state::{ListAction, ServerListState};
use serverdeck_entities::resources::ServerResource;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct Dashboard {
    api: ServersApi,
    state: watch::Sender<ServerListState>,
}

impl Dashboard {
    pub fn new(api: ServersApi) -> Self {
        Self::with_state(api, ServerListState::default())
    }

    /// Контроллер с заранее известным снимком списка.
    pub fn with_state(api: ServersApi, initial: ServerListState) -> Self {
        let (state, _) = watch::channel(initial);
        Self { api, state }
    }

    /// Подписка на снимки списка (для отрисовки).
    pub fn subscribe(&self) -> watch::Receiver<ServerListState> {
        self.state.subscribe()
    }

    /// Текущий снимок.
    pub fn snapshot(&self) -> ServerListState {
        self.state.borrow().clone()
    }

    fn dispatch(&self, action: ListAction) {
        self.state.send_modify(|state| *state = state.apply(action));
    }

    /// Загрузить список с сервера.
    pub async fn load(&self) -> Result<(), ClientError> {
        match self.api.list().await {
            Ok(servers) => {
                tracing::info!("Загружено серверов: {}", servers.len());
                self.dispatch(ListAction::Loaded(servers));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Ошибка загрузки серверов: {e}");
                Err(e)
            }
        }
    }

    /// Создать (`id == None`) или обновить сервер. Состояние меняется после ответа.
    pub async fn save(
        &self,
        form: &ServerForm,
        id: Option<&str>,
    ) -> Result<ServerResource, ClientError> {
        form.validate(id.is_none())?;

        let result = match id {
            Some(id) => self.api.update(id, form).await,
            None => self.api.create(form).await,
        };

        match result {
            Ok(server) => {
                let action = match id {
                    Some(_) => ListAction::Updated(server.clone()),
                    None => ListAction::Created(server.clone()),
                };
                self.dispatch(action);
                Ok(server)
            }
            Err(e) => {
                tracing::error!("Ошибка сохранения сервера: {e}");
                Err(e)
            }
        }
    }

    /// Удалить сервер. Состояние меняется после ответа.
    pub async fn remove(&self, id: &str) -> Result<(), ClientError> {
        match self.api.delete(id).await {
            Ok(()) => {
                self.dispatch(ListAction::Deleted(id.to_string()));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Ошибка удаления сервера {id}: {e}");
                Err(e)
            }
        }
    }

    /// Завершение перетаскивания: `active` встаёт на место `over`.
    ///
    /// Список меняется сразу; пакет сортировки отправляется в фоновой задаче.
    /// Возвращает `None`, если перемещение ничего не меняет. Вызывать внутри
    /// tokio runtime.
    pub fn drag_end(&self, active: &str, over: &str) -> Option<JoinHandle<()>> {
        let current = self.snapshot();
        if active == over || current.position(active).is_none() || current.position(over).is_none()
        {
            return None;
        }

        self.dispatch(ListAction::Moved {
            active: active.to_string(),
            over: over.to_string(),
        });
        let payload = self.snapshot().reorder_payload();

        let api = self.api.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = api.reorder(&payload).await {
                tracing::error!("Ошибка синхронизации порядка: {e}");
            }
        }))
    }
}
