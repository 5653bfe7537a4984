//! Клиентская часть serverdeck: состояние упорядоченного списка серверов,
//! HTTP-клиент API и контроллер с оптимистичной сортировкой.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::ServersApi;
pub use dashboard::Dashboard;
pub use error::ClientError;
pub use form::{ImageFile, ServerForm};
pub use state::{ListAction, ServerListState};
