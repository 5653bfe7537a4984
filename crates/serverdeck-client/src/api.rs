//! HTTP-клиент REST API serverdeck.

use crate::error::{ClientError, FieldErrors};
use crate::form::ServerForm;
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use serverdeck_entities::resources::{ReorderEntry, ReorderRequest, ServerResource};

/// Тело ошибки, которое отдаёт сервер.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    errors: FieldErrors,
}

#[derive(Debug, Clone)]
pub struct ServersApi {
    http: reqwest::Client,
    base_url: String,
}

impl ServersApi {
    /// `base_url` — адрес сервера без `/api`, например `http://localhost:8000`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    /// `/api/servers/{id}`; id кодируется как один сегмент пути.
    fn server_url(&self, id: &str) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.url("/servers"))
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .push(id);
        Ok(url)
    }

    /// GET /api/servers
    pub async fn list(&self) -> Result<Vec<ServerResource>, ClientError> {
        let response = self.http.get(self.url("/servers")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// GET /api/servers/{id}
    pub async fn get(&self, id: &str) -> Result<ServerResource, ClientError> {
        let response = self
            .http
            .get(self.server_url(id)?)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// POST /api/servers (multipart)
    pub async fn create(&self, form: &ServerForm) -> Result<ServerResource, ClientError> {
        let response = self
            .http
            .post(self.url("/servers"))
            .multipart(form.to_multipart()?)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// PUT /api/servers/{id} (multipart, только заданные поля)
    pub async fn update(&self, id: &str, form: &ServerForm) -> Result<ServerResource, ClientError> {
        let response = self
            .http
            .put(self.server_url(id)?)
            .multipart(form.to_multipart()?)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// DELETE /api/servers/{id}
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.server_url(id)?)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// PUT /api/servers/reorder/order
    pub async fn reorder(&self, entries: &[ReorderEntry]) -> Result<(), ClientError> {
        let body = ReorderRequest {
            servers: entries.to_vec(),
        };
        let response = self
            .http
            .put(self.url("/servers/reorder/order"))
            .json(&body)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

/// Перевести неуспешный статус в [`ClientError`].
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound);
    }

    let body: ErrorBody = response.json().await.unwrap_or_default();
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        return Err(ClientError::Validation {
            message: body.error,
            errors: body.errors,
        });
    }
    Err(ClientError::Status {
        status: status.as_u16(),
        message: body.error,
    })
}
