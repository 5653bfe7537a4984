//! Wire-типы HTTP API: представление записи и пакет сортировки.

use crate::servers::Model;
use serde::{Deserialize, Serialize};

/// Запись сервера в ответах API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerResource {
    pub id: String,
    pub host: String,
    pub ip: String,
    pub description: String,
    pub image: String,
    pub order: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Model> for ServerResource {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            host: m.host,
            ip: m.ip,
            description: m.description,
            image: m.image,
            order: m.order,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Одна пара пакета сортировки: новая позиция записи.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderEntry {
    pub id: String,
    pub order: i32,
}

/// Тело `PUT /api/servers/reorder/order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub servers: Vec<ReorderEntry>,
}

/// Простой ответ-подтверждение.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_uses_camel_case_keys() {
        let resource = ServerResource {
            id: "a".into(),
            host: "h1".into(),
            ip: "10.0.0.1".into(),
            description: "d".into(),
            image: "http://localhost/storage/servers/x.png".into(),
            order: 3,
            created_at: "2026-01-01T00:00:00.000000Z".into(),
            updated_at: "2026-01-01T00:00:00.000000Z".into(),
        };
        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["order"], 3);
        assert_eq!(json["createdAt"], "2026-01-01T00:00:00.000000Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_reorder_request_shape() {
        let req = ReorderRequest {
            servers: vec![ReorderEntry { id: "b".into(), order: 1 }],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({ "servers": [{ "id": "b", "order": 1 }] }));
    }
}
