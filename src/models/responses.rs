//! Response DTOs for the HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::store::Record;

/// Response body for GET /tables
#[derive(Debug, Clone, Serialize)]
pub struct TablesResponse {
    pub tables: Vec<String>,
}

/// Response body for table creation and removal
#[derive(Debug, Clone, Serialize)]
pub struct TableResponse {
    /// Success message
    pub message: String,
    /// The table acted on
    pub table: String,
}

impl TableResponse {
    pub fn created(table: impl Into<String>) -> Self {
        let table = table.into();
        Self {
            message: format!("Table '{}' created successfully", table),
            table,
        }
    }

    pub fn dropped(table: impl Into<String>) -> Self {
        let table = table.into();
        Self {
            message: format!("Table '{}' dropped successfully", table),
            table,
        }
    }
}

/// Response body for POST /tables/:table/indexes
#[derive(Debug, Clone, Serialize)]
pub struct IndexResponse {
    pub message: String,
    pub table: String,
    pub field: String,
}

impl IndexResponse {
    pub fn new(table: impl Into<String>, field: impl Into<String>) -> Self {
        let table = table.into();
        let field = field.into();
        Self {
            message: format!("Index on '{}.{}' created successfully", table, field),
            table,
            field,
        }
    }
}

/// Response body for POST /tables/:table/find
#[derive(Debug, Clone, Serialize)]
pub struct RecordsResponse {
    pub records: Vec<Record>,
    pub count: usize,
}

impl RecordsResponse {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            count: records.len(),
            records,
        }
    }
}

/// Response body for POST /tables/:table/count
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

/// Response body for PATCH /tables/:table/records/:id
#[derive(Debug, Clone, Serialize)]
pub struct UpdateResponse {
    pub id: String,
    /// Whether the record existed
    pub updated: bool,
}

/// Response body for DELETE /tables/:table/records/:id and DELETE /cache/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Record id or cache key
    pub key: String,
    /// Whether it existed
    pub deleted: bool,
}

/// Response body for GET /cache/:key
#[derive(Debug, Clone, Serialize)]
pub struct CacheGetResponse {
    pub key: String,
    pub value: Value,
}

/// Response body for cache writes (PUT /cache, DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for GET /cache/size
#[derive(Debug, Clone, Serialize)]
pub struct CacheSizeResponse {
    pub size: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
