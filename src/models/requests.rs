//! Request DTOs for the HTTP API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::store::{Query, Schema};

/// Request body for POST /tables
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTableRequest {
    /// Table name
    pub name: String,
    /// Advisory schema, field name to type name
    #[serde(default)]
    pub schema: Schema,
}

impl CreateTableRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.is_empty() {
            return Some("Table name cannot be empty".to_string());
        }
        None
    }
}

/// Request body for POST /tables/:table/indexes
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIndexRequest {
    pub field: String,
}

impl CreateIndexRequest {
    pub fn validate(&self) -> Option<String> {
        if self.field.is_empty() {
            return Some("Index field cannot be empty".to_string());
        }
        None
    }
}

/// Request body for the find, find_one and count endpoints
///
/// A missing or null `query` matches every record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: Value,
}

impl QueryRequest {
    /// Parses the query document.
    pub fn to_query(&self) -> Result<Query> {
        Query::from_value(&self.query)
    }
}

/// Request body for PUT /cache
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSetRequest {
    /// The cache key
    pub key: String,
    /// Any JSON value
    pub value: Value,
}

impl CacheSetRequest {
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }
}
