//! Request and Response models for the HTTP API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CacheSetRequest, CreateIndexRequest, CreateTableRequest, QueryRequest};
pub use responses::{
    CacheGetResponse, CacheSizeResponse, CountResponse, DeleteResponse, HealthResponse,
    IndexResponse, MessageResponse, RecordsResponse, TableResponse, TablesResponse,
    UpdateResponse,
};
