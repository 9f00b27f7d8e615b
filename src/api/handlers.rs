//! API Handlers
//!
//! HTTP request handlers for the document store and cache endpoints.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{CacheManager, CacheStats};
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    CacheGetResponse, CacheSetRequest, CacheSizeResponse, CountResponse, CreateIndexRequest,
    CreateTableRequest, DeleteResponse, HealthResponse, IndexResponse, MessageResponse,
    QueryRequest, RecordsResponse, TableResponse, TablesResponse, UpdateResponse,
};
use crate::store::{DocumentStore, Record};

/// Application state shared across all handlers.
///
/// Each component sits behind its own lock, so store and cache traffic do
/// not contend with each other.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe document store
    pub store: Arc<RwLock<DocumentStore>>,
    /// Thread-safe cache of JSON values
    pub cache: Arc<RwLock<CacheManager<Value>>>,
}

impl AppState {
    /// Creates a new AppState from a store and a cache.
    pub fn new(store: DocumentStore, cache: CacheManager<Value>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Starts with an empty store and a cache sized from the Config.
    pub fn from_config(config: &Config) -> Self {
        let cache = CacheManager::new(config.cache_max_size, config.cache_ttl);
        Self::new(DocumentStore::new(), cache)
    }
}

// == Table Handlers ==

/// Handler for GET /tables
pub async fn list_tables_handler(State(state): State<AppState>) -> Json<TablesResponse> {
    let store = state.store.read().await;
    Json(TablesResponse {
        tables: store.table_names(),
    })
}

/// Handler for POST /tables
pub async fn create_table_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateTableRequest>,
) -> ApiResult<Json<TableResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let mut store = state.store.write().await;
    store.create_table(&req.name, req.schema)?;

    Ok(Json(TableResponse::created(req.name)))
}

/// Handler for DELETE /tables/:table
pub async fn drop_table_handler(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> ApiResult<Json<TableResponse>> {
    let mut store = state.store.write().await;
    store.drop_table(&table)?;

    Ok(Json(TableResponse::dropped(table)))
}

/// Handler for POST /tables/:table/indexes
pub async fn create_index_handler(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Json(req): Json<CreateIndexRequest>,
) -> ApiResult<Json<IndexResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let mut store = state.store.write().await;
    store.create_index(&table, &req.field)?;

    Ok(Json(IndexResponse::new(table, req.field)))
}

// == Record Handlers ==

/// Handler for POST /tables/:table/records
///
/// Returns the stored record, including a minted id when none was given.
pub async fn insert_handler(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Json(record): Json<Record>,
) -> ApiResult<Json<Record>> {
    let mut store = state.store.write().await;
    let stored = store.insert(&table, record)?;

    Ok(Json(stored))
}

/// Handler for GET /tables/:table/records/:id
pub async fn find_by_id_handler(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
) -> ApiResult<Json<Record>> {
    let store = state.store.read().await;
    match store.find_by_id(&table, &id)? {
        Some(record) => Ok(Json(record.clone())),
        None => Err(ApiError::RecordNotFound(format!("{}/{}", table, id))),
    }
}

/// Handler for PATCH /tables/:table/records/:id
pub async fn update_handler(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
    Json(partial): Json<Record>,
) -> ApiResult<Json<UpdateResponse>> {
    let mut store = state.store.write().await;
    let updated = store.update(&table, &id, partial)?;

    Ok(Json(UpdateResponse { id, updated }))
}

/// Handler for DELETE /tables/:table/records/:id
pub async fn delete_record_handler(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
) -> ApiResult<Json<DeleteResponse>> {
    let mut store = state.store.write().await;
    let deleted = store.delete(&table, &id)?;

    Ok(Json(DeleteResponse { key: id, deleted }))
}

// == Query Handlers ==

/// Handler for POST /tables/:table/find
pub async fn find_handler(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Json(req): Json<QueryRequest>,
) -> ApiResult<Json<RecordsResponse>> {
    let query = req.to_query()?;

    let store = state.store.read().await;
    let records = store
        .find_many(&table, Some(&query))?
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(RecordsResponse::new(records)))
}

/// Handler for POST /tables/:table/find_one
pub async fn find_one_handler(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Json(req): Json<QueryRequest>,
) -> ApiResult<Json<Record>> {
    let query = req.to_query()?;

    let store = state.store.read().await;
    match store.find_one(&table, &query)? {
        Some(record) => Ok(Json(record.clone())),
        None => Err(ApiError::RecordNotFound(format!(
            "no record in '{}' matches the query",
            table
        ))),
    }
}

/// Handler for POST /tables/:table/count
pub async fn count_handler(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Json(req): Json<QueryRequest>,
) -> ApiResult<Json<CountResponse>> {
    let query = req.to_query()?;

    let store = state.store.read().await;
    let count = store.count(&table, Some(&query))?;

    Ok(Json(CountResponse { count }))
}

// == Cache Handlers ==

/// Handler for PUT /cache
pub async fn cache_set_handler(
    State(state): State<AppState>,
    Json(req): Json<CacheSetRequest>,
) -> ApiResult<Json<MessageResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    let message = format!("Key '{}' set successfully", req.key);
    cache.set(req.key, req.value);

    Ok(Json(MessageResponse::new(message)))
}

/// Handler for GET /cache/keys/:key
pub async fn cache_get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Json<CacheGetResponse>> {
    // Write lock: a hit bumps the entry's counter, an expired entry is removed
    let mut cache = state.cache.write().await;
    match cache.get(&key) {
        Some(value) => Ok(Json(CacheGetResponse { key, value })),
        None => Err(ApiError::CacheMiss(key)),
    }
}

/// Handler for DELETE /cache/keys/:key
pub async fn cache_delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let mut cache = state.cache.write().await;
    let deleted = cache.delete(&key);

    Json(DeleteResponse { key, deleted })
}

/// Handler for DELETE /cache
pub async fn cache_clear_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    let mut cache = state.cache.write().await;
    cache.clear();

    Json(MessageResponse::new("Cache cleared"))
}

/// Handler for GET /cache/size
///
/// Sweeps expired entries before counting.
pub async fn cache_size_handler(State(state): State<AppState>) -> Json<CacheSizeResponse> {
    let mut cache = state.cache.write().await;
    Json(CacheSizeResponse { size: cache.size() })
}

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    let cache = state.cache.read().await;
    Json(cache.get_stats())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::assert_ok;

    fn test_state() -> AppState {
        AppState::new(DocumentStore::new(), CacheManager::new(100, 60))
    }

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    async fn with_table(state: &AppState, name: &str) {
        let req = CreateTableRequest {
            name: name.to_string(),
            schema: Default::default(),
        };
        assert_ok!(create_table_handler(State(state.clone()), Json(req)).await);
    }

    #[tokio::test]
    async fn test_create_table_twice_conflicts() {
        let state = test_state();
        with_table(&state, "users").await;

        let req = CreateTableRequest {
            name: "users".to_string(),
            schema: Default::default(),
        };
        let err = create_table_handler(State(state), Json(req)).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id_handler() {
        let state = test_state();
        with_table(&state, "users").await;

        let Json(stored) = insert_handler(
            State(state.clone()),
            Path("users".to_string()),
            Json(record(json!({"name": "alice"}))),
        )
        .await
        .unwrap();
        let id = stored["id"].as_str().unwrap().to_string();

        let Json(found) = find_by_id_handler(State(state), Path(("users".to_string(), id)))
            .await
            .unwrap();
        assert_eq!(found, stored);
    }

    #[tokio::test]
    async fn test_find_by_id_distinguishes_missing_table_and_record() {
        let state = test_state();
        with_table(&state, "users").await;

        let missing_record = find_by_id_handler(
            State(state.clone()),
            Path(("users".to_string(), "nope".to_string())),
        )
        .await
        .unwrap_err();
        assert!(matches!(missing_record, ApiError::RecordNotFound(_)));

        let missing_table = find_by_id_handler(
            State(state),
            Path(("ghosts".to_string(), "nope".to_string())),
        )
        .await
        .unwrap_err();
        assert!(matches!(missing_table, ApiError::Store(_)));
    }

    #[tokio::test]
    async fn test_update_and_delete_handlers() {
        let state = test_state();
        with_table(&state, "users").await;
        insert_handler(
            State(state.clone()),
            Path("users".to_string()),
            Json(record(json!({"id": "u1", "age": 1}))),
        )
        .await
        .unwrap();

        let path = || Path(("users".to_string(), "u1".to_string()));

        let Json(resp) = update_handler(State(state.clone()), path(), Json(record(json!({"age": 2}))))
            .await
            .unwrap();
        assert!(resp.updated);

        let Json(resp) = delete_record_handler(State(state.clone()), path()).await.unwrap();
        assert!(resp.deleted);

        let Json(resp) = delete_record_handler(State(state), path()).await.unwrap();
        assert!(!resp.deleted);
    }

    #[tokio::test]
    async fn test_find_and_count_handlers() {
        let state = test_state();
        with_table(&state, "users").await;
        for status in 1..=3 {
            insert_handler(
                State(state.clone()),
                Path("users".to_string()),
                Json(record(json!({"status": status}))),
            )
            .await
            .unwrap();
        }

        let req = QueryRequest {
            query: json!({"status": {"$gte": 2}}),
        };
        let Json(found) = find_handler(State(state.clone()), Path("users".to_string()), Json(req.clone()))
            .await
            .unwrap();
        assert_eq!(found.count, 2);

        let Json(counted) = count_handler(State(state.clone()), Path("users".to_string()), Json(req))
            .await
            .unwrap();
        assert_eq!(counted.count, 2);

        let Json(all) = count_handler(State(state), Path("users".to_string()), Json(QueryRequest::default()))
            .await
            .unwrap();
        assert_eq!(all.count, 3);
    }

    #[tokio::test]
    async fn test_invalid_query_is_bad_request() {
        let state = test_state();
        with_table(&state, "users").await;

        let req = QueryRequest {
            query: json!({"a": {"$like": "x"}}),
        };
        let err = find_handler(State(state), Path("users".to_string()), Json(req))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cache_set_and_get_handler() {
        let state = test_state();

        let req = CacheSetRequest {
            key: "k".to_string(),
            value: json!({"v": 1}),
        };
        assert_ok!(cache_set_handler(State(state.clone()), Json(req)).await);

        let Json(resp) = cache_get_handler(State(state.clone()), Path("k".to_string()))
            .await
            .unwrap();
        assert_eq!(resp.value, json!({"v": 1}));

        let Json(stats) = cache_stats_handler(State(state)).await;
        assert_eq!(stats.total_hits, 1);
        assert_eq!(stats.size, 1);
    }

    #[tokio::test]
    async fn test_cache_miss_handler() {
        let state = test_state();

        let err = cache_get_handler(State(state), Path("missing".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::CacheMiss(_)));
    }

    #[tokio::test]
    async fn test_cache_set_empty_key() {
        let state = test_state();

        let req = CacheSetRequest {
            key: String::new(),
            value: json!(1),
        };
        let result = cache_set_handler(State(state), Json(req)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_cache_clear_and_size_handlers() {
        let state = test_state();
        state.cache.write().await.set("a", json!(1));

        let Json(size) = cache_size_handler(State(state.clone())).await;
        assert_eq!(size.size, 1);

        cache_clear_handler(State(state.clone())).await;
        let Json(size) = cache_size_handler(State(state)).await;
        assert_eq!(size.size, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
