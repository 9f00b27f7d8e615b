//! API Routes
//!
//! Configures the Axum router with all document store and cache endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_clear_handler, cache_delete_handler, cache_get_handler, cache_set_handler,
    cache_size_handler, cache_stats_handler, count_handler, create_index_handler,
    create_table_handler, delete_record_handler, drop_table_handler, find_by_id_handler,
    find_handler, find_one_handler, health_handler, insert_handler, list_tables_handler,
    update_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check endpoint
/// - `GET|POST /tables` - List or create tables
/// - `DELETE /tables/:table` - Drop a table
/// - `POST /tables/:table/indexes` - Create a presence index
/// - `POST /tables/:table/records` - Insert a record
/// - `GET|PATCH|DELETE /tables/:table/records/:id` - Read, merge or delete a record
/// - `POST /tables/:table/find` - All records matching a query
/// - `POST /tables/:table/find_one` - One record matching a query
/// - `POST /tables/:table/count` - Count records matching a query
/// - `PUT|DELETE /cache` - Store a value or clear the cache
/// - `GET|DELETE /cache/keys/:key` - Read or delete a cached value
/// - `GET /cache/size` - Entry count after an expiry sweep
/// - `GET /cache/stats` - Cache statistics
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/tables", get(list_tables_handler).post(create_table_handler))
        .route("/tables/:table", delete(drop_table_handler))
        .route("/tables/:table/indexes", post(create_index_handler))
        .route("/tables/:table/records", post(insert_handler))
        .route(
            "/tables/:table/records/:id",
            get(find_by_id_handler)
                .patch(update_handler)
                .delete(delete_record_handler),
        )
        .route("/tables/:table/find", post(find_handler))
        .route("/tables/:table/find_one", post(find_one_handler))
        .route("/tables/:table/count", post(count_handler))
        .route("/cache", put(cache_set_handler).delete(cache_clear_handler))
        .route(
            "/cache/keys/:key",
            get(cache_get_handler).delete(cache_delete_handler),
        )
        .route("/cache/size", get(cache_size_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
