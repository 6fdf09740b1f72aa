//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, ResizeRequest, ResizeResponse, SetRequest,
    SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The cache does its own locking, so handlers only need a shared reference.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache
    pub cache: Arc<Cache<String, String>>,
    /// TTL applied when a SET request has none
    pub default_ttl: Duration,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: Cache<String, String>, default_ttl: Duration) -> Self {
        Self {
            cache: Arc::new(cache),
            default_ttl,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// # Errors
    /// `InvalidCapacity` if the configured capacity is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Cache::new(config.capacity)?;
        Ok(Self::new(cache, config.default_ttl()))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair in the cache with optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }
    let ttl = req.ttl_or(state.default_ttl)?;

    state.cache.put(req.key.clone(), req.value, ttl);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key. Expired keys read as missing.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(key.as_str()) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    match state.cache.remove(key.as_str()) {
        Some(_) => Ok(Json(DeleteResponse::new(key))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for PUT /resize
///
/// Changes the capacity; shrinking evicts least recently used entries
/// before the response is sent.
pub async fn resize_handler(
    State(state): State<AppState>,
    Json(req): Json<ResizeRequest>,
) -> Result<Json<ResizeResponse>> {
    let capacity = req.capacity()?;

    let total_entries = state.cache.with_store(|store| {
        store.resize(capacity)?;
        Ok::<_, CacheError>(store.len())
    })?;
    debug!(capacity, total_entries, "Resize request applied");

    Ok(Json(ResizeResponse::new(capacity, total_entries)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(&state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
