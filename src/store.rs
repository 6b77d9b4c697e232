use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    Json,
};
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use crate::{
    error::{ApiError, ApiResult},
    server::AppState,
    utils::now_iso,
};

const STORAGE_NOTE: &str = "Using in-memory storage. Set DATABASE_URL for persistent storage.";

/// In-process key/value fixture storage backing the /api/db routes. Last write
/// wins; no TTL, no eviction, no delete. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct FixtureStore {
    map: Arc<RwLock<HashMap<String, JsonValue>>>,
}

impl FixtureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&self, key: &str, value: JsonValue) {
        self.map.write().insert(key.to_string(), value);
    }

    /// `None` for unknown keys; never an error.
    pub fn read(&self, key: &str) -> Option<JsonValue> {
        self.map.read().get(key).cloned()
    }

    pub fn read_all(&self) -> HashMap<String, JsonValue> {
        self.map.read().clone()
    }

    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct ReadQuery {
    pub key: Option<String>,
}

/// GET /api/db/read — stored value (or null) for a key; the whole map when no
/// key is supplied.
pub async fn db_read(State(st): State<AppState>, Query(q): Query<ReadQuery>) -> Json<JsonValue> {
    match q.key.filter(|k| !k.trim().is_empty()) {
        None => Json(json!({
            "timestamp": now_iso(),
            "data": st.fixtures.read_all(),
            "note": STORAGE_NOTE,
        })),
        Some(key) => {
            let value = st.fixtures.read(&key);
            Json(json!({
                "timestamp": now_iso(),
                "key": key,
                "exists": value.is_some(),
                "value": value.unwrap_or(JsonValue::Null),
            }))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WriteBody {
    pub key: Option<String>,
    pub value: Option<JsonValue>,
}

/// POST /api/db/write — last-write-wins upsert.
pub async fn db_write(
    State(st): State<AppState>,
    Json(body): Json<WriteBody>,
) -> ApiResult<Json<JsonValue>> {
    let key = body
        .key
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Key is required"))?;
    let value = body.value.unwrap_or(JsonValue::Null);

    st.fixtures.write(&key, value.clone());
    log::info!("db.write key={} entries={}", key, st.fixtures.len());

    Ok(Json(json!({
        "timestamp": now_iso(),
        "key": key,
        "value": value,
        "success": true,
        "note": STORAGE_NOTE,
    })))
}
