use std::{collections::HashMap, sync::Arc};

use axum::{extract::State, Json};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    server::AppState,
    utils::{now_iso, now_ms},
};

/// Sessions age out 24 hours after issue.
pub const SESSION_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// Token -> issue time (epoch ms). Tokens are UUID v4, minted on login for the
/// single shared application password. No logout path; expired tokens are
/// purged on the verification that finds them stale.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<String, i64>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&self, issued_ms: i64) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.lock().insert(token.clone(), issued_ms);
        token
    }

    /// True iff the token exists and is at most [`SESSION_TTL_MS`] old.
    pub fn verify(&self, token: &str, now_ms: i64) -> bool {
        let mut sessions = self.sessions.lock();
        let Some(&issued) = sessions.get(token) else {
            return false;
        };
        if now_ms - issued > SESSION_TTL_MS {
            sessions.remove(token);
            return false;
        }
        true
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub password: Option<String>,
}

/// POST /api/auth/login — exact match against APP_PASSWORD; always succeeds
/// when no password is configured.
pub async fn login(
    State(st): State<AppState>,
    Json(body): Json<LoginBody>,
) -> ApiResult<Json<JsonValue>> {
    if let Some(expected) = st.settings.app_password.as_deref() {
        let supplied = body.password.as_deref().unwrap_or("");
        if supplied != expected {
            log::warn!("auth.login.rejected");
            return Err(ApiError::Unauthorized("Invalid password".to_string()));
        }
    }

    let session_id = st.sessions.mint(now_ms());
    log::info!("auth.login.ok sessions={}", st.sessions.len());
    Ok(Json(json!({
        "success": true,
        "sessionId": session_id,
        "timestamp": now_iso(),
    })))
}

#[derive(Debug, Deserialize)]
pub struct VerifyBody {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// POST /api/auth/verify — never fails; unknown or stale tokens come back as
/// `authenticated: false`.
pub async fn verify(State(st): State<AppState>, Json(body): Json<VerifyBody>) -> Json<JsonValue> {
    let authenticated = body
        .session_id
        .as_deref()
        .map(|token| st.sessions.verify(token, now_ms()))
        .unwrap_or(false);

    Json(json!({
        "authenticated": authenticated,
        "timestamp": now_iso(),
    }))
}
