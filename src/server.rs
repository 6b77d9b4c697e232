use std::{net::SocketAddr, path::Path};

use anyhow::{Context, Result};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value as JsonValue};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};

use crate::{
    auth::{self, SessionRegistry},
    config::{ConfigGate, Settings},
    evon, market, news, reddit,
    store::{self, FixtureStore},
    utils::now_iso,
    voice,
};

/// Everything handlers need, passed by value through axum state rather than
/// module-level globals. The fixture and session maps live exactly as long as
/// the process.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub gate: ConfigGate,
    pub fixtures: FixtureStore,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            gate: ConfigGate::Env,
            fixtures: FixtureStore::new(),
            sessions: SessionRegistry::new(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // Unmatched paths fall through to the static frontend; unknown routes get
    // index.html so client-side routing works (SPA convention).
    let static_dir = state.settings.static_dir.clone();
    let spa = ServeDir::new(&static_dir)
        .fallback(ServeFile::new(Path::new(&static_dir).join("index.html")));

    Router::new()
        .route("/api/health", get(health))
        .route("/api/config/status", get(config_status))
        .route("/api/readiness", get(readiness))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/verify", post(auth::verify))
        .route("/api/evon", post(evon::evon))
        .route("/api/trading/analyze", post(evon::trading_analyze))
        .route("/api/trading/quick-pick", post(evon::trading_quick_pick))
        .route("/api/voice/speak", post(voice::speak))
        .route("/api/market/ping", get(market::ping))
        .route("/api/market/quote/{symbol}", get(market::quote))
        .route("/api/news/ping", get(news::ping))
        .route("/api/news/latest", get(news::latest))
        .route("/api/reddit/ping", get(reddit::ping))
        .route("/api/reddit/sentiment/{subreddit}", get(reddit::sentiment))
        .route("/api/db/read", get(store::db_read))
        .route("/api/db/write", post(store::db_write))
        .fallback_service(spa)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /api/health — liveness; never fails.
async fn health(State(st): State<AppState>) -> Json<JsonValue> {
    Json(json!({
        "status": "healthy",
        "timestamp": now_iso(),
        "environment": st.settings.environment,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/config/status — per-integration flags plus aggregate readiness,
/// recomputed from the environment on every call.
async fn config_status(State(st): State<AppState>) -> Json<JsonValue> {
    let status = st.gate.status();
    Json(json!({
        "status": "ok",
        "configuration": status.summary(),
        "ready": status.ready(),
        "timestamp": now_iso(),
    }))
}

/// GET /api/readiness — the aggregate flag alone, for probes.
async fn readiness(State(st): State<AppState>) -> Json<JsonValue> {
    Json(json!({
        "ready": st.gate.status().ready(),
        "timestamp": now_iso(),
    }))
}

pub async fn serve(settings: Settings) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port)
        .parse()
        .with_context(|| format!("server addr {}:{}", settings.host, settings.port))?;

    let state = AppState::new(settings.clone());
    let app = build_router(state);

    log::info!(
        "server.start url=http://{} env={} static_dir={}",
        addr,
        settings.environment,
        settings.static_dir
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("server.stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("server.signal.ctrl_c_failed {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => log::error!("server.signal.sigterm_failed {e}"),
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("server.shutdown signal=SIGINT"),
        _ = terminate => log::info!("server.shutdown signal=SIGTERM"),
    }
}
