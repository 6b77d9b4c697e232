use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use crate::{
    error::{ApiError, ApiResult},
    server::AppState,
    utils::now_iso,
};

/// GET /api/news/ping — connectivity probe; never fails.
pub async fn ping(State(st): State<AppState>) -> Json<JsonValue> {
    let configured = st.gate.status().news_configured();
    Json(json!({
        "timestamp": now_iso(),
        "service": "News API",
        "status": if configured { "configured" } else { "not_configured" },
        "configured": configured,
        "message": if configured {
            "News API is configured and ready"
        } else {
            "Set NEWS_API_KEY in .env to enable news feeds"
        },
    }))
}

#[derive(Debug, Deserialize)]
pub struct LatestQuery {
    pub symbol: Option<String>,
    pub limit: Option<usize>,
}

fn fixture_articles() -> Vec<JsonValue> {
    let published = now_iso();
    vec![
        json!({
            "title": "Market Analysis: Tech Stocks Rally",
            "source": "Financial Times",
            "publishedAt": published,
            "url": "https://example.com/news/1",
            "sentiment": "positive",
        }),
        json!({
            "title": "Fed Announces Interest Rate Decision",
            "source": "Bloomberg",
            "publishedAt": published,
            "url": "https://example.com/news/2",
            "sentiment": "neutral",
        }),
    ]
}

/// GET /api/news/latest — fixture article list, trimmed to `limit`.
pub async fn latest(
    State(st): State<AppState>,
    Query(q): Query<LatestQuery>,
) -> ApiResult<Json<JsonValue>> {
    if !st.gate.status().news_configured() {
        return Err(ApiError::not_configured(
            "news",
            "News API not configured. Set NEWS_API_KEY in .env",
        ));
    }

    let symbol = q
        .symbol
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "ALL".to_string());
    let limit = q.limit.unwrap_or(10);

    let mut news = fixture_articles();
    news.truncate(limit);

    log::info!("news.latest symbol={} count={}", symbol, news.len());
    Ok(Json(json!({
        "timestamp": now_iso(),
        "symbol": symbol,
        "count": news.len(),
        "news": news,
        "note": "Mock data. Configure NEWS_API_KEY for real news.",
    })))
}
