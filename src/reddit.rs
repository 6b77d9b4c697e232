use axum::{
    extract::{Path, State},
    Json,
};
use rand::Rng;
use serde_json::{json, Value as JsonValue};

use crate::{
    error::{ApiError, ApiResult},
    server::AppState,
    utils::{now_iso, round2},
};

const TRACKED_SYMBOLS: [&str; 5] = ["AAPL", "TSLA", "NVDA", "AMD", "SPY"];

/// GET /api/reddit/ping — connectivity probe; never fails.
pub async fn ping(State(st): State<AppState>) -> Json<JsonValue> {
    let configured = st.gate.status().reddit_configured();
    Json(json!({
        "timestamp": now_iso(),
        "service": "Reddit API",
        "status": if configured { "configured" } else { "not_configured" },
        "configured": configured,
        "message": if configured {
            "Reddit API is configured and ready"
        } else {
            "Set REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET in .env to enable Reddit data"
        },
    }))
}

fn overall_label(score: f64) -> &'static str {
    if score > 0.6 {
        "bullish"
    } else if score < 0.4 {
        "bearish"
    } else {
        "neutral"
    }
}

/// GET /api/reddit/sentiment/{subreddit} — synthetic sentiment report: an
/// overall label, a score in [0,1], and top ticker mentions.
pub async fn sentiment(
    State(st): State<AppState>,
    Path(subreddit): Path<String>,
) -> ApiResult<Json<JsonValue>> {
    if !st.gate.status().reddit_configured() {
        return Err(ApiError::not_configured(
            "reddit",
            "Reddit API not configured. Set REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET in .env",
        ));
    }

    let mut rng = rand::rng();
    let score = round2(rng.random_range(0.0..=1.0));
    let positive: u32 = rng.random_range(20..60);
    let negative: u32 = rng.random_range(5..(100 - positive).min(40));
    let neutral = 100 - positive - negative;

    let mut mentions: Vec<JsonValue> = TRACKED_SYMBOLS
        .iter()
        .map(|sym| {
            let count: u32 = rng.random_range(10..200);
            let label = overall_label(rng.random_range(0.0..=1.0));
            json!({ "symbol": sym, "mentions": count, "sentiment": label })
        })
        .collect();
    mentions.sort_by_key(|m| std::cmp::Reverse(m["mentions"].as_u64().unwrap_or(0)));
    mentions.truncate(3);

    log::info!("reddit.sentiment subreddit={subreddit} score={score}");
    Ok(Json(json!({
        "timestamp": now_iso(),
        "subreddit": subreddit,
        "sentiment": {
            "overall": overall_label(score),
            "score": score,
            "positive": positive,
            "neutral": neutral,
            "negative": negative,
        },
        "topMentions": mentions,
        "note": "Mock data. Configure Reddit API for real sentiment.",
    })))
}
