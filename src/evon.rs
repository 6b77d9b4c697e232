use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use crate::{
    error::{ApiError, ApiResult},
    server::AppState,
    utils::now_iso,
};

fn present(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
pub struct EvonBody {
    pub prompt: Option<String>,
    pub symbol: Option<String>,
}

/// POST /api/evon — the Evon assistant. Needs either a free-form prompt or a
/// symbol to analyze; gated on an AI provider key being present.
pub async fn evon(State(st): State<AppState>, Json(body): Json<EvonBody>) -> ApiResult<Json<JsonValue>> {
    let query = match (present(&body.prompt), present(&body.symbol)) {
        (Some(prompt), _) => prompt.to_string(),
        (None, Some(symbol)) => format!("Analyze {symbol}"),
        (None, None) => {
            return Err(ApiError::bad_request("Either prompt or symbol is required"));
        }
    };

    let gate = st.gate.status();
    if !gate.ai_configured() {
        return Err(ApiError::not_configured(
            "ai",
            "AI API key not configured. Set OPENAI_API_KEY or ANTHROPIC_API_KEY",
        ));
    }
    let provider = if gate.openai { "OpenAI" } else { "Anthropic" };

    log::info!("evon.query provider={provider}");
    Ok(Json(json!({
        "timestamp": now_iso(),
        "query": query,
        "evonResponse": {
            "greeting": "Hi, I'm Evon, your AI trading assistant.",
            "recommendation": "HOLD",
            "confidence": 0.75,
            "analysis": {
                "technical": "NEUTRAL",
                "sentiment": "POSITIVE",
                "volume": "MODERATE",
            },
            "reasons": [
                "Market showing consolidation pattern",
                "Volume within normal range",
                "Sentiment indicators neutral to positive",
            ],
            "nextAction": "Wait for breakout confirmation",
            "voiceMessage": "Based on my analysis, I recommend holding your position and waiting for a clear breakout signal.",
            "aiProvider": provider,
            "signature": "- Evon AI",
        },
        "note": "This is a demo response from Evon. In production, this would use the configured AI provider.",
    })))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    pub symbol: Option<String>,
    pub timeframe: Option<String>,
}

/// POST /api/trading/analyze — legacy analysis endpoint kept for backward
/// compatibility with older frontends. Not gated; always demo data.
pub async fn trading_analyze(
    Json(body): Json<AnalyzeBody>,
) -> ApiResult<Json<JsonValue>> {
    let symbol = present(&body.symbol)
        .map(str::to_uppercase)
        .ok_or_else(|| ApiError::bad_request("Symbol is required"))?;
    let timeframe = present(&body.timeframe).unwrap_or("1h").to_string();

    Ok(Json(json!({
        "symbol": symbol,
        "timeframe": timeframe,
        "timestamp": now_iso(),
        "recommendation": "HOLD",
        "confidence": 0.75,
        "signals": {
            "technical": "NEUTRAL",
            "sentiment": "POSITIVE",
            "volume": "MODERATE",
        },
        "reasons": [
            "Market showing consolidation pattern",
            "Volume within normal range",
            "Sentiment indicators neutral to positive",
        ],
        "nextAction": "Wait for breakout confirmation",
        "note": "This is a demo response. Configure AI API keys for real analysis.",
    })))
}

#[derive(Debug, Default, Deserialize)]
pub struct QuickPickBody {
    pub market: Option<String>,
    #[serde(rename = "riskLevel")]
    pub risk_level: Option<String>,
}

/// POST /api/trading/quick-pick — never fails; the body is optional.
pub async fn trading_quick_pick(body: Option<Json<QuickPickBody>>) -> Json<JsonValue> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let market = present(&body.market).unwrap_or("stocks").to_string();
    let risk_level = present(&body.risk_level).unwrap_or("medium").to_string();

    Json(json!({
        "timestamp": now_iso(),
        "market": market,
        "riskLevel": risk_level,
        "picks": [
            {
                "symbol": "AAPL",
                "action": "BUY",
                "confidence": 0.82,
                "reason": "Strong technical indicators and positive momentum",
            },
            {
                "symbol": "MSFT",
                "action": "HOLD",
                "confidence": 0.68,
                "reason": "Consolidating near resistance, wait for breakout",
            },
            {
                "symbol": "GOOGL",
                "action": "BUY",
                "confidence": 0.75,
                "reason": "Favorable market conditions and strong fundamentals",
            },
        ],
        "note": "This is a demo response. Configure AI API keys for real quick picks.",
    }))
}
