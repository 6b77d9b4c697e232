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

/// GET /api/market/ping — connectivity probe; never fails. Reports whether the
/// Polygon key is present and shows a static sample payload either way.
pub async fn ping(State(st): State<AppState>) -> Json<JsonValue> {
    let configured = st.gate.status().market_configured();
    Json(json!({
        "timestamp": now_iso(),
        "service": "Polygon Market Data API",
        "status": if configured { "configured" } else { "not_configured" },
        "configured": configured,
        "message": if configured {
            "Polygon API is configured and ready"
        } else {
            "Set POLYGON_KEY in .env to enable market data"
        },
        "mockData": {
            "symbol": "AAPL",
            "price": 175.43,
            "change": 2.15,
            "changePercent": 1.24,
            "volume": 52_847_392u64,
            "note": "This is mock data. Real data requires Polygon API configuration.",
        },
    }))
}

/// GET /api/market/quote/{symbol} — synthetic quote in the Polygon response
/// shape. Prices land in 50-250, daily change within +-5.
pub async fn quote(
    State(st): State<AppState>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<JsonValue>> {
    if !st.gate.status().market_configured() {
        return Err(ApiError::not_configured(
            "market",
            "Polygon API not configured. Set POLYGON_KEY in .env",
        ));
    }

    let symbol = symbol.trim().to_uppercase();
    let mut rng = rand::rng();
    let price = round2(rng.random_range(50.0..250.0));
    let change = round2(rng.random_range(-5.0..5.0));
    let change_percent = round2(rng.random_range(-2.5..2.5));
    let volume: u64 = rng.random_range(0..100_000_000);

    log::info!("market.quote symbol={symbol}");
    Ok(Json(json!({
        "timestamp": now_iso(),
        "symbol": symbol,
        "price": price,
        "change": change,
        "changePercent": change_percent,
        "volume": volume,
        "open": round2(rng.random_range(50.0..250.0)),
        "high": round2(rng.random_range(50.0..250.0)),
        "low": round2(rng.random_range(50.0..250.0)),
        "close": round2(rng.random_range(50.0..250.0)),
        "note": "Mock data. Configure POLYGON_KEY for real quotes from Polygon.io",
        "provider": "Polygon.io",
    })))
}
