use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use crate::{
    error::{ApiError, ApiResult},
    server::AppState,
    utils::now_iso,
};

#[derive(Debug, Deserialize)]
pub struct SpeakBody {
    pub text: Option<String>,
    pub voice: Option<String>,
    pub speed: Option<f64>,
}

/// POST /api/voice/speak — synthetic text-to-speech metadata. Gated on both
/// the TTS key and the voice identity being configured.
pub async fn speak(State(st): State<AppState>, Json(body): Json<SpeakBody>) -> ApiResult<Json<JsonValue>> {
    let text = body
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("Text is required"))?
        .to_string();

    if !st.gate.status().voice_configured() {
        return Err(ApiError::not_configured(
            "voice",
            "Voice synthesis not configured. Set ELEVENLABS_API_KEY and ELEVENLABS_VOICE_ID",
        ));
    }

    let voice = body.voice.unwrap_or_else(|| "evon-default".to_string());
    let speed = body.speed.unwrap_or(1.0);

    log::info!("voice.speak chars={} voice={}", text.len(), voice);
    Ok(Json(json!({
        "timestamp": now_iso(),
        "text": text,
        "voice": voice,
        "speed": speed,
        "audioUrl": JsonValue::Null,
        "evonVoice": true,
        "message": "Evon voice synthesis would happen here with a TTS API",
        "note": "Mock data. Configure ELEVENLABS_API_KEY for actual Evon voice synthesis.",
        "signature": "Evon AI Voice",
    })))
}
