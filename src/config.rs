use std::env;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

/// Unset, empty, and whitespace-only variables all count as absent.
pub fn get_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn get_env_string(key: &str, default: &str) -> String {
    get_env(key).unwrap_or_else(|| default.to_string())
}

fn get_env_u16(key: &str, default: u16) -> Result<u16> {
    match get_env(key) {
        None => Ok(default),
        Some(v) => Ok(v
            .parse::<u16>()
            .map_err(|e| anyhow!("{key} invalid port: {e}"))?),
    }
}

/// Server-level settings, loaded once at startup. Integration credentials are
/// deliberately not held here: the [`ConfigGate`] re-reads them per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub environment: String, // development|production
    pub static_dir: String,
    pub app_password: Option<String>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let s = Self {
            host: get_env_string("HOST", "0.0.0.0"),
            port: get_env_u16("PORT", 3000)?,
            environment: get_env_string("APP_ENV", "development").to_lowercase(),
            static_dir: get_env_string("STATIC_DIR", "./public"),
            app_password: get_env("APP_PASSWORD"),
        };
        s.validate()?;
        Ok(s)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(anyhow!("HOST must not be empty"));
        }
        if self.port == 0 {
            return Err(anyhow!("PORT must be >= 1 (got {})", self.port));
        }
        if self.static_dir.trim().is_empty() {
            return Err(anyhow!("STATIC_DIR must not be empty"));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

pub fn is_production() -> bool {
    get_env_string("APP_ENV", "development").to_lowercase() == "production"
}

/// Presence flags for every integration credential, computed as a pure
/// function of the environment. Never cached across requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigStatus {
    pub openai: bool,
    pub anthropic: bool,
    pub trading_api: bool,
    pub market_data: bool,
    pub voice_key: bool,
    pub voice_id: bool,
    pub polygon: bool,
    pub news: bool,
    pub reddit_id: bool,
    pub reddit_secret: bool,
    pub database: bool,
}

impl ConfigStatus {
    pub fn from_env() -> Self {
        Self::from_lookup(get_env)
    }

    /// Build from an arbitrary variable lookup so the boolean table is
    /// testable without touching process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let set = |key: &str| lookup(key).map(|v| !v.trim().is_empty()).unwrap_or(false);
        Self {
            openai: set("OPENAI_API_KEY"),
            anthropic: set("ANTHROPIC_API_KEY"),
            trading_api: set("TRADING_API_KEY"),
            market_data: set("MARKET_DATA_API_KEY"),
            voice_key: set("ELEVENLABS_API_KEY"),
            voice_id: set("ELEVENLABS_VOICE_ID"),
            polygon: set("POLYGON_KEY"),
            news: set("NEWS_API_KEY"),
            reddit_id: set("REDDIT_CLIENT_ID"),
            reddit_secret: set("REDDIT_CLIENT_SECRET"),
            database: set("DATABASE_URL"),
        }
    }

    pub fn ai_configured(&self) -> bool {
        self.openai || self.anthropic
    }

    pub fn trading_configured(&self) -> bool {
        self.trading_api || self.market_data
    }

    pub fn voice_configured(&self) -> bool {
        self.voice_key && self.voice_id
    }

    pub fn market_configured(&self) -> bool {
        self.polygon
    }

    pub fn news_configured(&self) -> bool {
        self.news
    }

    pub fn reddit_configured(&self) -> bool {
        self.reddit_id && self.reddit_secret
    }

    pub fn database_configured(&self) -> bool {
        self.database
    }

    /// The app counts as usable once either an AI provider or a trading data
    /// source is credentialed. Single authoritative formula; any change goes
    /// here and in the truth-table test below.
    pub fn ready(&self) -> bool {
        self.ai_configured() || self.trading_configured()
    }

    /// The `configuration` section of GET /api/config/status.
    pub fn summary(&self) -> JsonValue {
        json!({
            "trading": {
                "configured": self.trading_configured(),
                "hasApiKey": self.trading_api,
                "hasMarketData": self.market_data,
            },
            "ai": {
                "openai": self.openai,
                "anthropic": self.anthropic,
                "configured": self.ai_configured(),
            },
            "services": {
                "news": self.news_configured(),
                "reddit": self.reddit_configured(),
                "database": self.database_configured(),
            },
        })
    }
}

/// How handlers obtain the current [`ConfigStatus`]. The live variant reads
/// the environment fresh on every call; `Fixed` pins a status for tests.
#[derive(Debug, Clone)]
pub enum ConfigGate {
    Env,
    Fixed(ConfigStatus),
}

impl ConfigGate {
    pub fn status(&self) -> ConfigStatus {
        match self {
            ConfigGate::Env => ConfigStatus::from_env(),
            ConfigGate::Fixed(s) => *s,
        }
    }
}
