//! Demo trading-dashboard backend: mock market/news/sentiment/voice/AI
//! endpoints behind per-integration environment gating, an in-memory fixture
//! store, and a shared-password session registry.

pub mod auth;
pub mod config;
pub mod error;
pub mod evon;
pub mod market;
pub mod news;
pub mod reddit;
pub mod server;
pub mod store;
pub mod utils;
pub mod voice;

pub use config::{ConfigGate, ConfigStatus, Settings};
pub use server::{build_router, AppState};
