//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;

/// Commentary collaborator settings.
#[derive(Debug, Clone)]
pub struct CommentaryConfig {
    /// Chat-completions endpoint URL of the collaborator.
    pub endpoint: String,

    /// API key. `None` disables the collaborator; commentary requests then
    /// answer with the fallback line.
    pub api_key: Option<String>,

    /// Model identifier sent with each request.
    pub model: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Commentary collaborator settings.
    pub commentary: CommentaryConfig,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let commentary = CommentaryConfig {
            endpoint: std::env::var("COMMENTARY_ENDPOINT").unwrap_or_else(|_| {
                "https://api.openai.com/v1/chat/completions".to_string()
            }),
            api_key: std::env::var("COMMENTARY_API_KEY").ok(),
            model: std::env::var("COMMENTARY_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            timeout_secs: parse_env("COMMENTARY_TIMEOUT_SECS", 10),
        };

        Ok(Self {
            listen_addr,
            commentary,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
