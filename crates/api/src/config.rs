//! Application configuration loaded from environment variables.

/// Server configuration.
///
/// Environment variables:
/// - `HOST` — bind address (default `"0.0.0.0"`)
/// - `PORT` — listen port (default `3000`)
/// - `RUST_LOG` — tracing filter directive (default `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_filter: String,
}

impl Config {
    /// Reads the environment, falling back to defaults for anything unset
    /// or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_filter: std::env::var("RUST_LOG").unwrap_or(defaults.log_filter),
        }
    }

    /// The `"host:port"` bind address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_filter: "info".to_string(),
        }
    }
}
