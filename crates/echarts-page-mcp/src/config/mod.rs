//! Configuration resolution — an immutable environment snapshot with CLI
//! overrides, taken once at startup and passed explicitly to the components
//! that need it.

use std::path::PathBuf;

/// Default listen port for the SSE endpoint and static file server.
pub const DEFAULT_PORT: u16 = 8989;

/// Default content directory for generated pages.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Default log level when neither `--log-level` nor `LOG_LEVEL` is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Immutable process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Content root; generated pages land in `<static_dir>/charts`.
    pub static_dir: PathBuf,
    /// Port both the SSE endpoint and the static server listen on.
    pub port: u16,
    /// Externally visible base for returned chart URLs.
    pub public_url: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Config {
    /// Resolve configuration: CLI overrides win over environment variables
    /// (`STATIC_DIR`, `PORT`, `PUBLIC_URL`, `LOG_LEVEL`), which win over
    /// defaults. An unparseable `PORT` falls back to the default, and the
    /// public URL defaults to `http://localhost:<port>`.
    pub fn resolve(
        static_dir: Option<PathBuf>,
        port: Option<u16>,
        public_url: Option<String>,
        log_level: Option<String>,
    ) -> Self {
        let static_dir = static_dir
            .or_else(|| std::env::var("STATIC_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let port = port
            .or_else(|| std::env::var("PORT").ok().and_then(|v| v.parse().ok()))
            .unwrap_or(DEFAULT_PORT);

        let public_url = public_url
            .or_else(|| std::env::var("PUBLIC_URL").ok())
            .unwrap_or_else(|| format!("http://localhost:{port}"));

        let log_level = log_level
            .or_else(|| std::env::var("LOG_LEVEL").ok())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Self {
            static_dir,
            port,
            public_url,
            log_level,
        }
    }

    /// Resolve from the environment alone.
    pub fn from_env() -> Self {
        Self::resolve(None, None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values_win() {
        let config = Config::resolve(
            Some(PathBuf::from("/tmp/pages")),
            Some(9001),
            Some("https://charts.example.com".to_string()),
            Some("debug".to_string()),
        );
        assert_eq!(config.static_dir, PathBuf::from("/tmp/pages"));
        assert_eq!(config.port, 9001);
        assert_eq!(config.public_url, "https://charts.example.com");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_public_url_derives_from_port() {
        let config = Config::resolve(None, Some(9100), None, None);
        assert_eq!(config.public_url, "http://localhost:9100");
    }
}
