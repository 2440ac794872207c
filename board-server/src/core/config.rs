//! Server configuration

use shared::localization::normalize_language;

/// Default Groq model when none is configured
pub const DEFAULT_GROQ_MODEL: &str = "openai/gpt-oss-120b";

/// Server configuration - all settings of the board gateway
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 8000 | HTTP API port |
/// | APP_MODE | dev | `dev` selects the mock POS client |
/// | LANGUAGE | pt-br | message language tag |
/// | FRONTEND_ALLOWED_ORIGINS | http://localhost:3000 | comma-separated CORS origins |
/// | POS_SERVICE_URL | http://localhost:8005 | POS bridge base URL |
/// | AUTH_SERVER_URL | http://localhost:8005 | token service base URL |
/// | GROQ_API_KEY | (unset) | text-generation credential |
/// | GROQ_MODEL_NAME | openai/gpt-oss-120b | text-generation model |
/// | MESSAGE_DIR | . | where comanda_{id}.txt files land |
/// | LOG_LEVEL | info | default tracing filter |
/// | LOG_DIR | (unset) | enable rolling file logs |
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Operating mode: dev | prod
    pub app_mode: String,
    /// Normalized message language tag
    pub language: String,
    /// CORS origins allowed for the frontend monitor
    pub frontend_allowed_origins: Vec<String>,
    /// POS bridge base URL (prod mode)
    pub pos_service_url: String,
    /// Auth/token service base URL (prod mode)
    pub auth_server_url: String,
    /// Text-generation credential
    pub groq_api_key: Option<String>,
    /// Text-generation model name
    pub groq_model_name: String,
    /// Directory the generated messages are persisted into
    pub message_dir: String,
    /// Default log level when RUST_LOG is unset
    pub log_level: String,
    /// Optional directory for rolling file logs
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            app_mode: std::env::var("APP_MODE").unwrap_or_else(|_| "dev".into()),
            language: normalize_language(std::env::var("LANGUAGE").ok().as_deref()).to_string(),
            frontend_allowed_origins: parse_origins(
                std::env::var("FRONTEND_ALLOWED_ORIGINS").ok().as_deref(),
            ),
            pos_service_url: std::env::var("POS_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8005".into()),
            auth_server_url: std::env::var("AUTH_SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:8005".into()),
            groq_api_key: std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty()),
            groq_model_name: std::env::var("GROQ_MODEL_NAME")
                .ok()
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_GROQ_MODEL.into()),
            message_dir: std::env::var("MESSAGE_DIR").unwrap_or_else(|_| ".".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Override port and mode, keeping the rest from the environment
    ///
    /// Mostly useful in tests
    pub fn with_overrides(http_port: u16, app_mode: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.app_mode = app_mode.into();
        config
    }

    /// Whether the mock POS client should be used
    pub fn is_development(&self) -> bool {
        self.app_mode.eq_ignore_ascii_case("dev")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Split comma-separated origins, falling back to localhost
fn parse_origins(raw: Option<&str>) -> Vec<String> {
    let origins: Vec<String> = raw
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();
    if origins.is_empty() {
        vec!["http://localhost:3000".to_string()]
    } else {
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_default_to_localhost() {
        assert_eq!(parse_origins(None), vec!["http://localhost:3000"]);
        assert_eq!(parse_origins(Some("  ")), vec!["http://localhost:3000"]);
    }

    #[test]
    fn origins_split_and_trim() {
        assert_eq!(
            parse_origins(Some("http://a:3000, http://b:4000 ,")),
            vec!["http://a:3000", "http://b:4000"]
        );
    }
}
