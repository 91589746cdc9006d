use anyhow::{bail, Context, Result};

/// Application configuration loaded once at startup from environment variables.
/// Handlers never read the environment; everything flows through this struct.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Credential for the text-generation API. Required unless fallback mode
    /// is enabled, in which case the service runs on synthetic output only.
    pub model_api_key: Option<String>,
    pub model_name: String,
    pub fallback_enabled: bool,
    /// Upper bound on a single model call. Expiry is a ModelUnavailable failure.
    pub request_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let model_api_key = std::env::var("MODEL_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let fallback_enabled = std::env::var("FALLBACK_ENABLED")
            .map(|v| parse_bool(&v))
            .unwrap_or(false);

        if model_api_key.is_none() && !fallback_enabled {
            bail!("MODEL_API_KEY is not set and FALLBACK_ENABLED is false; set a credential or enable fallback mode");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            model_api_key,
            model_name: std::env::var("MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            fallback_enabled,
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_truthy_values() {
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(parse_bool("yes"));
    }

    #[test]
    fn test_parse_bool_falsy_values() {
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool(""));
        assert!(!parse_bool("enabled"));
    }
}
