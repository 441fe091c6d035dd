use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a default; the semantic provider is only enabled when
/// `EMBEDDING_API_URL` is set.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Profile document to load instead of the bundled one.
    pub profile_path: Option<PathBuf>,
    pub embedding: Option<EmbeddingConfig>,
    pub semantic_timeout: Duration,
    pub max_batch_size: usize,
}

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let embedding = optional_env("EMBEDDING_API_URL").map(|api_url| EmbeddingConfig {
            api_url,
            api_key: optional_env("EMBEDDING_API_KEY"),
            model: optional_env("EMBEDDING_MODEL")
                .unwrap_or_else(|| "all-MiniLM-L6-v2".to_string()),
        });

        Ok(Config {
            port: parse_env("PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            profile_path: optional_env("PROFILE_PATH").map(PathBuf::from),
            embedding,
            semantic_timeout: Duration::from_millis(
                parse_env("SEMANTIC_TIMEOUT_MS", 5000u64)
                    .context("SEMANTIC_TIMEOUT_MS must be a number of milliseconds")?,
            ),
            max_batch_size: parse_env("MAX_BATCH_SIZE", 100usize)
                .context("MAX_BATCH_SIZE must be a positive integer")?,
        })
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u64 = parse_env("JOBFIT_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("JOBFIT_TEST_GARBAGE_PORT", "eighty");
        assert!(parse_env("JOBFIT_TEST_GARBAGE_PORT", 8080u16).is_err());
    }

    #[test]
    fn test_blank_env_is_absent() {
        std::env::set_var("JOBFIT_TEST_BLANK", "   ");
        assert_eq!(optional_env("JOBFIT_TEST_BLANK"), None);
    }
}
