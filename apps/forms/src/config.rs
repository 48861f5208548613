use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

/// Client configuration loaded from environment variables.
/// Fails at startup if `API_BASE_URL` is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    pub rust_log: String,
    /// Resume to preview on startup, if any.
    pub resume_id: Option<String>,
    /// Employer profile to preview on startup, if any.
    pub employer_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            api_base_url: parse_base_url(&require_env("API_BASE_URL")?)?,
            api_token: optional_env("API_TOKEN"),
            request_timeout: Duration::from_secs(timeout_secs),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            resume_id: optional_env("RESUME_ID"),
            employer_id: optional_env("EMPLOYER_ID"),
        })
    }
}

/// Parses the API base URL, forcing a trailing slash so relative joins
/// keep the last path segment (`/api` + `resumes/1` → `/api/resumes/1`).
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw).with_context(|| format!("API_BASE_URL '{raw}' is not a valid URL"))
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("https://api.example.com/api").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/");
        assert_eq!(
            url.join("resumes/42").unwrap().as_str(),
            "https://api.example.com/api/resumes/42"
        );
    }

    #[test]
    fn test_parse_base_url_keeps_existing_slash() {
        let url = parse_base_url("http://localhost:5000/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(parse_base_url("not a url").is_err());
    }
}
