use std::{env, str::FromStr, time::Duration};
use url::Url;

/// Outbound calls to the backend are bounded by this, it is not configurable.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub backend_url: Url,
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
}

trait FromEnvWithDefault: Sized {
    fn from_env_or_default(key: &str, default: Self) -> Self;
}

impl FromEnvWithDefault for u16 {
    fn from_env_or_default(key: &str, default: Self) -> Self {
        env::var(key)
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(default)
    }
}

impl FromEnvWithDefault for usize {
    fn from_env_or_default(key: &str, default: Self) -> Self {
        env::var(key)
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(default)
    }
}

impl FromEnvWithDefault for String {
    fn from_env_or_default(key: &str, default: Self) -> Self {
        env::var(key).unwrap_or(default)
    }
}

impl FromEnvWithDefault for Url {
    fn from_env_or_default(key: &str, default: Self) -> Self {
        match env::var(key) {
            Ok(val) => match Url::from_str(val.trim()) {
                Ok(url) if !url.cannot_be_a_base() => url,
                _ => {
                    tracing::warn!("invalid {}: {}, fallback to {}", key, val, default);
                    default
                }
            },
            Err(_) => default,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let default_backend =
            Url::parse(DEFAULT_BACKEND_URL).expect("default backend url must be valid");

        Self {
            host: String::from_env_or_default("HOST", "0.0.0.0".into()),
            port: u16::from_env_or_default("PORT", 3000),
            backend_url: Url::from_env_or_default("LOCAL_BACKEND_URL", default_backend),
            request_timeout: REQUEST_TIMEOUT,
            max_upload_bytes: usize::from_env_or_default("MAX_UPLOAD_BYTES", 32 * 1024 * 1024),
        }
    }

    /// Config pointing at the given backend, everything else at its default.
    pub fn with_backend(backend_url: Url) -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            backend_url,
            request_timeout: REQUEST_TIMEOUT,
            max_upload_bytes: 32 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_from_env_rejects_non_base_urls() {
        let default = Url::parse(DEFAULT_BACKEND_URL).unwrap();

        env::set_var("TRYON_TEST_BACKEND_URL", "mailto:someone@example.com");
        let url = Url::from_env_or_default("TRYON_TEST_BACKEND_URL", default.clone());
        assert_eq!(url, default);

        env::set_var("TRYON_TEST_BACKEND_URL", " https://tryon.example.com/api ");
        let url = Url::from_env_or_default("TRYON_TEST_BACKEND_URL", default.clone());
        assert_eq!(url.as_str(), "https://tryon.example.com/api");

        env::remove_var("TRYON_TEST_BACKEND_URL");
        let url = Url::from_env_or_default("TRYON_TEST_BACKEND_URL", default.clone());
        assert_eq!(url, default);
    }

    #[test]
    fn timeout_is_fixed() {
        let config = AppConfig::with_backend(Url::parse("http://backend:8000").unwrap());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
