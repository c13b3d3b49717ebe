use std::env;

use little_chat_core::ControllerBuilder;
use little_chat_http_backend::{
    HttpBackend, HttpBackendConfig, HttpBackendConfigBuilder,
};

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "LITTLE_CHAT_BASE_URL";

/// Settings of the chat client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    backend: HttpBackendConfig,
}

impl Config {
    /// Reads the settings from the process environment.
    #[inline]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut builder = HttpBackendConfigBuilder::new();
        if let Some(base_url) =
            lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty())
        {
            builder = builder.with_base_url(base_url.trim());
        }
        Self {
            backend: builder.build(),
        }
    }

    /// Returns the base URL of the backend.
    #[inline]
    pub fn base_url(&self) -> &str {
        self.backend.base_url()
    }

    /// Creates a controller builder talking to the configured backend.
    #[inline]
    pub fn controller_builder(&self) -> ControllerBuilder {
        ControllerBuilder::with_backend(HttpBackend::new(self.backend.clone()))
    }
}

#[cfg(test)]
mod tests {
    use little_chat_http_backend::DEFAULT_BASE_URL;

    use super::*;

    #[test]
    fn test_default_base_url() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);

        let config = Config::from_lookup(|_| Some("  ".to_owned()));
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_from_env() {
        let config = Config::from_lookup(|key| {
            (key == BASE_URL_ENV)
                .then(|| "https://chat.example.com/api/".to_owned())
        });
        assert_eq!(config.base_url(), "https://chat.example.com/api");
    }

    #[tokio::test]
    async fn test_controller_builder() {
        let controller = Config::from_lookup(|_| None).controller_builder().build();
        assert!(controller.session_id().as_str().starts_with("user_"));
        controller.shutdown();
    }
}
