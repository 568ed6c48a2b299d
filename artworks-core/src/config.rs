use crate::error::CatalogError;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";
/// Rows per page, mirrored by the `limit` query parameter sent to the API.
pub const PAGE_SIZE: usize = 12;
pub const DEFAULT_USER_AGENT: &str = "artworks-core/0.1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(100);

/// Settings for talking to the artwork catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub page_size: usize,
    pub user_agent: String,
    /// `None` disables the per-request timeout.
    pub request_timeout: Option<Duration>,
    /// Minimum spacing between two requests from the same client.
    pub cooldown: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: PAGE_SIZE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Some(DEFAULT_TIMEOUT),
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

impl CatalogConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.page_size == 0 {
            return Err(CatalogError::Config("page size must be positive".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(CatalogError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Endpoint for the artwork listing, without query parameters.
    pub fn artworks_url(&self) -> String {
        format!("{}/artworks", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.artworks_url(), "https://api.artic.edu/api/v1/artworks");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_trailing_slash_and_validation() {
        let config = CatalogConfig::default().with_base_url("http://127.0.0.1:8080/api/");
        assert_eq!(config.artworks_url(), "http://127.0.0.1:8080/api/artworks");

        let bad = CatalogConfig::default().with_base_url("ftp://example.com");
        assert!(matches!(bad.validate(), Err(CatalogError::Config(_))));

        let zero = CatalogConfig {
            page_size: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());
    }
}
