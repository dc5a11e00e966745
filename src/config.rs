//! Client configuration.

use std::time::Duration;

use url::Url;

/// The production authentication and API host.
pub const DEFAULT_DOMAIN: &str = "https://api.getgo.com";

/// Configuration for the GoToWebinar provider.
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth client ID from the GoTo developer portal.
    pub client_id: String,

    /// OAuth client secret.
    pub client_secret: String,

    /// Redirect URI registered for the OAuth application.
    pub redirect_uri: String,

    /// Base URL for both the OAuth endpoints and the REST API.
    ///
    /// Defaults to [`DEFAULT_DOMAIN`]; override for testing.
    pub domain: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Config {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a configuration with the given OAuth application settings.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            domain: DEFAULT_DOMAIN.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("gotowebinar/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the base domain, trimming any trailing slash.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        self.domain = domain.trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.client_id.is_empty() {
            return Err("client_id is required".to_string());
        }
        if self.client_secret.is_empty() {
            return Err("client_secret is required".to_string());
        }
        if self.redirect_uri.is_empty() {
            return Err("redirect_uri is required".to_string());
        }
        Url::parse(&self.domain).map_err(|e| format!("invalid domain: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::new("client-id", "client-secret", "https://app.example.com/callback")
    }

    #[test]
    fn config_defaults() {
        let config = test_config();
        assert_eq!(config.domain, DEFAULT_DOMAIN);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn domain_trailing_slash_is_trimmed() {
        let config = test_config().with_domain("https://stage.getgo.com/");
        assert_eq!(config.domain, "https://stage.getgo.com");
    }

    #[test]
    fn validation_rejects_missing_fields() {
        assert!(Config::new("", "secret", "uri").validate().is_err());
        assert!(Config::new("id", "", "uri").validate().is_err());
        assert!(Config::new("id", "secret", "").validate().is_err());
    }

    #[test]
    fn validation_rejects_unparseable_domain() {
        let config = test_config().with_domain("not a url");
        assert!(config.validate().is_err());
    }

    #[test]
    fn builder_methods() {
        let config = test_config()
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("acme-integration/1.0");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "acme-integration/1.0");
    }
}
