//! The GoToWebinar provider.
//!
//! Owns the endpoint configuration, the HTTP client used for resource
//! requests, and the OAuth grant client. All authenticated traffic funnels
//! through [`GotoWebinar::execute`], which applies the bearer token and
//! classifies the response.

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::oauth::OAuthClient;
use crate::owner::ResourceOwner;
use crate::token::AccessToken;

/// Path prefix of the REST API on the configured domain.
const API_PATH: &str = "/G2W/rest/v2";

/// Path of the resource-owner ("who am I") endpoint.
const RESOURCE_OWNER_PATH: &str = "/admin/rest/v1/me";

/// OAuth2 provider and HTTP gateway for the GoToWebinar platform.
#[derive(Debug)]
pub struct GotoWebinar {
    config: Config,
    http_client: reqwest::Client,
    oauth: OAuthClient,
}

impl GotoWebinar {
    /// Creates a provider from the given configuration.
    pub fn new(config: Config) -> Result<Self> {
        config.validate().map_err(Error::configuration)?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::configuration("failed to create HTTP client").with_source(e))?;

        let oauth = OAuthClient::new(&config)?;

        Ok(Self {
            config,
            http_client,
            oauth,
        })
    }

    /// Returns the provider configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the configured authentication/API host.
    pub fn domain(&self) -> &str {
        &self.config.domain
    }

    /// Returns the REST API base URL.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.config.domain, API_PATH)
    }

    /// Returns the resource-owner details URL.
    pub fn resource_owner_url(&self) -> String {
        format!("{}{}", self.config.domain, RESOURCE_OWNER_PATH)
    }

    /// Builds the authorization URL for the out-of-band consent step.
    pub fn authorize_url(&self, state: &str) -> String {
        self.oauth.authorize_url(state)
    }

    /// Exchanges an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<AccessToken> {
        self.oauth.exchange_code(code).await
    }

    /// Exchanges a refresh token for a new access token.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<AccessToken> {
        self.oauth.refresh_token(refresh_token).await
    }

    /// Fetches the authenticated user's profile.
    ///
    /// Identity endpoint failures belong to the OAuth taxonomy.
    pub async fn resource_owner(&self, token: &AccessToken) -> Result<ResourceOwner> {
        let value = self
            .execute(Method::GET, &self.resource_owner_url(), token, None)
            .await
            .map_err(crate::oauth::reclassify_as_oauth)?;
        ResourceOwner::from_value(value)
    }

    /// Issues one bearer-authenticated request and parses the JSON response.
    ///
    /// This is the single network I/O boundary per resource call: no
    /// retries, no rate limiting, fail-fast.
    pub(crate) async fn execute(
        &self,
        method: Method,
        url: &str,
        token: &AccessToken,
        body: Option<&Value>,
    ) -> Result<Value> {
        debug!(%method, url, "sending API request");

        let mut request = self
            .http_client
            .request(method, url)
            .bearer_auth(&token.access_token)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::network("request timeout")
            } else if e.is_connect() {
                Error::network(format!("connection failed: {}", e))
            } else {
                Error::network(format!("request failed: {}", e))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("failed to read response: {}", e)))?;

        check_response(status, &body)
    }
}

/// Classifies an HTTP response per the vendor's error conventions.
///
/// A status of 400 or above is an API client error carrying the parsed
/// `errorCode` field when present, else the HTTP reason phrase. A
/// successful status whose body contains an `error` field is an OAuth-level
/// error with the same message-extraction rule. Both carry the original
/// status and raw body. Empty bodies parse as `Null`.
pub(crate) fn check_response(status: StatusCode, body: &str) -> Result<Value> {
    let parsed: Option<Value> = if body.trim().is_empty() {
        Some(Value::Null)
    } else {
        serde_json::from_str(body).ok()
    };

    if status.as_u16() >= 400 {
        let message = error_message(parsed.as_ref(), status);
        return Err(Error::api(message)
            .with_status(status.as_u16())
            .with_body(body.to_string()));
    }

    let value = match parsed {
        Some(value) => value,
        None => {
            return Err(Error::invalid_response("response body is not valid JSON")
                .with_status(status.as_u16())
                .with_body(body.to_string()));
        }
    };

    if value.get("error").is_some() {
        let message = error_message(Some(&value), status);
        return Err(Error::oauth(message)
            .with_status(status.as_u16())
            .with_body(body.to_string()));
    }

    Ok(value)
}

/// The vendor `errorCode` field when present, else the HTTP reason phrase.
fn error_message(parsed: Option<&Value>, status: StatusCode) -> String {
    match parsed.and_then(|value| value.get("errorCode")) {
        Some(Value::String(code)) => code.clone(),
        Some(other) => other.to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn test_provider() -> GotoWebinar {
        let config = Config::new("client-id", "client-secret", "https://app.example.com/cb");
        GotoWebinar::new(config).unwrap()
    }

    #[test]
    fn provider_endpoint_urls() {
        let provider = test_provider();
        assert_eq!(provider.api_base(), "https://api.getgo.com/G2W/rest/v2");
        assert_eq!(
            provider.resource_owner_url(),
            "https://api.getgo.com/admin/rest/v1/me"
        );
        assert!(
            provider
                .authorize_url("s")
                .starts_with("https://api.getgo.com/oauth/v2/authorize?")
        );
    }

    #[test]
    fn provider_rejects_invalid_config() {
        let config = Config::new("", "client-secret", "https://app.example.com/cb");
        assert!(GotoWebinar::new(config).is_err());
    }

    #[test]
    fn client_error_uses_error_code_field() {
        let err = check_response(
            StatusCode::NOT_FOUND,
            r#"{"errorCode":"NoSuchWebinar","description":"gone"}"#,
        )
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Api);
        assert_eq!(err.message(), "NoSuchWebinar");
        assert_eq!(err.http_status(), Some(404));
        assert!(err.body().unwrap().contains("NoSuchWebinar"));
    }

    #[test]
    fn client_error_falls_back_to_reason_phrase() {
        let err = check_response(StatusCode::NOT_FOUND, r#"{"description":"gone"}"#).unwrap_err();
        assert_eq!(err.message(), "Not Found");
    }

    #[test]
    fn client_error_with_non_json_body_uses_reason_phrase() {
        let err = check_response(StatusCode::BAD_GATEWAY, "<html>oops</html>").unwrap_err();
        assert_eq!(err.code(), ErrorCode::Api);
        assert_eq!(err.message(), "Bad Gateway");
        assert_eq!(err.body(), Some("<html>oops</html>"));
    }

    #[test]
    fn embedded_error_field_is_oauth_error() {
        let err = check_response(StatusCode::OK, r#"{"error":"invalid_token"}"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::OAuth);
        // Same extraction rule: no errorCode field, so the reason phrase.
        assert_eq!(err.message(), "OK");
        assert_eq!(err.http_status(), Some(200));
    }

    #[test]
    fn embedded_error_prefers_error_code_field() {
        let err = check_response(
            StatusCode::OK,
            r#"{"error":"invalid_token","errorCode":"TokenRevoked"}"#,
        )
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::OAuth);
        assert_eq!(err.message(), "TokenRevoked");
    }

    #[test]
    fn empty_body_parses_as_null() {
        assert_eq!(
            check_response(StatusCode::NO_CONTENT, "").unwrap(),
            Value::Null
        );
    }

    #[test]
    fn success_body_passes_through() {
        let value = check_response(StatusCode::OK, r#"{"webinarKey":"1"}"#).unwrap();
        assert_eq!(value, json!({"webinarKey": "1"}));
    }

    #[test]
    fn malformed_success_body_is_invalid_response() {
        let err = check_response(StatusCode::OK, "not json").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidResponse);
    }
}
