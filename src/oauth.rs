//! OAuth 2.0 grant plumbing for the GoTo authentication host.
//!
//! Implements the two grants this SDK needs: exchanging an authorization
//! code and refreshing an expired token. The token endpoint authenticates
//! the client with HTTP Basic credentials and form-encoded parameters.
//!
//! The interactive part of the flow (sending the user to the consent page
//! and receiving the redirect) happens out-of-band in the host application;
//! this module only builds the authorization URL for it.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng as _;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::provider::check_response;
use crate::token::{AccessToken, TokenResponse};

/// Authorization endpoint path on the authentication host.
const AUTHORIZE_PATH: &str = "/oauth/v2/authorize";

/// Token endpoint path on the authentication host.
const TOKEN_PATH: &str = "/oauth/v2/token";

/// OAuth client for the GoTo authentication host.
#[derive(Debug)]
pub struct OAuthClient {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    domain: String,
    http_client: reqwest::Client,
}

impl OAuthClient {
    /// Creates an OAuth client from the provider configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::configuration("failed to create HTTP client").with_source(e))?;

        Ok(Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            domain: config.domain.clone(),
            http_client,
        })
    }

    /// Builds the authorization URL to which the user is sent for consent.
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}{}?response_type=code&client_id={}&redirect_uri={}&state={}",
            self.domain,
            AUTHORIZE_PATH,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(state),
        )
    }

    /// Generates a random state string for CSRF protection.
    pub fn generate_state() -> String {
        let mut rng = rand::rng();
        let bytes: Vec<u8> = (0..16).map(|_| rng.random()).collect();
        URL_SAFE_NO_PAD.encode(&bytes)
    }

    /// Exchanges an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<AccessToken> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];
        let token = self.token_grant(&params).await?;
        info!("obtained access token from authorization code");
        Ok(token)
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The returned token supersedes the old one; nothing is mutated.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<AccessToken> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];
        let token = self.token_grant(&params).await?;
        info!("refreshed access token");
        Ok(token)
    }

    /// Performs a token-endpoint grant with HTTP Basic client credentials.
    async fn token_grant(&self, params: &[(&str, &str)]) -> Result<AccessToken> {
        let url = format!("{}{}", self.domain, TOKEN_PATH);
        debug!(url, grant = params[0].1, "requesting token grant");

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(params)
            .send()
            .await
            .map_err(|e| Error::network(format!("token request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("failed to read token response: {}", e)))?;

        let value = check_response(status, &body).map_err(reclassify_as_oauth)?;

        let parsed: TokenResponse = serde_json::from_value(value).map_err(|e| {
            Error::invalid_response("malformed token response")
                .with_status(status.as_u16())
                .with_body(body)
                .with_source(e)
        })?;

        Ok(AccessToken::from_response(parsed))
    }
}

/// Failures at the token and identity endpoints are identity-provider
/// errors, even when the transport reported a plain client error.
pub(crate) fn reclassify_as_oauth(err: Error) -> Error {
    match err.code() {
        crate::error::ErrorCode::Api => {
            let mut oauth = Error::oauth(err.message().to_string());
            if let Some(status) = err.http_status() {
                oauth = oauth.with_status(status);
            }
            if let Some(body) = err.body() {
                oauth = oauth.with_body(body.to_string());
            }
            oauth
        }
        _ => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn test_client() -> OAuthClient {
        let config = Config::new(
            "client-id",
            "client-secret",
            "https://app.example.com/oauth return",
        );
        OAuthClient::new(&config).unwrap()
    }

    #[test]
    fn authorize_url_shape() {
        let client = test_client();
        let url = client.authorize_url("xyzzy");
        assert!(url.starts_with("https://api.getgo.com/oauth/v2/authorize?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("state=xyzzy"));
    }

    #[test]
    fn authorize_url_encodes_redirect_uri() {
        let client = test_client();
        let url = client.authorize_url("s");
        // The space in the redirect URI must be percent-encoded.
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Foauth%20return"));
    }

    #[test]
    fn state_is_random() {
        assert_ne!(OAuthClient::generate_state(), OAuthClient::generate_state());
    }

    #[test]
    fn token_failures_are_oauth_errors() {
        let err = Error::api("invalid_grant").with_status(400).with_body("{}");
        let reclassified = reclassify_as_oauth(err);
        assert_eq!(reclassified.code(), ErrorCode::OAuth);
        assert_eq!(reclassified.message(), "invalid_grant");
        assert_eq!(reclassified.http_status(), Some(400));
    }

    #[test]
    fn network_errors_pass_through() {
        let err = Error::network("connection refused");
        assert_eq!(reclassify_as_oauth(err).code(), ErrorCode::Network);
    }
}
