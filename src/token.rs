//! Access tokens and their vendor claims.
//!
//! The token endpoint returns the standard OAuth fields alongside a set of
//! vendor claims (organizer key, account key, user identity). [`AccessToken`]
//! keeps those claims and exposes them through typed accessors instead of
//! runtime dispatch. Tokens are immutable once issued; a refresh produces a
//! new token rather than mutating the old one.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Early-refresh buffer subtracted from the reported token lifetime.
const EXPIRY_BUFFER_SECS: i64 = 60;

/// An OAuth access token with its vendor claim map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// The bearer token for API requests.
    pub access_token: String,

    /// The refresh token for obtaining a replacement token.
    pub refresh_token: Option<String>,

    /// When the access token expires.
    pub expires_at: Option<DateTime<Utc>>,

    /// Vendor claims returned by the token endpoint.
    #[serde(default)]
    pub claims: Map<String, Value>,
}

impl AccessToken {
    /// Builds a token from a parsed token-endpoint response.
    ///
    /// `expires_in` is converted to an absolute expiry with a buffer so
    /// the token refreshes shortly before its actual expiry.
    pub(crate) fn from_response(response: TokenResponse) -> Self {
        let expires_at = response.expires_in.map(|secs| {
            Utc::now() + Duration::seconds(secs) - Duration::seconds(EXPIRY_BUFFER_SECS)
        });

        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at,
            claims: response.claims,
        }
    }

    /// Returns true if the access token is expired or about to expire.
    ///
    /// Tokens without a known expiry are assumed valid.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() >= expires_at,
            None => false,
        }
    }

    /// Returns a raw claim value.
    pub fn claim(&self, key: &str) -> Option<&Value> {
        self.claims.get(key)
    }

    /// Returns a claim as a string, rendering numeric claims verbatim.
    fn claim_str(&self, key: &str) -> Option<String> {
        match self.claims.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// The organizer key of the authenticated user.
    pub fn organizer_key(&self) -> Option<String> {
        self.claim_str("organizer_key")
    }

    /// The account key (may be blank for personal accounts).
    pub fn account_key(&self) -> Option<String> {
        self.claim_str("account_key")
    }

    /// The account type, "personal" or "corporate" (may be missing).
    pub fn account_type(&self) -> Option<String> {
        self.claim_str("account_type")
    }

    /// The organizer's first name.
    pub fn first_name(&self) -> Option<String> {
        self.claim_str("firstName")
    }

    /// The organizer's last name.
    pub fn last_name(&self) -> Option<String> {
        self.claim_str("lastName")
    }

    /// The organizer's email address.
    pub fn email(&self) -> Option<String> {
        self.claim_str("email")
    }

    /// The token type (always "Bearer").
    pub fn token_type(&self) -> Option<String> {
        self.claim_str("token_type")
    }

    /// The version of the access token.
    pub fn version(&self) -> Option<String> {
        self.claim_str("version")
    }
}

/// Wire shape of the token endpoint response.
///
/// Everything beyond the standard OAuth fields lands in the claim map.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default, deserialize_with = "expires_in_seconds")]
    pub expires_in: Option<i64>,
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

/// The token endpoint reports `expires_in` as a number or numeric string
/// depending on the grant; accept both.
fn expires_in_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_response() -> TokenResponse {
        serde_json::from_value(json!({
            "access_token": "at-1",
            "token_type": "Bearer",
            "refresh_token": "rt-1",
            "expires_in": 3600,
            "organizer_key": "300000000000123456",
            "account_key": "300000000000654321",
            "account_type": "corporate",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "version": "2"
        }))
        .unwrap()
    }

    #[test]
    fn token_from_response() {
        let token = AccessToken::from_response(sample_response());
        assert_eq!(token.access_token, "at-1");
        assert_eq!(token.refresh_token.as_deref(), Some("rt-1"));
        assert!(token.expires_at.is_some());
        assert!(!token.is_expired());
    }

    #[test]
    fn vendor_claim_accessors() {
        let token = AccessToken::from_response(sample_response());
        assert_eq!(token.organizer_key().as_deref(), Some("300000000000123456"));
        assert_eq!(token.account_key().as_deref(), Some("300000000000654321"));
        assert_eq!(token.account_type().as_deref(), Some("corporate"));
        assert_eq!(token.first_name().as_deref(), Some("Ada"));
        assert_eq!(token.last_name().as_deref(), Some("Lovelace"));
        assert_eq!(token.email().as_deref(), Some("ada@example.com"));
        assert_eq!(token.token_type().as_deref(), Some("Bearer"));
        assert_eq!(token.version().as_deref(), Some("2"));
    }

    #[test]
    fn numeric_claims_render_as_strings() {
        let response: TokenResponse = serde_json::from_value(json!({
            "access_token": "at-1",
            "organizer_key": 300000000000123456i64
        }))
        .unwrap();
        let token = AccessToken::from_response(response);
        assert_eq!(token.organizer_key().as_deref(), Some("300000000000123456"));
    }

    #[test]
    fn expires_in_accepts_numeric_string() {
        let response: TokenResponse = serde_json::from_value(json!({
            "access_token": "at-1",
            "expires_in": "3600"
        }))
        .unwrap();
        assert_eq!(response.expires_in, Some(3600));
    }

    #[test]
    fn token_without_expiry_is_not_expired() {
        let response: TokenResponse =
            serde_json::from_value(json!({"access_token": "at-1"})).unwrap();
        let token = AccessToken::from_response(response);
        assert!(token.expires_at.is_none());
        assert!(!token.is_expired());
    }

    #[test]
    fn expired_token_detected() {
        let mut token = AccessToken::from_response(sample_response());
        token.expires_at = Some(Utc::now() - Duration::hours(1));
        assert!(token.is_expired());
    }

    #[test]
    fn token_survives_serde_round_trip() {
        let token = AccessToken::from_response(sample_response());
        let json = serde_json::to_string(&token).unwrap();
        let back: AccessToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back.access_token, token.access_token);
        assert_eq!(back.organizer_key(), token.organizer_key());
        assert_eq!(back.expires_at, token.expires_at);
    }
}
