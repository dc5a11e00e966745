//! Resource owner profile.
//!
//! A read-only view over the authenticated user's profile as returned by
//! the platform's `/admin/rest/v1/me` endpoint. The profile is re-fetched
//! per need; it is persisted only alongside the token by the storage layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// The authenticated user's profile fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceOwner {
    raw: Map<String, Value>,
}

impl ResourceOwner {
    /// Builds a resource owner from the parsed identity response.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(raw) => Ok(Self { raw }),
            other => Err(Error::invalid_response(format!(
                "resource owner response is not an object: {}",
                other
            ))),
        }
    }

    fn field_str(&self, key: &str) -> Option<String> {
        match self.raw.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// The owner's identity key (user-product pairing).
    pub fn key(&self) -> Option<String> {
        self.field_str("key")
    }

    /// The owner's account key.
    pub fn account_key(&self) -> Option<String> {
        self.field_str("accountKey")
    }

    /// The owner's email address.
    pub fn email(&self) -> Option<String> {
        self.field_str("email")
    }

    /// The owner's first name.
    pub fn first_name(&self) -> Option<String> {
        self.field_str("firstName")
    }

    /// The owner's last name.
    pub fn last_name(&self) -> Option<String> {
        self.field_str("lastName")
    }

    /// The owner's geographical locale.
    pub fn locale(&self) -> Option<String> {
        self.field_str("locale")
    }

    /// Account creation time, epoch milliseconds.
    pub fn create_time(&self) -> Option<i64> {
        self.raw.get("createTime").and_then(Value::as_i64)
    }

    /// All profile fields as returned by the identity endpoint.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Consumes the view and returns the raw claim map.
    pub fn into_raw(self) -> Map<String, Value> {
        self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_owner() -> ResourceOwner {
        ResourceOwner::from_value(json!({
            "key": "5242356755789656512",
            "accountKey": "3533365456698298798",
            "email": "myname@company.com",
            "firstName": "Company",
            "lastName": "Training",
            "locale": "it_IT",
            "createTime": 1506076497748i64,
            "products": ["G2W", "G2M"]
        }))
        .unwrap()
    }

    #[test]
    fn typed_getters() {
        let owner = sample_owner();
        assert_eq!(owner.key().as_deref(), Some("5242356755789656512"));
        assert_eq!(owner.account_key().as_deref(), Some("3533365456698298798"));
        assert_eq!(owner.email().as_deref(), Some("myname@company.com"));
        assert_eq!(owner.first_name().as_deref(), Some("Company"));
        assert_eq!(owner.last_name().as_deref(), Some("Training"));
        assert_eq!(owner.locale().as_deref(), Some("it_IT"));
        assert_eq!(owner.create_time(), Some(1506076497748));
    }

    #[test]
    fn numeric_key_renders_as_string() {
        let owner = ResourceOwner::from_value(json!({"key": 5242356755789656512i64})).unwrap();
        assert_eq!(owner.key().as_deref(), Some("5242356755789656512"));
    }

    #[test]
    fn raw_map_keeps_unmapped_fields() {
        let owner = sample_owner();
        assert_eq!(owner.raw()["products"][0], "G2W");
    }

    #[test]
    fn non_object_response_is_an_error() {
        assert!(ResourceOwner::from_value(json!(["not", "an", "object"])).is_err());
        assert!(ResourceOwner::from_value(Value::Null).is_err());
    }
}
