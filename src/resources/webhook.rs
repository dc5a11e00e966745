//! Webhook operations.
//!
//! Webhooks live at the account level under a top-level `/webhooks`
//! collection rather than an organizer path.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_json::{Value, json};

use crate::error::Result;
use crate::provider::GotoWebinar;
use crate::resultset::ResultSet;
use crate::time::date_to_utc;
use crate::token::AccessToken;

use super::ResourceContext;

const WEBHOOKS: &str = "/webhooks";
const WEBHOOK: &str = "/webhooks/{webhookKey}";
const SECRET_KEY: &str = "/webhooks/secretkey";

/// Product identifier sent when listing webhooks.
const PRODUCT: &str = "g2w";

/// Proxy for event webhooks.
#[derive(Debug)]
pub struct Webhook {
    ctx: ResourceContext,
}

impl Webhook {
    /// Binds the proxy to a provider and access token.
    pub fn new(provider: Arc<GotoWebinar>, token: AccessToken) -> Self {
        Self {
            ctx: ResourceContext::new(provider, token),
        }
    }

    /// Returns the access token this proxy is bound to.
    pub fn token(&self) -> &AccessToken {
        self.ctx.token()
    }

    /// Creates a signing secret key, active from the given time
    /// (defaulting to now).
    pub async fn create_secret_key(
        &self,
        valid_from: Option<DateTime<Utc>>,
    ) -> Result<ResultSet> {
        let body = json!({
            "validFrom": date_to_utc(&valid_from.unwrap_or_else(Utc::now)),
        });
        let url = self.ctx.request_url(SECRET_KEY, &[], &[])?;
        let value = self.ctx.execute(Method::POST, &url, Some(&body)).await?;
        Ok(ResultSet::simple(value))
    }

    /// Creates webhooks for the given callback URLs and event names.
    pub async fn create(&self, body: &Value) -> Result<ResultSet> {
        let url = self.ctx.request_url(WEBHOOKS, &[], &[])?;
        let value = self.ctx.execute(Method::POST, &url, Some(body)).await?;
        Ok(ResultSet::paged(value, "webhooks"))
    }

    /// Updates callback URLs or states of existing webhooks.
    pub async fn update(&self, body: &Value) -> Result<ResultSet> {
        let url = self.ctx.request_url(WEBHOOKS, &[], &[])?;
        let value = self.ctx.execute(Method::PUT, &url, Some(body)).await?;
        Ok(ResultSet::simple(value))
    }

    /// Lists every webhook created for this product.
    pub async fn all(&self) -> Result<ResultSet> {
        let query = vec![("product".to_string(), PRODUCT.to_string())];
        let url = self.ctx.request_url(WEBHOOKS, &[], &query)?;
        let value = self.ctx.execute(Method::GET, &url, None).await?;
        Ok(ResultSet::paged(value, "webhooks"))
    }

    /// Fetches a single webhook.
    pub async fn get(&self, webhook_key: &str) -> Result<ResultSet> {
        let url = self
            .ctx
            .request_url(WEBHOOK, &[("webhookKey", webhook_key)], &[])?;
        let value = self.ctx.execute(Method::GET, &url, None).await?;
        Ok(ResultSet::simple(value))
    }

    /// Deletes the webhooks with the given keys.
    pub async fn delete(&self, webhook_keys: &Value) -> Result<ResultSet> {
        let url = self.ctx.request_url(WEBHOOKS, &[], &[])?;
        let value = self
            .ctx
            .execute(Method::DELETE, &url, Some(webhook_keys))
            .await?;
        Ok(ResultSet::simple(value))
    }
}
