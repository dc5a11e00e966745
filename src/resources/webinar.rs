//! Webinar operations.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use reqwest::Method;
use serde_json::Value;

use crate::error::Result;
use crate::provider::GotoWebinar;
use crate::resultset::ResultSet;
use crate::token::AccessToken;

use super::{DEFAULT_WINDOW_DAYS, ResourceContext, window_query};

const WEBINARS: &str = "/organizers/{organizerKey}/webinars";
const WEBINAR: &str = "/organizers/{organizerKey}/webinars/{webinarKey}";
const ACCOUNT_WEBINARS: &str = "/accounts/{accountKey}/webinars";

/// Proxy for the organizer's webinars.
#[derive(Debug)]
pub struct Webinar {
    ctx: ResourceContext,
}

impl Webinar {
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

    /// Lists all webinars in the default window of ±3 years from now.
    pub async fn all(&self) -> Result<ResultSet> {
        let url = self
            .ctx
            .request_url(WEBINARS, &[], &window_query(None, None, None, None))?;
        let value = self.ctx.execute(Method::GET, &url, None).await?;
        Ok(ResultSet::paged(value, "webinars"))
    }

    /// Lists the webinars of every organizer on the account, in the
    /// given window (defaults: ±3 years from now, page 0, size 100).
    ///
    /// Requires a corporate account; the token must carry an account key.
    pub async fn account_webinars(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Result<ResultSet> {
        let query = window_query(from, to, page, size);
        let url = self.ctx.request_url(ACCOUNT_WEBINARS, &[], &query)?;
        let value = self.ctx.execute(Method::GET, &url, None).await?;
        Ok(ResultSet::paged(value, "webinars"))
    }

    /// Lists webinars scheduled between now and three years ahead.
    pub async fn upcoming(&self) -> Result<ResultSet> {
        let now = Utc::now();
        let query = window_query(
            Some(now),
            Some(now + Duration::days(DEFAULT_WINDOW_DAYS)),
            None,
            None,
        );
        let url = self.ctx.request_url(WEBINARS, &[], &query)?;
        let value = self.ctx.execute(Method::GET, &url, None).await?;
        Ok(ResultSet::paged(value, "webinars"))
    }

    /// Lists webinars between `from` and `to` (defaulting to now).
    pub async fn past(
        &self,
        from: DateTime<Utc>,
        to: Option<DateTime<Utc>>,
    ) -> Result<ResultSet> {
        let query = window_query(Some(from), Some(to.unwrap_or_else(Utc::now)), None, None);
        let url = self.ctx.request_url(WEBINARS, &[], &query)?;
        let value = self.ctx.execute(Method::GET, &url, None).await?;
        Ok(ResultSet::paged(value, "webinars"))
    }

    /// Fetches a single webinar by its key.
    pub async fn get(&self, webinar_key: &str) -> Result<ResultSet> {
        let url = self
            .ctx
            .request_url(WEBINAR, &[("webinarKey", webinar_key)], &[])?;
        let value = self.ctx.execute(Method::GET, &url, None).await?;
        Ok(ResultSet::simple(value))
    }

    /// Creates a new webinar; the response carries the new `webinarKey`.
    pub async fn create(&self, body: &Value) -> Result<ResultSet> {
        let url = self.ctx.request_url(WEBINARS, &[], &[])?;
        let value = self.ctx.execute(Method::POST, &url, Some(body)).await?;
        Ok(ResultSet::simple(value))
    }

    /// Updates an existing webinar.
    pub async fn update(&self, webinar_key: &str, body: &Value) -> Result<ResultSet> {
        let url = self
            .ctx
            .request_url(WEBINAR, &[("webinarKey", webinar_key)], &[])?;
        let value = self.ctx.execute(Method::PUT, &url, Some(body)).await?;
        Ok(ResultSet::simple(value))
    }

    /// Cancels a webinar, optionally notifying registrants by email.
    pub async fn delete(
        &self,
        webinar_key: &str,
        send_cancellation_emails: bool,
    ) -> Result<ResultSet> {
        let query = vec![(
            "sendCancellationEmails".to_string(),
            send_cancellation_emails.to_string(),
        )];
        let url = self
            .ctx
            .request_url(WEBINAR, &[("webinarKey", webinar_key)], &query)?;
        let value = self.ctx.execute(Method::DELETE, &url, None).await?;
        Ok(ResultSet::simple(value))
    }
}
