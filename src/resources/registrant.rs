//! Registrant operations.

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;

use crate::error::Result;
use crate::provider::GotoWebinar;
use crate::resultset::ResultSet;
use crate::token::AccessToken;

use super::ResourceContext;

const REGISTRANTS: &str = "/organizers/{organizerKey}/webinars/{webinarKey}/registrants";
const REGISTRANT: &str =
    "/organizers/{organizerKey}/webinars/{webinarKey}/registrants/{registrantKey}";

/// Proxy for webinar registrants.
#[derive(Debug)]
pub struct Registrant {
    ctx: ResourceContext,
}

impl Registrant {
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

    /// Lists every registrant of a webinar.
    pub async fn all(&self, webinar_key: &str) -> Result<ResultSet> {
        let url = self
            .ctx
            .request_url(REGISTRANTS, &[("webinarKey", webinar_key)], &[])?;
        let value = self.ctx.execute(Method::GET, &url, None).await?;
        Ok(ResultSet::paged(value, "registrants"))
    }

    /// Fetches a single registrant.
    pub async fn get(&self, webinar_key: &str, registrant_key: &str) -> Result<ResultSet> {
        let url = self.ctx.request_url(
            REGISTRANT,
            &[
                ("webinarKey", webinar_key),
                ("registrantKey", registrant_key),
            ],
            &[],
        )?;
        let value = self.ctx.execute(Method::GET, &url, None).await?;
        Ok(ResultSet::simple(value))
    }

    /// Finds a registrant by email address.
    ///
    /// The API has no lookup-by-email endpoint; this scans the full
    /// registrant list client-side.
    pub async fn by_email(&self, webinar_key: &str, email: &str) -> Result<Option<Value>> {
        let registrants = self.all(webinar_key).await?;
        Ok(registrants
            .iter()
            .find(|registrant| registrant["email"].as_str() == Some(email))
            .cloned())
    }

    /// Subscribes a registrant to a webinar; the response carries the
    /// `registrantKey` and join URL.
    pub async fn create(&self, webinar_key: &str, body: &Value) -> Result<ResultSet> {
        let url = self
            .ctx
            .request_url(REGISTRANTS, &[("webinarKey", webinar_key)], &[])?;
        let value = self.ctx.execute(Method::POST, &url, Some(body)).await?;
        Ok(ResultSet::simple(value))
    }

    /// Removes a registrant from a webinar.
    pub async fn delete(&self, webinar_key: &str, registrant_key: &str) -> Result<ResultSet> {
        let url = self.ctx.request_url(
            REGISTRANT,
            &[
                ("webinarKey", webinar_key),
                ("registrantKey", registrant_key),
            ],
            &[],
        )?;
        let value = self.ctx.execute(Method::DELETE, &url, None).await?;
        Ok(ResultSet::simple(value))
    }
}
