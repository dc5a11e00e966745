//! Co-organizer operations.

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;

use crate::error::Result;
use crate::provider::GotoWebinar;
use crate::resultset::ResultSet;
use crate::token::AccessToken;

use super::ResourceContext;

const COORGANIZERS: &str = "/organizers/{organizerKey}/webinars/{webinarKey}/coorganizers";
const COORGANIZER: &str =
    "/organizers/{organizerKey}/webinars/{webinarKey}/coorganizers/{coorganizerKey}";

/// Proxy for webinar co-organizers.
#[derive(Debug)]
pub struct CoOrganizer {
    ctx: ResourceContext,
}

impl CoOrganizer {
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

    /// Lists the co-organizers of a webinar.
    pub async fn all(&self, webinar_key: &str) -> Result<ResultSet> {
        let url = self
            .ctx
            .request_url(COORGANIZERS, &[("webinarKey", webinar_key)], &[])?;
        let value = self.ctx.execute(Method::GET, &url, None).await?;
        Ok(ResultSet::paged(value, "coorganizers"))
    }

    /// Adds co-organizers to a webinar.
    pub async fn create(&self, webinar_key: &str, body: &Value) -> Result<ResultSet> {
        let url = self
            .ctx
            .request_url(COORGANIZERS, &[("webinarKey", webinar_key)], &[])?;
        let value = self.ctx.execute(Method::POST, &url, Some(body)).await?;
        Ok(ResultSet::paged(value, "coorganizers"))
    }

    /// Removes a co-organizer from a webinar.
    ///
    /// `external` must be set for co-organizers without a platform account.
    pub async fn delete(
        &self,
        webinar_key: &str,
        coorganizer_key: &str,
        external: bool,
    ) -> Result<ResultSet> {
        let url = self.ctx.request_url(
            COORGANIZER,
            &[
                ("webinarKey", webinar_key),
                ("coorganizerKey", coorganizer_key),
            ],
            &external_query(external),
        )?;
        let value = self.ctx.execute(Method::DELETE, &url, None).await?;
        Ok(ResultSet::simple(value))
    }

    /// Resends the invitation email to a co-organizer.
    pub async fn resend_invitation(
        &self,
        webinar_key: &str,
        coorganizer_key: &str,
        external: bool,
    ) -> Result<ResultSet> {
        let template = format!("{}/resendInvitation", COORGANIZER);
        let url = self.ctx.request_url(
            &template,
            &[
                ("webinarKey", webinar_key),
                ("coorganizerKey", coorganizer_key),
            ],
            &external_query(external),
        )?;
        let value = self.ctx.execute(Method::POST, &url, None).await?;
        Ok(ResultSet::simple(value))
    }
}

fn external_query(external: bool) -> Vec<(String, String)> {
    if external {
        vec![("external".to_string(), "true".to_string())]
    } else {
        Vec::new()
    }
}
