//! Session operations: broadcast history, performance and audience data.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Method;

use crate::error::Result;
use crate::provider::GotoWebinar;
use crate::resultset::ResultSet;
use crate::token::AccessToken;

use super::{ResourceContext, paging_query, window_query};

const ORGANIZER_SESSIONS: &str = "/organizers/{organizerKey}/sessions";
const WEBINAR_SESSIONS: &str = "/organizers/{organizerKey}/webinars/{webinarKey}/sessions";
const WEBINAR_SESSION: &str =
    "/organizers/{organizerKey}/webinars/{webinarKey}/sessions/{sessionKey}";

/// Embedded collection kind for session lists.
const KIND: &str = "sessionInfoResources";

/// Proxy for webinar sessions.
#[derive(Debug)]
pub struct Session {
    ctx: ResourceContext,
}

impl Session {
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

    /// Lists all sessions held by the organizer in the given window
    /// (defaults: ±3 years from now, page 0, size 100).
    pub async fn organizer_sessions(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Result<ResultSet> {
        let query = window_query(from, to, page, size);
        let url = self.ctx.request_url(ORGANIZER_SESSIONS, &[], &query)?;
        let value = self.ctx.execute(Method::GET, &url, None).await?;
        Ok(ResultSet::paged(value, KIND))
    }

    /// Lists the sessions of one webinar.
    pub async fn webinar_sessions(
        &self,
        webinar_key: &str,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Result<ResultSet> {
        let url = self.ctx.request_url(
            WEBINAR_SESSIONS,
            &[("webinarKey", webinar_key)],
            &paging_query(page, size),
        )?;
        let value = self.ctx.execute(Method::GET, &url, None).await?;
        Ok(ResultSet::paged(value, KIND))
    }

    /// Fetches a single session.
    pub async fn get(&self, webinar_key: &str, session_key: &str) -> Result<ResultSet> {
        self.session_detail(webinar_key, session_key, "").await
    }

    /// Fetches attendance and engagement metrics for a session.
    pub async fn performance(&self, webinar_key: &str, session_key: &str) -> Result<ResultSet> {
        self.session_detail(webinar_key, session_key, "/performance")
            .await
    }

    /// Fetches the polls presented during a session.
    pub async fn polls(&self, webinar_key: &str, session_key: &str) -> Result<ResultSet> {
        self.session_detail(webinar_key, session_key, "/polls").await
    }

    /// Fetches the questions asked during a session.
    pub async fn questions(&self, webinar_key: &str, session_key: &str) -> Result<ResultSet> {
        self.session_detail(webinar_key, session_key, "/questions")
            .await
    }

    /// Fetches the surveys presented during a session.
    pub async fn surveys(&self, webinar_key: &str, session_key: &str) -> Result<ResultSet> {
        self.session_detail(webinar_key, session_key, "/surveys")
            .await
    }

    async fn session_detail(
        &self,
        webinar_key: &str,
        session_key: &str,
        suffix: &str,
    ) -> Result<ResultSet> {
        let template = format!("{}{}", WEBINAR_SESSION, suffix);
        let url = self.ctx.request_url(
            &template,
            &[("webinarKey", webinar_key), ("sessionKey", session_key)],
            &[],
        )?;
        let value = self.ctx.execute(Method::GET, &url, None).await?;
        Ok(ResultSet::simple(value))
    }
}
