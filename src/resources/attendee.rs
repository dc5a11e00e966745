//! Attendee operations: who actually joined a session, and what they did.

use std::sync::Arc;

use reqwest::Method;

use crate::error::Result;
use crate::provider::GotoWebinar;
use crate::resultset::ResultSet;
use crate::token::AccessToken;

use super::ResourceContext;

const ATTENDEES: &str =
    "/organizers/{organizerKey}/webinars/{webinarKey}/sessions/{sessionKey}/attendees";
const ATTENDEE: &str =
    "/organizers/{organizerKey}/webinars/{webinarKey}/sessions/{sessionKey}/attendees/{registrantKey}";

/// Proxy for session attendees.
#[derive(Debug)]
pub struct Attendee {
    ctx: ResourceContext,
}

impl Attendee {
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

    /// Lists the attendees of a session.
    pub async fn session_attendees(
        &self,
        webinar_key: &str,
        session_key: &str,
    ) -> Result<ResultSet> {
        let url = self.ctx.request_url(
            ATTENDEES,
            &[("webinarKey", webinar_key), ("sessionKey", session_key)],
            &[],
        )?;
        let value = self.ctx.execute(Method::GET, &url, None).await?;
        Ok(ResultSet::paged(value, "attendees"))
    }

    /// Fetches a single attendee of a session.
    pub async fn get(
        &self,
        webinar_key: &str,
        session_key: &str,
        registrant_key: &str,
    ) -> Result<ResultSet> {
        self.attendee_detail(webinar_key, session_key, registrant_key, "")
            .await
    }

    /// Fetches an attendee's poll answers.
    pub async fn poll_answers(
        &self,
        webinar_key: &str,
        session_key: &str,
        registrant_key: &str,
    ) -> Result<ResultSet> {
        self.attendee_detail(webinar_key, session_key, registrant_key, "/polls")
            .await
    }

    /// Fetches the questions an attendee asked.
    pub async fn questions(
        &self,
        webinar_key: &str,
        session_key: &str,
        registrant_key: &str,
    ) -> Result<ResultSet> {
        self.attendee_detail(webinar_key, session_key, registrant_key, "/questions")
            .await
    }

    /// Fetches an attendee's survey answers.
    pub async fn survey_answers(
        &self,
        webinar_key: &str,
        session_key: &str,
        registrant_key: &str,
    ) -> Result<ResultSet> {
        self.attendee_detail(webinar_key, session_key, registrant_key, "/surveys")
            .await
    }

    async fn attendee_detail(
        &self,
        webinar_key: &str,
        session_key: &str,
        registrant_key: &str,
        suffix: &str,
    ) -> Result<ResultSet> {
        let template = format!("{}{}", ATTENDEE, suffix);
        let url = self.ctx.request_url(
            &template,
            &[
                ("webinarKey", webinar_key),
                ("sessionKey", session_key),
                ("registrantKey", registrant_key),
            ],
            &[],
        )?;
        let value = self.ctx.execute(Method::GET, &url, None).await?;
        Ok(ResultSet::simple(value))
    }
}
