//! Authenticated resource proxies.
//!
//! Each resource type exposes one method per API operation. A method is a
//! pure mapping from typed parameters to (HTTP method, URL template, path
//! params, query params, optional JSON body); the request is issued through
//! the provider and the parsed JSON is wrapped in a [`ResultSet`].
//!
//! [`ResultSet`]: crate::resultset::ResultSet

mod attendee;
mod coorganizer;
mod registrant;
mod session;
mod webhook;
mod webinar;

pub use attendee::Attendee;
pub use coorganizer::CoOrganizer;
pub use registrant::Registrant;
pub use session::Session;
pub use webhook::Webhook;
pub use webinar::Webinar;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use reqwest::Method;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::provider::GotoWebinar;
use crate::time::date_to_utc;
use crate::token::AccessToken;

/// Default page size for list endpoints when the caller omits it.
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 100;

/// Default half-width of the time-range window for list endpoints.
pub(crate) const DEFAULT_WINDOW_DAYS: i64 = 3 * 365;

/// The (provider, token) pair shared by every resource proxy.
///
/// Builds absolute request URLs by substituting path placeholders and
/// appending an RFC 3986 encoded query string.
#[derive(Debug)]
pub(crate) struct ResourceContext {
    provider: Arc<GotoWebinar>,
    token: AccessToken,
}

impl ResourceContext {
    pub(crate) fn new(provider: Arc<GotoWebinar>, token: AccessToken) -> Self {
        Self { provider, token }
    }

    pub(crate) fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Builds an absolute request URL from a template relative to the API
    /// base.
    ///
    /// `{organizerKey}`, `{accountKey}` and `{domain}` default to values
    /// resolved from the current token and configuration; entries in
    /// `path_params` override defaults for matching names only. Any
    /// placeholder still unresolved is an error, so it can never leak into
    /// the output. The query string is appended only when non-empty.
    pub(crate) fn request_url(
        &self,
        template: &str,
        path_params: &[(&str, &str)],
        query: &[(String, String)],
    ) -> Result<String> {
        let mut url = self.provider.api_base();
        url.push_str(&self.substitute(template, path_params)?);

        if !query.is_empty() {
            url.push('?');
            url.push_str(&encode_query(query));
        }

        Ok(url)
    }

    fn substitute(&self, template: &str, path_params: &[(&str, &str)]) -> Result<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| {
                Error::configuration(format!("unbalanced placeholder in template {:?}", template))
            })?;
            let name = &after[..end];
            out.push_str(&self.resolve(name, path_params, template)?);
            rest = &after[end + 1..];
        }
        out.push_str(rest);

        Ok(out)
    }

    fn resolve(&self, name: &str, path_params: &[(&str, &str)], template: &str) -> Result<String> {
        if let Some((_, value)) = path_params.iter().find(|(key, _)| *key == name) {
            return Ok((*value).to_string());
        }
        match name {
            "organizerKey" => self.token.organizer_key().ok_or_else(|| {
                Error::configuration("access token carries no organizer_key claim")
            }),
            "accountKey" => self
                .token
                .account_key()
                .ok_or_else(|| Error::configuration("access token carries no account_key claim")),
            "domain" => Ok(self.provider.domain().to_string()),
            other => Err(Error::configuration(format!(
                "unresolved placeholder {{{}}} in template {:?}",
                other, template
            ))),
        }
    }

    /// Issues an authenticated request for an already-built URL.
    pub(crate) async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        self.provider.execute(method, url, &self.token, body).await
    }
}

/// Encodes query pairs as a `&`-joined RFC 3986 string.
fn encode_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Builds the time-range + paging query for list endpoints.
///
/// Omitted bounds default to a window of [now - 3y, now + 3y]; omitted
/// paging defaults to page 0 with 100 items.
pub(crate) fn window_query(
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    page: Option<u32>,
    size: Option<u32>,
) -> Vec<(String, String)> {
    let from = from.unwrap_or_else(|| Utc::now() - Duration::days(DEFAULT_WINDOW_DAYS));
    let to = to.unwrap_or_else(|| Utc::now() + Duration::days(DEFAULT_WINDOW_DAYS));
    let mut query = vec![
        ("fromTime".to_string(), date_to_utc(&from)),
        ("toTime".to_string(), date_to_utc(&to)),
    ];
    query.extend(paging_query(page, size));
    query
}

/// Builds the paging query, applying the page 0 / size 100 defaults.
pub(crate) fn paging_query(page: Option<u32>, size: Option<u32>) -> Vec<(String, String)> {
    vec![
        ("page".to_string(), page.unwrap_or(0).to_string()),
        (
            "size".to_string(),
            size.filter(|s| *s > 0).unwrap_or(DEFAULT_PAGE_SIZE).to_string(),
        ),
    ]
}
