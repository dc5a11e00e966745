//! Resource loading with transparent token refresh.
//!
//! [`ResourceLoader`] is the high-level entry point: give it a token
//! storage and a provider, ask for a resource proxy by organizer key, and
//! it hands back a proxy bound to a valid token, refreshing and re-storing
//! the token first when the stored one has expired. Callers never touch
//! the refresh grant directly.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::owner::ResourceOwner;
use crate::provider::GotoWebinar;
use crate::resources::{Attendee, CoOrganizer, Registrant, Session, Webhook, Webinar};
use crate::storage::{DEFAULT_TOKEN_TTL, TokenStorage};
use crate::token::AccessToken;

/// Loads resource proxies backed by stored, auto-refreshed tokens.
#[derive(Debug)]
pub struct ResourceLoader<S> {
    storage: S,
    provider: Arc<GotoWebinar>,
}

impl<S: TokenStorage> ResourceLoader<S> {
    /// Creates a loader over the given storage and provider.
    pub fn new(storage: S, provider: Arc<GotoWebinar>) -> Self {
        Self { storage, provider }
    }

    /// Returns the token storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the provider.
    pub fn provider(&self) -> &Arc<GotoWebinar> {
        &self.provider
    }

    /// Returns a valid access token for the organizer, refreshing an
    /// expired one through the refresh grant.
    ///
    /// Returns `Ok(None)` when no token is stored under the key; the
    /// caller must then run the authorization-code flow. A refreshed
    /// token is stored under the key of the owner the provider reports,
    /// which is normally the lookup key.
    pub async fn valid_token(&self, organizer_key: &str) -> Result<Option<AccessToken>> {
        let Some(stored) = self.storage.fetch_token(organizer_key)? else {
            debug!(organizer_key, "no stored token");
            return Ok(None);
        };

        if !stored.token.is_expired() {
            return Ok(Some(stored.token));
        }

        let refresh_token = stored.token.refresh_token.as_deref().ok_or_else(|| {
            Error::oauth("stored token is expired and carries no refresh token")
        })?;

        info!(organizer_key, "access token expired, refreshing");
        let token = self.provider.refresh_token(refresh_token).await?;
        let owner = self.provider.resource_owner(&token).await?;

        if owner.key().as_deref() != Some(organizer_key) {
            warn!(
                organizer_key,
                owner_key = owner.key().as_deref().unwrap_or("<none>"),
                "refreshed token belongs to a different organizer"
            );
        }

        self.storage.save_token(&token, &owner, DEFAULT_TOKEN_TTL)?;
        Ok(Some(token))
    }

    /// Loads the webinar proxy for an organizer.
    pub async fn webinar_resource(&self, organizer_key: &str) -> Result<Option<Webinar>> {
        Ok(self
            .valid_token(organizer_key)
            .await?
            .map(|token| Webinar::new(Arc::clone(&self.provider), token)))
    }

    /// Loads the session proxy for an organizer.
    pub async fn session_resource(&self, organizer_key: &str) -> Result<Option<Session>> {
        Ok(self
            .valid_token(organizer_key)
            .await?
            .map(|token| Session::new(Arc::clone(&self.provider), token)))
    }

    /// Loads the registrant proxy for an organizer.
    pub async fn registrant_resource(&self, organizer_key: &str) -> Result<Option<Registrant>> {
        Ok(self
            .valid_token(organizer_key)
            .await?
            .map(|token| Registrant::new(Arc::clone(&self.provider), token)))
    }

    /// Loads the attendee proxy for an organizer.
    pub async fn attendee_resource(&self, organizer_key: &str) -> Result<Option<Attendee>> {
        Ok(self
            .valid_token(organizer_key)
            .await?
            .map(|token| Attendee::new(Arc::clone(&self.provider), token)))
    }

    /// Loads the co-organizer proxy for an organizer.
    pub async fn coorganizer_resource(&self, organizer_key: &str) -> Result<Option<CoOrganizer>> {
        Ok(self
            .valid_token(organizer_key)
            .await?
            .map(|token| CoOrganizer::new(Arc::clone(&self.provider), token)))
    }

    /// Loads the webhook proxy for an organizer.
    pub async fn webhook_resource(&self, organizer_key: &str) -> Result<Option<Webhook>> {
        Ok(self
            .valid_token(organizer_key)
            .await?
            .map(|token| Webhook::new(Arc::clone(&self.provider), token)))
    }

    /// Fetches a fresh profile of the organizer from the identity endpoint.
    pub async fn resource_owner(&self, organizer_key: &str) -> Result<Option<ResourceOwner>> {
        match self.valid_token(organizer_key).await? {
            Some(token) => Ok(Some(self.provider.resource_owner(&token).await?)),
            None => Ok(None),
        }
    }
}
