//! OAuth2 client and typed REST SDK for the GoToWebinar platform.
//!
//! The crate covers the full token lifecycle (authorization-code exchange,
//! refresh, persistent storage) and exposes the webinar REST API through
//! per-resource proxies that return uniformly shaped [`ResultSet`]s.
//!
//! The usual entry point is a [`ResourceLoader`] over a [`TokenStorage`]:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gotowebinar::{Config, FileTokenStorage, GotoWebinar, ResourceLoader};
//!
//! # async fn run() -> gotowebinar::Result<()> {
//! let config = Config::new("client-id", "client-secret", "https://app.example.com/cb");
//! let provider = Arc::new(GotoWebinar::new(config)?);
//! let loader = ResourceLoader::new(FileTokenStorage::default(), provider);
//!
//! if let Some(webinars) = loader.webinar_resource("300000000000123456").await? {
//!     for webinar in webinars.upcoming().await?.iter() {
//!         println!("{}", webinar["subject"]);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! When no token is stored yet, run the consent flow once by sending the
//! user to [`GotoWebinar::authorize_url`] and passing the returned code to
//! [`GotoWebinar::exchange_code`]; thereafter the loader refreshes and
//! re-stores tokens transparently.

pub mod config;
pub mod error;
pub mod loader;
pub mod oauth;
pub mod owner;
pub mod provider;
pub mod resources;
pub mod resultset;
pub mod storage;
pub mod time;
pub mod token;

pub use config::{Config, DEFAULT_DOMAIN};
pub use error::{Error, ErrorCode, Result};
pub use loader::ResourceLoader;
pub use owner::ResourceOwner;
pub use provider::GotoWebinar;
pub use resources::{Attendee, CoOrganizer, Registrant, Session, Webhook, Webinar};
pub use resultset::{PageInfo, ResultSet};
pub use storage::{
    DEFAULT_TOKEN_TTL, FileTokenStorage, MemoryTokenStorage, StoredToken, TokenStorage,
};
pub use token::AccessToken;
