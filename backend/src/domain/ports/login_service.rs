//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! infrastructure. This makes HTTP handler tests deterministic because they
//! can substitute a test double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::account::AccountId;
use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated account id.
    ///
    /// Unknown usernames, wrong passwords, and deactivated accounts all
    /// fail with the same unauthorized error so the response does not leak
    /// which part was wrong.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AccountId, Error>;
}

/// In-memory authenticator for handler tests without wired persistence.
///
/// `admin` / `Password123` authenticates successfully and produces a fixed
/// account id.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

impl FixtureLoginService {
    /// Account id produced for a successful fixture login.
    pub const ACCOUNT_ID: &'static str = "123e4567-e89b-12d3-a456-426614174000";
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AccountId, Error> {
        if credentials.username() == "admin" && credentials.password() == "Password123" {
            AccountId::new(Self::ACCOUNT_ID)
                .map_err(|err| Error::internal(format!("invalid fixture account id: {err}")))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
