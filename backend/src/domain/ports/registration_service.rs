//! Driving port for the sign-up use-case.

use async_trait::async_trait;

use crate::domain::account::{Account, AccountId};
use crate::domain::error::Error;
use crate::domain::registration::Registration;

/// Domain use-case port for registering a new applicant.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Store a validated registration and return the created account.
    ///
    /// The account starts as an active applicant with a pending review.
    /// Username and email clashes fail with a conflict error naming the
    /// clashing field.
    async fn register(&self, registration: Registration) -> Result<Account, Error>;
}

/// Inert registrar for handler tests: echoes the registration back as a
/// pending applicant without storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRegistrationService;

#[async_trait]
impl RegistrationService for FixtureRegistrationService {
    async fn register(&self, registration: Registration) -> Result<Account, Error> {
        let Registration {
            identity,
            profile,
            password: _,
        } = registration;
        Ok(Account::applicant(AccountId::random(), identity, profile))
    }
}
