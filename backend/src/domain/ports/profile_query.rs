//! Driving port for reading profiles.

use async_trait::async_trait;

use crate::domain::account::{
    Account, AccountId, AccountIdentity, AccountParts, AccountProfile, AccountValidationError,
    EmailAddress, PersonName, Username,
};
use crate::domain::error::Error;
use crate::domain::role::{ApplicationStatus, Role};

/// A profile read through the visibility policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountView {
    /// The account being viewed.
    pub account: Account,
    /// Whether the viewer may see the extended fields.
    pub full_detail: bool,
}

/// Domain use-case port for profile reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Fetch the viewer's own account. A session naming a missing or
    /// deactivated account fails as unauthorized.
    async fn fetch_profile(&self, viewer: &AccountId) -> Result<Account, Error>;

    /// Fetch another account through the visibility policy. Viewing
    /// yourself through this path yields the summary, never full detail.
    async fn view_account(
        &self,
        viewer: &AccountId,
        target: &AccountId,
    ) -> Result<AccountView, Error>;
}

/// Build the deterministic account used by port fixtures.
///
/// The id matches [`FixtureLoginService::ACCOUNT_ID`] so a fixture login
/// followed by a fixture profile read observes the same account.
///
/// [`FixtureLoginService::ACCOUNT_ID`]: super::FixtureLoginService::ACCOUNT_ID
pub fn fixture_account(role: Role) -> Result<Account, Error> {
    let status = if matches!(role, Role::Applicant) {
        ApplicationStatus::Pending
    } else {
        ApplicationStatus::Accepted
    };
    let build = || -> Result<Account, AccountValidationError> {
        Ok(Account::from_parts(AccountParts {
            id: AccountId::new(super::login_service::FixtureLoginService::ACCOUNT_ID)?,
            identity: AccountIdentity {
                username: Username::new("admin")?,
                first_name: PersonName::new("Alex")?,
                last_name: PersonName::new("Admin")?,
                email: EmailAddress::new("admin@example.org")?,
            },
            profile: AccountProfile::default(),
            role,
            application_status: status,
            is_active: true,
        }))
    };
    build().map_err(|err| Error::internal(format!("invalid fixture account: {err}")))
}

/// Inert profile reader for handler tests: always serves the fixture
/// member's summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileQuery;

#[async_trait]
impl ProfileQuery for FixtureProfileQuery {
    async fn fetch_profile(&self, _viewer: &AccountId) -> Result<Account, Error> {
        fixture_account(Role::Member)
    }

    async fn view_account(
        &self,
        _viewer: &AccountId,
        _target: &AccountId,
    ) -> Result<AccountView, Error> {
        Ok(AccountView {
            account: fixture_account(Role::Member)?,
            full_detail: false,
        })
    }
}
