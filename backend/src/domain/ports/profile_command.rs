//! Driving port for self-service profile edits.

use async_trait::async_trait;

use crate::domain::account::{Account, AccountId, ProfileUpdate};
use crate::domain::auth::PasswordChange;
use crate::domain::error::Error;
use crate::domain::role::Role;

use super::profile_query::fixture_account;

/// Domain use-case port for editing one's own account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Replace the actor's editable profile fields and return the refreshed
    /// account. An email clash with another account fails with a conflict
    /// error.
    async fn update_profile(
        &self,
        actor: &AccountId,
        update: ProfileUpdate,
    ) -> Result<Account, Error>;

    /// Replace the actor's password after re-verifying the current one.
    /// A wrong current password fails as a field validation error, not as
    /// unauthorized, so the session stays intact.
    async fn change_password(
        &self,
        actor: &AccountId,
        change: PasswordChange,
    ) -> Result<(), Error>;
}

/// Inert profile editor for handler tests: applies the update to the
/// fixture member and accepts any password change.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileCommand;

#[async_trait]
impl ProfileCommand for FixtureProfileCommand {
    async fn update_profile(
        &self,
        _actor: &AccountId,
        update: ProfileUpdate,
    ) -> Result<Account, Error> {
        let mut account = fixture_account(Role::Member)?;
        account.apply_update(update);
        Ok(account)
    }

    async fn change_password(
        &self,
        _actor: &AccountId,
        _change: PasswordChange,
    ) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::account::{EmailAddress, PersonName};
    use crate::domain::role::ExperienceLevel;

    #[tokio::test]
    async fn fixture_update_echoes_the_new_fields() {
        let update = ProfileUpdate {
            first_name: PersonName::new("Robin").expect("valid first name"),
            last_name: PersonName::new("Admin").expect("valid last name"),
            email: EmailAddress::new("robin@example.org").expect("valid email"),
            experience_level: ExperienceLevel::Intermediate,
            personal_statement: Default::default(),
            bio: Default::default(),
        };

        let account = FixtureProfileCommand
            .update_profile(&AccountId::random(), update)
            .await
            .expect("fixture update succeeds");

        assert_eq!(account.first_name().as_ref(), "Robin");
        assert_eq!(account.email().as_ref(), "robin@example.org");
    }
}
