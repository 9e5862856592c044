//! Account domain services.
//!
//! This module implements the driving ports for authentication, sign-up,
//! and self-service profile edits over the account repository and password
//! hasher, so every inbound adapter observes the same credential and
//! visibility rules.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::account::{Account, AccountId, ProfileUpdate};
use crate::domain::auth::{LoginCredentials, PasswordChange};
use crate::domain::error::Error;
use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, AccountView, LoginService, PasswordHasher,
    PasswordHasherError, ProfileCommand, ProfileQuery, RegistrationService, StoredCredentials,
};
use crate::domain::registration::Registration;
use crate::domain::visibility;

/// Account service implementing the login, registration, and profile ports.
#[derive(Clone)]
pub struct AccountService<R, H> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AccountService<R, H> {
    /// Create a new service over the given repository and hasher.
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }
}

impl<R, H> AccountService<R, H>
where
    R: AccountRepository,
    H: PasswordHasher,
{
    fn map_repository_error(error: AccountRepositoryError) -> Error {
        match error {
            AccountRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("account repository unavailable: {message}"))
            }
            AccountRepositoryError::Query { message } => {
                Error::internal(format!("account repository error: {message}"))
            }
            AccountRepositoryError::DuplicateUsername => {
                Error::conflict("username is already taken")
                    .with_details(json!({"field": "username", "code": "duplicate"}))
            }
            AccountRepositoryError::DuplicateEmail => Error::conflict("email is already registered")
                .with_details(json!({"field": "email", "code": "duplicate"})),
            AccountRepositoryError::NotFound => Error::not_found("account not found"),
            AccountRepositoryError::PreconditionFailed { message } => Error::forbidden(message),
        }
    }

    fn map_hasher_error(error: PasswordHasherError) -> Error {
        Error::internal(format!("password hasher error: {error}"))
    }

    fn invalid_credentials() -> Error {
        Error::unauthorized("invalid credentials")
    }

    fn stale_session() -> Error {
        Error::unauthorized("session account is missing or deactivated")
    }

    /// Resolve a session's account, refusing missing or deactivated ones.
    async fn require_account(&self, id: &AccountId) -> Result<Account, Error> {
        let account = self
            .repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?;
        match account {
            Some(account) if account.is_active() => Ok(account),
            _ => Err(Self::stale_session()),
        }
    }
}

#[async_trait]
impl<R, H> LoginService for AccountService<R, H>
where
    R: AccountRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AccountId, Error> {
        let stored = self
            .repository
            .find_credentials_by_username(credentials.username())
            .await
            .map_err(Self::map_repository_error)?;
        let Some(StoredCredentials {
            account,
            password_digest,
        }) = stored
        else {
            return Err(Self::invalid_credentials());
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &password_digest)
            .map_err(Self::map_hasher_error)?;
        if !verified || !account.is_active() {
            return Err(Self::invalid_credentials());
        }

        Ok(account.id().clone())
    }
}

#[async_trait]
impl<R, H> RegistrationService for AccountService<R, H>
where
    R: AccountRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: Registration) -> Result<Account, Error> {
        let Registration {
            identity,
            profile,
            password,
        } = registration;
        let digest = self
            .hasher
            .hash(password.as_str())
            .map_err(Self::map_hasher_error)?;
        let account = Account::applicant(AccountId::random(), identity, profile);
        self.repository
            .insert(&account, &digest)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(account)
    }
}

#[async_trait]
impl<R, H> ProfileQuery for AccountService<R, H>
where
    R: AccountRepository,
    H: PasswordHasher,
{
    async fn fetch_profile(&self, viewer: &AccountId) -> Result<Account, Error> {
        self.require_account(viewer).await
    }

    async fn view_account(
        &self,
        viewer: &AccountId,
        target: &AccountId,
    ) -> Result<AccountView, Error> {
        let viewer_account = self.require_account(viewer).await?;
        let target_account = self
            .repository
            .find_by_id(target)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("account not found"))?;

        let full_detail = viewer_account.id() != target_account.id()
            && visibility::full_detail(viewer_account.role(), target_account.role());
        Ok(AccountView {
            account: target_account,
            full_detail,
        })
    }
}

#[async_trait]
impl<R, H> ProfileCommand for AccountService<R, H>
where
    R: AccountRepository,
    H: PasswordHasher,
{
    async fn update_profile(
        &self,
        actor: &AccountId,
        update: ProfileUpdate,
    ) -> Result<Account, Error> {
        self.require_account(actor).await?;
        match self.repository.update_profile(actor, &update).await {
            Ok(account) => Ok(account),
            Err(AccountRepositoryError::NotFound) => Err(Self::stale_session()),
            Err(err) => Err(Self::map_repository_error(err)),
        }
    }

    async fn change_password(
        &self,
        actor: &AccountId,
        change: PasswordChange,
    ) -> Result<(), Error> {
        let stored = self
            .repository
            .find_credentials_by_id(actor)
            .await
            .map_err(Self::map_repository_error)?;
        let Some(StoredCredentials {
            account,
            password_digest,
        }) = stored
        else {
            return Err(Self::stale_session());
        };
        if !account.is_active() {
            return Err(Self::stale_session());
        }

        let verified = self
            .hasher
            .verify(change.current_password(), &password_digest)
            .map_err(Self::map_hasher_error)?;
        if !verified {
            return Err(Error::invalid_request("current password is incorrect")
                .with_details(json!({"field": "currentPassword", "code": "incorrect"})));
        }

        let digest = self
            .hasher
            .hash(change.new_password().as_str())
            .map_err(Self::map_hasher_error)?;
        match self
            .repository
            .update_password_digest(actor, &digest)
            .await
        {
            Ok(()) => Ok(()),
            Err(AccountRepositoryError::NotFound) => Err(Self::stale_session()),
            Err(err) => Err(Self::map_repository_error(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{
        AccountIdentity, AccountProfile, EmailAddress, PersonName, Username,
    };
    use crate::domain::auth::Password;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::{FixturePasswordHasher, MockAccountRepository};
    use crate::domain::role::{ApplicationStatus, Role};

    fn account_named(username: &str, role: Role) -> Account {
        let mut account = Account::applicant(
            AccountId::random(),
            AccountIdentity {
                username: Username::new(username).expect("valid username"),
                first_name: PersonName::new("Test").expect("valid first name"),
                last_name: PersonName::new("Person").expect("valid last name"),
                email: EmailAddress::new(format!("{username}@example.org")).expect("valid email"),
            },
            AccountProfile::default(),
        );
        account.set_role(role);
        account
    }

    fn make_service(
        repo: MockAccountRepository,
    ) -> AccountService<MockAccountRepository, FixturePasswordHasher> {
        AccountService::new(Arc::new(repo), Arc::new(FixturePasswordHasher))
    }

    fn stored(account: &Account, password: &str) -> StoredCredentials {
        StoredCredentials {
            account: account.clone(),
            password_digest: format!("plain${password}"),
        }
    }

    #[tokio::test]
    async fn authenticate_returns_the_account_id() {
        let account = account_named("casper", Role::Member);
        let expected_id = account.id().clone();
        let credentials = stored(&account, "Password123");
        let mut repo = MockAccountRepository::new();
        repo.expect_find_credentials_by_username()
            .withf(|username| username == "casper")
            .times(1)
            .return_once(move |_| Ok(Some(credentials)));

        let service = make_service(repo);
        let creds =
            LoginCredentials::try_from_parts("casper", "Password123").expect("credentials shape");

        let id = service.authenticate(&creds).await.expect("login succeeds");
        assert_eq!(id, expected_id);
    }

    #[tokio::test]
    async fn authenticate_rejects_unknown_usernames() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_credentials_by_username()
            .times(1)
            .return_once(|_| Ok(None));

        let service = make_service(repo);
        let creds =
            LoginCredentials::try_from_parts("nobody", "Password123").expect("credentials shape");

        let err = service.authenticate(&creds).await.expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn authenticate_rejects_wrong_passwords() {
        let account = account_named("casper", Role::Member);
        let credentials = stored(&account, "Password123");
        let mut repo = MockAccountRepository::new();
        repo.expect_find_credentials_by_username()
            .times(1)
            .return_once(move |_| Ok(Some(credentials)));

        let service = make_service(repo);
        let creds =
            LoginCredentials::try_from_parts("casper", "Password124").expect("credentials shape");

        let err = service.authenticate(&creds).await.expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn authenticate_rejects_deactivated_accounts() {
        let mut account = account_named("casper", Role::Member);
        account.deactivate();
        let credentials = stored(&account, "Password123");
        let mut repo = MockAccountRepository::new();
        repo.expect_find_credentials_by_username()
            .times(1)
            .return_once(move |_| Ok(Some(credentials)));

        let service = make_service(repo);
        let creds =
            LoginCredentials::try_from_parts("casper", "Password123").expect("credentials shape");

        let err = service.authenticate(&creds).await.expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn register_hashes_the_password_and_stores_an_applicant() {
        let mut repo = MockAccountRepository::new();
        repo.expect_insert()
            .withf(|account, digest| {
                account.role() == Role::Applicant
                    && account.application_status() == ApplicationStatus::Pending
                    && digest == "plain$Password123"
            })
            .times(1)
            .return_once(|_, _| Ok(()));

        let service = make_service(repo);
        let registration = Registration {
            identity: AccountIdentity {
                username: Username::new("casper").expect("valid username"),
                first_name: PersonName::new("Casper").expect("valid first name"),
                last_name: PersonName::new("Ghost").expect("valid last name"),
                email: EmailAddress::new("casper@example.org").expect("valid email"),
            },
            profile: AccountProfile::default(),
            password: Password::new("Password123").expect("valid password"),
        };

        let account = service
            .register(registration)
            .await
            .expect("registration succeeds");
        assert_eq!(account.username().as_ref(), "casper");
        assert!(account.is_active());
    }

    #[tokio::test]
    async fn register_surfaces_username_conflicts() {
        let mut repo = MockAccountRepository::new();
        repo.expect_insert()
            .times(1)
            .return_once(|_, _| Err(AccountRepositoryError::DuplicateUsername));

        let service = make_service(repo);
        let registration = Registration {
            identity: AccountIdentity {
                username: Username::new("casper").expect("valid username"),
                first_name: PersonName::new("Casper").expect("valid first name"),
                last_name: PersonName::new("Ghost").expect("valid last name"),
                email: EmailAddress::new("casper@example.org").expect("valid email"),
            },
            profile: AccountProfile::default(),
            password: Password::new("Password123").expect("valid password"),
        };

        let err = service
            .register(registration)
            .await
            .expect_err("conflict expected");
        assert_eq!(err.code(), ErrorCode::Conflict);
        let details = err.details().expect("details present");
        assert_eq!(details.get("field"), Some(&serde_json::json!("username")));
    }

    #[tokio::test]
    async fn view_account_grants_detail_to_reviewers() {
        let viewer = account_named("officer", Role::Officer);
        let target = account_named("applicant", Role::Applicant);
        let viewer_id = viewer.id().clone();
        let target_id = target.id().clone();

        let mut repo = MockAccountRepository::new();
        let viewer_match = viewer_id.clone();
        repo.expect_find_by_id()
            .withf(move |id| *id == viewer_match)
            .times(1)
            .return_once(move |_| Ok(Some(viewer)));
        let target_match = target_id.clone();
        repo.expect_find_by_id()
            .withf(move |id| *id == target_match)
            .times(1)
            .return_once(move |_| Ok(Some(target)));

        let service = make_service(repo);
        let view = service
            .view_account(&viewer_id, &target_id)
            .await
            .expect("view succeeds");
        assert!(view.full_detail);
        assert_eq!(view.account.username().as_ref(), "applicant");
    }

    #[tokio::test]
    async fn viewing_yourself_yields_the_summary() {
        let viewer = account_named("officer", Role::Officer);
        let viewer_id = viewer.id().clone();

        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_id()
            .times(2)
            .returning(move |_| Ok(Some(viewer.clone())));

        let service = make_service(repo);
        let view = service
            .view_account(&viewer_id, &viewer_id)
            .await
            .expect("view succeeds");
        assert!(!view.full_detail);
    }

    #[tokio::test]
    async fn view_account_reports_missing_targets() {
        let viewer = account_named("officer", Role::Officer);
        let viewer_id = viewer.id().clone();
        let target_id = AccountId::random();

        let mut repo = MockAccountRepository::new();
        let viewer_match = viewer_id.clone();
        repo.expect_find_by_id()
            .withf(move |id| *id == viewer_match)
            .times(1)
            .return_once(move |_| Ok(Some(viewer)));
        let target_match = target_id.clone();
        repo.expect_find_by_id()
            .withf(move |id| *id == target_match)
            .times(1)
            .return_once(|_| Ok(None));

        let service = make_service(repo);
        let err = service
            .view_account(&viewer_id, &target_id)
            .await
            .expect_err("missing target must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn update_profile_refuses_stale_sessions() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let service = make_service(repo);
        let update = ProfileUpdate {
            first_name: PersonName::new("Robin").expect("valid first name"),
            last_name: PersonName::new("Admin").expect("valid last name"),
            email: EmailAddress::new("robin@example.org").expect("valid email"),
            experience_level: Default::default(),
            personal_statement: Default::default(),
            bio: Default::default(),
        };

        let err = service
            .update_profile(&AccountId::random(), update)
            .await
            .expect_err("stale session must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn change_password_rejects_an_incorrect_current_password() {
        let account = account_named("casper", Role::Member);
        let actor_id = account.id().clone();
        let credentials = stored(&account, "OldPass1");
        let mut repo = MockAccountRepository::new();
        repo.expect_find_credentials_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(credentials)));
        repo.expect_update_password_digest().times(0);

        let service = make_service(repo);
        let change = PasswordChange::try_from_parts("WrongPass1", "NewPass123", "NewPass123")
            .expect("change shape");

        let err = service
            .change_password(&actor_id, change)
            .await
            .expect_err("wrong current password must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn change_password_rotates_the_digest() {
        let account = account_named("casper", Role::Member);
        let actor_id = account.id().clone();
        let credentials = stored(&account, "OldPass1");
        let mut repo = MockAccountRepository::new();
        repo.expect_find_credentials_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(credentials)));
        repo.expect_update_password_digest()
            .withf(|_, digest| digest == "plain$NewPass123")
            .times(1)
            .return_once(|_, _| Ok(()));

        let service = make_service(repo);
        let change = PasswordChange::try_from_parts("OldPass1", "NewPass123", "NewPass123")
            .expect("change shape");

        service
            .change_password(&actor_id, change)
            .await
            .expect("password change succeeds");
    }
}
