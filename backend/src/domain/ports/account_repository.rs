//! Driven port for account persistence.
//!
//! The [`AccountRepository`] trait is the single storage contract for
//! accounts: lookups, registration inserts, profile and credential updates,
//! the guarded role transitions, and the roster slices. Adapters provide
//! durable storage; [`InMemoryAccountRepository`] backs tests and the
//! database-free fixture mode with the same semantics.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::account::{Account, AccountId, ProfileUpdate};
use crate::domain::role::{ApplicationStatus, Role};

/// Errors raised by account repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountRepositoryError {
    /// Repository connection could not be established.
    #[error("account repository connection failed: {message}")]
    Connection {
        /// Adapter-provided description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("account repository query failed: {message}")]
    Query {
        /// Adapter-provided description.
        message: String,
    },
    /// The username is already registered to another account.
    #[error("username is already taken")]
    DuplicateUsername,
    /// The email address is already registered to another account.
    #[error("email is already registered")]
    DuplicateEmail,
    /// The addressed account does not exist.
    #[error("account not found")]
    NotFound,
    /// A role guard re-checked at commit time no longer held.
    #[error("role precondition no longer holds: {message}")]
    PreconditionFailed {
        /// Which guard failed.
        message: String,
    },
}

impl AccountRepositoryError {
    /// Build a [`AccountRepositoryError::Connection`] error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`AccountRepositoryError::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Build a [`AccountRepositoryError::PreconditionFailed`] error.
    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::PreconditionFailed {
            message: message.into(),
        }
    }
}

/// An account together with its stored password digest, for credential
/// verification paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// The account the digest belongs to.
    pub account: Account,
    /// Opaque digest string produced by the password hasher.
    pub password_digest: String,
}

/// Port for account storage and retrieval.
///
/// # Transition Semantics
///
/// [`update_standing`](AccountRepository::update_standing) and
/// [`transfer_ownership`](AccountRepository::transfer_ownership) re-check
/// their role guards against stored state at commit time and fail with
/// [`AccountRepositoryError::PreconditionFailed`] when a concurrent change
/// got there first. `transfer_ownership` applies both role updates
/// atomically so exactly one owner exists at every observable point.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Store a new account with its password digest.
    async fn insert(
        &self,
        account: &Account,
        password_digest: &str,
    ) -> Result<(), AccountRepositoryError>;

    /// Fetch an account by id. Returns `None` when the id is unknown.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError>;

    /// Fetch an account by exact username. Returns `None` when unknown.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    /// Fetch an account and its password digest by exact username.
    async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, AccountRepositoryError>;

    /// Fetch an account and its password digest by id.
    async fn find_credentials_by_id(
        &self,
        id: &AccountId,
    ) -> Result<Option<StoredCredentials>, AccountRepositoryError>;

    /// Fetch the current owner, if one exists.
    async fn find_owner(&self) -> Result<Option<Account>, AccountRepositoryError>;

    /// Replace an account's editable profile fields and return the refreshed
    /// account.
    async fn update_profile(
        &self,
        id: &AccountId,
        update: &ProfileUpdate,
    ) -> Result<Account, AccountRepositoryError>;

    /// Replace an account's password digest.
    async fn update_password_digest(
        &self,
        id: &AccountId,
        password_digest: &str,
    ) -> Result<(), AccountRepositoryError>;

    /// Apply a single-account role transition, guarded by the role the
    /// account must still hold, and return the refreshed account.
    async fn update_standing(
        &self,
        id: &AccountId,
        expected_role: Role,
        role: Role,
        application_status: Option<ApplicationStatus>,
    ) -> Result<Account, AccountRepositoryError>;

    /// Atomically swap ownership: the outgoing owner becomes an officer and
    /// the incoming officer becomes the owner. Returns the refreshed new
    /// owner.
    async fn transfer_ownership(
        &self,
        outgoing_owner: &AccountId,
        incoming_owner: &AccountId,
    ) -> Result<Account, AccountRepositoryError>;

    /// List accounts holding `role`, ordered by username, from `offset`,
    /// at most `limit` rows.
    async fn list_by_role(
        &self,
        role: Role,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Account>, AccountRepositoryError>;

    /// Count accounts holding `role`.
    async fn count_by_role(&self, role: Role) -> Result<usize, AccountRepositoryError>;

    /// Deactivate every account except `keep`; returns how many accounts
    /// were switched off. Accounts are never hard-deleted.
    async fn deactivate_all_except(
        &self,
        keep: &AccountId,
    ) -> Result<usize, AccountRepositoryError>;
}

#[derive(Debug, Clone)]
struct StoredAccount {
    account: Account,
    password_digest: String,
}

/// In-memory implementation backing tests and the database-free fixture
/// mode.
///
/// All operations take the single state lock, so the transition guards and
/// the ownership swap observe the same atomicity as the durable adapter.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    state: Mutex<Vec<StoredAccount>>,
}

impl InMemoryAccountRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> Result<MutexGuard<'_, Vec<StoredAccount>>, AccountRepositoryError> {
        self.state
            .lock()
            .map_err(|_| AccountRepositoryError::query("account store lock poisoned"))
    }
}

fn position_of(
    store: &[StoredAccount],
    id: &AccountId,
) -> Result<usize, AccountRepositoryError> {
    store
        .iter()
        .position(|stored| stored.account.id() == id)
        .ok_or(AccountRepositoryError::NotFound)
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(
        &self,
        account: &Account,
        password_digest: &str,
    ) -> Result<(), AccountRepositoryError> {
        let mut store = self.store()?;
        if store
            .iter()
            .any(|stored| stored.account.username() == account.username())
        {
            return Err(AccountRepositoryError::DuplicateUsername);
        }
        if store
            .iter()
            .any(|stored| stored.account.email() == account.email())
        {
            return Err(AccountRepositoryError::DuplicateEmail);
        }
        store.push(StoredAccount {
            account: account.clone(),
            password_digest: password_digest.to_owned(),
        });
        Ok(())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let store = self.store()?;
        Ok(store
            .iter()
            .find(|stored| stored.account.id() == id)
            .map(|stored| stored.account.clone()))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let store = self.store()?;
        Ok(store
            .iter()
            .find(|stored| stored.account.username().as_ref() == username)
            .map(|stored| stored.account.clone()))
    }

    async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, AccountRepositoryError> {
        let store = self.store()?;
        Ok(store
            .iter()
            .find(|stored| stored.account.username().as_ref() == username)
            .map(|stored| StoredCredentials {
                account: stored.account.clone(),
                password_digest: stored.password_digest.clone(),
            }))
    }

    async fn find_credentials_by_id(
        &self,
        id: &AccountId,
    ) -> Result<Option<StoredCredentials>, AccountRepositoryError> {
        let store = self.store()?;
        Ok(store
            .iter()
            .find(|stored| stored.account.id() == id)
            .map(|stored| StoredCredentials {
                account: stored.account.clone(),
                password_digest: stored.password_digest.clone(),
            }))
    }

    async fn find_owner(&self) -> Result<Option<Account>, AccountRepositoryError> {
        let store = self.store()?;
        Ok(store
            .iter()
            .find(|stored| stored.account.role() == Role::Owner)
            .map(|stored| stored.account.clone()))
    }

    async fn update_profile(
        &self,
        id: &AccountId,
        update: &ProfileUpdate,
    ) -> Result<Account, AccountRepositoryError> {
        let mut store = self.store()?;
        if store.iter().any(|stored| {
            stored.account.id() != id && stored.account.email() == &update.email
        }) {
            return Err(AccountRepositoryError::DuplicateEmail);
        }
        let index = position_of(&store, id)?;
        let stored = store
            .get_mut(index)
            .ok_or(AccountRepositoryError::NotFound)?;
        stored.account.apply_update(update.clone());
        Ok(stored.account.clone())
    }

    async fn update_password_digest(
        &self,
        id: &AccountId,
        password_digest: &str,
    ) -> Result<(), AccountRepositoryError> {
        let mut store = self.store()?;
        let index = position_of(&store, id)?;
        let stored = store
            .get_mut(index)
            .ok_or(AccountRepositoryError::NotFound)?;
        stored.password_digest = password_digest.to_owned();
        Ok(())
    }

    async fn update_standing(
        &self,
        id: &AccountId,
        expected_role: Role,
        role: Role,
        application_status: Option<ApplicationStatus>,
    ) -> Result<Account, AccountRepositoryError> {
        let mut store = self.store()?;
        let index = position_of(&store, id)?;
        let stored = store
            .get_mut(index)
            .ok_or(AccountRepositoryError::NotFound)?;
        if stored.account.role() != expected_role {
            return Err(AccountRepositoryError::precondition_failed(format!(
                "account is no longer {expected_role}"
            )));
        }
        stored.account.set_role(role);
        if let Some(status) = application_status {
            stored.account.set_application_status(status);
        }
        Ok(stored.account.clone())
    }

    async fn transfer_ownership(
        &self,
        outgoing_owner: &AccountId,
        incoming_owner: &AccountId,
    ) -> Result<Account, AccountRepositoryError> {
        let mut store = self.store()?;
        let outgoing_index = position_of(&store, outgoing_owner)?;
        let incoming_index = position_of(&store, incoming_owner)?;

        let outgoing_role = store
            .get(outgoing_index)
            .map(|stored| stored.account.role())
            .ok_or(AccountRepositoryError::NotFound)?;
        if outgoing_role != Role::Owner {
            return Err(AccountRepositoryError::precondition_failed(
                "outgoing account is no longer the owner",
            ));
        }
        let incoming_role = store
            .get(incoming_index)
            .map(|stored| stored.account.role())
            .ok_or(AccountRepositoryError::NotFound)?;
        if incoming_role != Role::Officer {
            return Err(AccountRepositoryError::precondition_failed(
                "incoming account is no longer an officer",
            ));
        }

        if let Some(stored) = store.get_mut(outgoing_index) {
            stored.account.set_role(Role::Officer);
        }
        let stored = store
            .get_mut(incoming_index)
            .ok_or(AccountRepositoryError::NotFound)?;
        stored.account.set_role(Role::Owner);
        Ok(stored.account.clone())
    }

    async fn list_by_role(
        &self,
        role: Role,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Account>, AccountRepositoryError> {
        let store = self.store()?;
        let mut accounts: Vec<Account> = store
            .iter()
            .filter(|stored| stored.account.role() == role)
            .map(|stored| stored.account.clone())
            .collect();
        accounts.sort_by(|a, b| a.username().as_ref().cmp(b.username().as_ref()));
        Ok(accounts.into_iter().skip(offset).take(limit).collect())
    }

    async fn count_by_role(&self, role: Role) -> Result<usize, AccountRepositoryError> {
        let store = self.store()?;
        Ok(store
            .iter()
            .filter(|stored| stored.account.role() == role)
            .count())
    }

    async fn deactivate_all_except(
        &self,
        keep: &AccountId,
    ) -> Result<usize, AccountRepositoryError> {
        let mut store = self.store()?;
        let mut deactivated = 0;
        for stored in store.iter_mut() {
            if stored.account.id() != keep && stored.account.is_active() {
                stored.account.deactivate();
                deactivated += 1;
            }
        }
        Ok(deactivated)
    }
}
