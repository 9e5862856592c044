//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.
//!
//! This adapter persists accounts and performs the guarded role transitions.
//! Uniqueness of usernames and email addresses is enforced by database
//! constraints and surfaced as the dedicated duplicate error variants; the
//! ownership transfer runs in a transaction so exactly one owner exists at
//! every observable point.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::account::{
    Account, AccountId, AccountIdentity, AccountParts, AccountProfile, Bio, EmailAddress,
    PersonName, PersonalStatement, ProfileUpdate, Username,
};
use crate::domain::ports::{AccountRepository, AccountRepositoryError, StoredCredentials};
use crate::domain::role::{ApplicationStatus, Role};

use super::models::{AccountRow, NewAccountRow, ProfileChangeset, StandingChangeset};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Diesel-backed implementation of the account repository port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            AccountRepositoryError::connection(message)
        }
    }
}

/// Classify a unique violation by the constraint it tripped.
///
/// Postgres names the violated constraint; older drivers only carry it in
/// the message text, so both are checked.
fn map_unique_violation(message: &str, constraint_name: Option<&str>) -> AccountRepositoryError {
    let needle = constraint_name.unwrap_or(message).to_lowercase();
    if needle.contains("username") {
        AccountRepositoryError::DuplicateUsername
    } else if needle.contains("email") {
        AccountRepositoryError::DuplicateEmail
    } else {
        AccountRepositoryError::query("unique constraint violation")
    }
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => AccountRepositoryError::NotFound,
        DieselError::QueryBuilderError(_) => AccountRepositoryError::query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => {
                map_unique_violation(info.message(), info.constraint_name())
            }
            DatabaseErrorKind::ClosedConnection => {
                AccountRepositoryError::connection("database connection error")
            }
            _ => AccountRepositoryError::query("database error"),
        },
        _ => AccountRepositoryError::query("database error"),
    }
}

fn corrupted(err: impl std::fmt::Display) -> AccountRepositoryError {
    AccountRepositoryError::query(format!("corrupted account row: {err}"))
}

/// Convert a database row into a validated domain account.
///
/// Rows are written through the domain newtypes, so failures here mean the
/// stored data was modified outside the application.
fn row_to_account(row: AccountRow) -> Result<Account, AccountRepositoryError> {
    let AccountRow {
        id,
        username,
        first_name,
        last_name,
        email,
        experience_level,
        personal_statement,
        bio,
        role,
        application_status,
        password_digest: _,
        is_active,
        created_at: _,
        updated_at: _,
    } = row;

    Ok(Account::from_parts(AccountParts {
        id: AccountId::from_uuid(id),
        identity: AccountIdentity {
            username: Username::new(username).map_err(corrupted)?,
            first_name: PersonName::new(first_name).map_err(corrupted)?,
            last_name: PersonName::new(last_name).map_err(corrupted)?,
            email: EmailAddress::new(email).map_err(corrupted)?,
        },
        profile: AccountProfile {
            experience_level: experience_level.parse().map_err(corrupted)?,
            personal_statement: PersonalStatement::new(personal_statement).map_err(corrupted)?,
            bio: Bio::new(bio).map_err(corrupted)?,
        },
        role: role.parse().map_err(corrupted)?,
        application_status: application_status.parse().map_err(corrupted)?,
        is_active,
    }))
}

fn row_to_credentials(row: AccountRow) -> Result<StoredCredentials, AccountRepositoryError> {
    let password_digest = row.password_digest.clone();
    Ok(StoredCredentials {
        account: row_to_account(row)?,
        password_digest,
    })
}

/// Zero rows from a guarded transition means the account either vanished or
/// changed role underneath us. Look again to tell the two apart.
async fn disambiguate_standing_failure(
    conn: &mut AsyncPgConnection,
    id: &AccountId,
    expected_role: Role,
) -> AccountRepositoryError {
    let current = accounts::table
        .filter(accounts::id.eq(id.as_uuid()))
        .select(accounts::role)
        .first::<String>(conn)
        .await
        .optional();

    match current {
        Ok(Some(_)) => AccountRepositoryError::precondition_failed(format!(
            "account is no longer {expected_role}"
        )),
        Ok(None) => AccountRepositoryError::NotFound,
        Err(err) => map_diesel_error(err),
    }
}

/// Failures inside the ownership transfer transaction.
///
/// diesel-async requires the transaction error type to absorb raw Diesel
/// errors, so domain failures ride alongside them until the transaction
/// resolves.
enum TransferFailure {
    Repository(AccountRepositoryError),
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for TransferFailure {
    fn from(error: diesel::result::Error) -> Self {
        Self::Database(error)
    }
}

async fn role_of(conn: &mut AsyncPgConnection, id: &AccountId) -> Result<String, TransferFailure> {
    accounts::table
        .filter(accounts::id.eq(id.as_uuid()))
        .select(accounts::role)
        .first::<String>(conn)
        .await
        .optional()?
        .ok_or(TransferFailure::Repository(AccountRepositoryError::NotFound))
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(
        &self,
        account: &Account,
        password_digest: &str,
    ) -> Result<(), AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewAccountRow {
            id: *account.id().as_uuid(),
            username: account.username().as_ref(),
            first_name: account.first_name().as_ref(),
            last_name: account.last_name().as_ref(),
            email: account.email().as_ref(),
            experience_level: account.experience_level().as_str(),
            personal_statement: account.personal_statement().as_ref(),
            bio: account.bio().as_ref(),
            role: account.role().as_str(),
            application_status: account.application_status().as_str(),
            password_digest,
            is_active: account.is_active(),
        };

        diesel::insert_into(accounts::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = accounts::table
            .filter(accounts::id.eq(id.as_uuid()))
            .select(AccountRow::as_select())
            .first::<AccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = accounts::table
            .filter(accounts::username.eq(username))
            .select(AccountRow::as_select())
            .first::<AccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = accounts::table
            .filter(accounts::username.eq(username))
            .select(AccountRow::as_select())
            .first::<AccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_credentials).transpose()
    }

    async fn find_credentials_by_id(
        &self,
        id: &AccountId,
    ) -> Result<Option<StoredCredentials>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = accounts::table
            .filter(accounts::id.eq(id.as_uuid()))
            .select(AccountRow::as_select())
            .first::<AccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_credentials).transpose()
    }

    async fn find_owner(&self) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = accounts::table
            .filter(accounts::role.eq(Role::Owner.as_str()))
            .select(AccountRow::as_select())
            .first::<AccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn update_profile(
        &self,
        id: &AccountId,
        update: &ProfileUpdate,
    ) -> Result<Account, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = ProfileChangeset {
            first_name: update.first_name.as_ref(),
            last_name: update.last_name.as_ref(),
            email: update.email.as_ref(),
            experience_level: update.experience_level.as_str(),
            personal_statement: update.personal_statement.as_ref(),
            bio: update.bio.as_ref(),
        };

        let row = diesel::update(accounts::table.filter(accounts::id.eq(id.as_uuid())))
            .set(&changeset)
            .returning(AccountRow::as_returning())
            .get_result::<AccountRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_account(row)
    }

    async fn update_password_digest(
        &self,
        id: &AccountId,
        password_digest: &str,
    ) -> Result<(), AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(accounts::table.filter(accounts::id.eq(id.as_uuid())))
            .set(accounts::password_digest.eq(password_digest))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(AccountRepositoryError::NotFound);
        }
        Ok(())
    }

    async fn update_standing(
        &self,
        id: &AccountId,
        expected_role: Role,
        role: Role,
        application_status: Option<ApplicationStatus>,
    ) -> Result<Account, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = StandingChangeset {
            role: role.as_str(),
            application_status: application_status.map(|status| status.as_str()),
        };

        // The expected role rides in the filter so a concurrent transition
        // makes this update touch zero rows instead of clobbering it.
        let row = diesel::update(
            accounts::table.filter(
                accounts::id
                    .eq(id.as_uuid())
                    .and(accounts::role.eq(expected_role.as_str())),
            ),
        )
        .set(&changeset)
        .returning(AccountRow::as_returning())
        .get_result::<AccountRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_account(row),
            None => Err(disambiguate_standing_failure(&mut conn, id, expected_role).await),
        }
    }

    async fn transfer_ownership(
        &self,
        outgoing_owner: &AccountId,
        incoming_owner: &AccountId,
    ) -> Result<Account, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result = conn
            .transaction(|conn| {
                async move {
                    let outgoing_role = role_of(conn, outgoing_owner).await?;
                    if outgoing_role != Role::Owner.as_str() {
                        return Err(TransferFailure::Repository(
                            AccountRepositoryError::precondition_failed(
                                "outgoing account is no longer the owner",
                            ),
                        ));
                    }
                    let incoming_role = role_of(conn, incoming_owner).await?;
                    if incoming_role != Role::Officer.as_str() {
                        return Err(TransferFailure::Repository(
                            AccountRepositoryError::precondition_failed(
                                "incoming account is no longer an officer",
                            ),
                        ));
                    }

                    diesel::update(
                        accounts::table.filter(
                            accounts::id
                                .eq(outgoing_owner.as_uuid())
                                .and(accounts::role.eq(Role::Owner.as_str())),
                        ),
                    )
                    .set(accounts::role.eq(Role::Officer.as_str()))
                    .execute(conn)
                    .await?;

                    let row = diesel::update(
                        accounts::table.filter(
                            accounts::id
                                .eq(incoming_owner.as_uuid())
                                .and(accounts::role.eq(Role::Officer.as_str())),
                        ),
                    )
                    .set(accounts::role.eq(Role::Owner.as_str()))
                    .returning(AccountRow::as_returning())
                    .get_result::<AccountRow>(conn)
                    .await?;

                    Ok(row)
                }
                .scope_boxed()
            })
            .await;

        match result {
            Ok(row) => row_to_account(row),
            Err(TransferFailure::Repository(err)) => Err(err),
            Err(TransferFailure::Database(err)) => Err(map_diesel_error(err)),
        }
    }

    async fn list_by_role(
        &self,
        role: Role,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let offset = i64::try_from(offset)
            .map_err(|_| AccountRepositoryError::query("page offset overflow"))?;
        let limit =
            i64::try_from(limit).map_err(|_| AccountRepositoryError::query("page limit overflow"))?;

        let rows: Vec<AccountRow> = accounts::table
            .filter(accounts::role.eq(role.as_str()))
            .order(accounts::username.asc())
            .offset(offset)
            .limit(limit)
            .select(AccountRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_account).collect()
    }

    async fn count_by_role(&self, role: Role) -> Result<usize, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = accounts::table
            .filter(accounts::role.eq(role.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        usize::try_from(total).map_err(|_| AccountRepositoryError::query("row count overflow"))
    }

    async fn deactivate_all_except(
        &self,
        keep: &AccountId,
    ) -> Result<usize, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(
            accounts::table.filter(
                accounts::id
                    .ne(keep.as_uuid())
                    .and(accounts::is_active.eq(true)),
            ),
        )
        .set(accounts::is_active.eq(false))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
