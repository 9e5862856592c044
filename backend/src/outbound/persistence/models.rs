//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::accounts;

/// Row struct for reading from the accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub experience_level: String,
    pub personal_statement: String,
    pub bio: String,
    pub role: String,
    pub application_status: String,
    pub password_digest: String,
    pub is_active: bool,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub experience_level: &'a str,
    pub personal_statement: &'a str,
    pub bio: &'a str,
    pub role: &'a str,
    pub application_status: &'a str,
    pub password_digest: &'a str,
    pub is_active: bool,
}

/// Changeset struct for replacing an account's editable profile fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = accounts)]
pub(crate) struct ProfileChangeset<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub experience_level: &'a str,
    pub personal_statement: &'a str,
    pub bio: &'a str,
}

/// Changeset struct for role transitions.
///
/// `application_status` is only written when the transition resolves an
/// application; `None` leaves the stored value untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = accounts)]
pub(crate) struct StandingChangeset<'a> {
    pub role: &'a str,
    pub application_status: Option<&'a str>,
}
