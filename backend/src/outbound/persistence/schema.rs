//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Membership accounts table.
    ///
    /// One row per person who has ever signed up. Role transitions and
    /// deactivation mutate rows in place; rows are never deleted.
    accounts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login handle (max 32 characters).
        username -> Varchar,
        /// Given name (max 64 characters).
        first_name -> Varchar,
        /// Family name (max 64 characters).
        last_name -> Varchar,
        /// Unique contact address (max 254 characters).
        email -> Varchar,
        /// Self-reported playing strength: beginner, intermediate, advanced.
        experience_level -> Varchar,
        /// Statement submitted with the application.
        personal_statement -> Text,
        /// Short bio shown to reviewers.
        bio -> Text,
        /// Membership role: applicant, member, officer, owner.
        role -> Varchar,
        /// Application review outcome: pending, accepted, rejected.
        application_status -> Varchar,
        /// Opaque password digest produced by the password hasher.
        password_digest -> Text,
        /// Whether the account may authenticate.
        is_active -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}
