//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed club-membership entities, the policy
//! functions that guard them, and the port traits adapters implement. Keep
//! types immutable where possible and document invariants and serialisation
//! contracts (serde) in each type's Rustdoc.
//!
//! Public surface highlights:
//! - [`Account`] and its validated field newtypes — the registered person.
//! - [`Role`] / [`ApplicationStatus`] — membership standing.
//! - [`MembershipAction`] — the five guarded transitions.
//! - [`AccountService`] / [`MembershipService`] — driving-port
//!   implementations over the repository and hasher ports.
//! - [`Error`] / [`ErrorCode`] — API error response payload.

pub mod account;
pub mod account_service;
pub mod auth;
pub mod error;
pub mod membership;
pub mod membership_service;
pub mod ports;
pub mod registration;
pub mod role;
pub mod roster;
pub mod trace_id;
pub mod visibility;

pub use self::account::{
    Account, AccountId, AccountIdentity, AccountParts, AccountProfile, AccountValidationError,
    Bio, EmailAddress, PersonName, PersonalStatement, ProfileUpdate, Username,
};
pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, Password, PasswordChange,
    PasswordChangeValidationError, PasswordValidationError,
};
pub use self::error::{Error, ErrorCode};
pub use self::membership::{MembershipAction, TransitionError, TransitionOutcome};
pub use self::membership_service::MembershipService;
pub use self::registration::Registration;
pub use self::role::{ApplicationStatus, ExperienceLevel, ParseEnumError, Role};
pub use self::roster::{ROSTER_PAGE_SIZE, RosterCollection};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::visibility::full_detail;
