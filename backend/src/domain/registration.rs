//! Sign-up aggregate.

use crate::domain::account::{AccountIdentity, AccountProfile};
use crate::domain::auth::Password;

/// A fully-validated sign-up request.
///
/// Handlers parse each field through its newtype before assembling this, so
/// the registration service only handles well-formed values. The password
/// travels separately from the identity because it is hashed, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Identity fields for the new account.
    pub identity: AccountIdentity,
    /// Initial profile fields.
    pub profile: AccountProfile,
    /// Password satisfying the complexity rules.
    pub password: Password,
}
