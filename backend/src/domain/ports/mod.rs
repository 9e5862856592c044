//! Domain ports and supporting types for the hexagonal boundary.

mod account_repository;
mod login_service;
mod membership_command;
mod password_hasher;
mod profile_command;
mod profile_query;
mod registration_service;
mod roster_query;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{
    AccountRepository, AccountRepositoryError, InMemoryAccountRepository, StoredCredentials,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use membership_command::MockMembershipCommand;
pub use membership_command::{FixtureMembershipCommand, MembershipCommand, TransitionReceipt};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::{FixtureProfileCommand, ProfileCommand};
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::{AccountView, FixtureProfileQuery, ProfileQuery, fixture_account};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::{FixtureRegistrationService, RegistrationService};
#[cfg(test)]
pub use roster_query::MockRosterQuery;
pub use roster_query::{FixtureRosterQuery, RosterQuery};
