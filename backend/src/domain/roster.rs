//! Roster collections and who may browse them.

use std::fmt;

use pagination::Paginator;

use crate::domain::role::Role;

/// Fixed page size for roster listings.
pub const ROSTER_PAGE_SIZE: usize = 15;

/// Paginator preconfigured with the roster page size.
pub const ROSTER_PAGINATOR: Paginator = match Paginator::new(ROSTER_PAGE_SIZE) {
    Ok(paginator) => paginator,
    Err(_) => panic!("roster page size must be nonzero"),
};

/// The three browsable rosters, each a single-role slice of the club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterCollection {
    /// Accounts still under review.
    Applicants,
    /// The general membership.
    Members,
    /// The officer bench.
    Officers,
}

impl RosterCollection {
    /// Stable identifier used in logs and error details.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applicants => "applicants",
            Self::Members => "members",
            Self::Officers => "officers",
        }
    }

    /// Role the accounts in this roster hold.
    #[must_use]
    pub const fn listed_role(self) -> Role {
        match self {
            Self::Applicants => Role::Applicant,
            Self::Members => Role::Member,
            Self::Officers => Role::Officer,
        }
    }

    /// Whether `viewer` may browse this roster.
    ///
    /// Applicants are reviewed by officers, officers are overseen by the
    /// owner, and the member roster is open to everyone who has joined.
    #[must_use]
    pub const fn viewable_by(self, viewer: Role) -> bool {
        match self {
            Self::Applicants => matches!(viewer, Role::Officer),
            Self::Officers => matches!(viewer, Role::Owner),
            Self::Members => matches!(viewer, Role::Member | Role::Officer | Role::Owner),
        }
    }
}

impl fmt::Display for RosterCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
