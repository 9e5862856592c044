//! Profile visibility policy.
//!
//! Reviewers see the extended profile of the people they oversee; everyone
//! else gets the public summary. The check is a pure function over the role
//! pair so it can be consulted anywhere without a repository in hand.

use crate::domain::role::Role;

/// Whether `viewer` may see `target`'s extended profile fields.
///
/// Officers oversee applicants and members; the owner oversees officers and
/// members. Every other pairing, including viewing oneself, gets the
/// summary only. Callers must short-circuit the identity case before
/// consulting the role pair; this function only compares roles.
#[must_use]
pub const fn full_detail(viewer: Role, target: Role) -> bool {
    matches!(
        (viewer, target),
        (Role::Officer, Role::Applicant | Role::Member)
            | (Role::Owner, Role::Officer | Role::Member)
    )
}
