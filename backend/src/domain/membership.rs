//! Membership transition rules.
//!
//! Each transition is planned as a pure function over the actor's and
//! target's roles, producing the explicit role changes to persist. Services
//! apply the outcome through a repository; nothing here mutates state.

use std::fmt;

use crate::domain::role::{ApplicationStatus, Role};

/// The five guarded membership transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipAction {
    /// An officer turns a pending applicant into a member.
    AcceptApplication,
    /// An officer records a rejection against an applicant.
    RejectApplication,
    /// The owner raises a member to officer.
    PromoteMember,
    /// The owner returns an officer to member.
    DemoteOfficer,
    /// The owner hands the club to an officer and steps down to officer.
    TransferOwnership,
}

impl MembershipAction {
    /// Stable identifier used in logs and error details.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AcceptApplication => "accept_application",
            Self::RejectApplication => "reject_application",
            Self::PromoteMember => "promote_member",
            Self::DemoteOfficer => "demote_officer",
            Self::TransferOwnership => "transfer_ownership",
        }
    }

    /// Role the actor must hold for this action.
    #[must_use]
    pub const fn required_actor_role(self) -> Role {
        match self {
            Self::AcceptApplication | Self::RejectApplication => Role::Officer,
            Self::PromoteMember | Self::DemoteOfficer | Self::TransferOwnership => Role::Owner,
        }
    }

    /// Role the target must hold for this action.
    #[must_use]
    pub const fn required_target_role(self) -> Role {
        match self {
            Self::AcceptApplication | Self::RejectApplication => Role::Applicant,
            Self::PromoteMember => Role::Member,
            Self::DemoteOfficer | Self::TransferOwnership => Role::Officer,
        }
    }

    /// Check both guards and compute the resulting role changes.
    ///
    /// An actor can never satisfy a target precondition with their own role
    /// (the required actor and target roles always differ), so self-targeted
    /// requests fail here without a separate identity check.
    pub fn plan(
        self,
        actor_role: Role,
        target_role: Role,
    ) -> Result<TransitionOutcome, TransitionError> {
        let required_actor = self.required_actor_role();
        if actor_role != required_actor {
            return Err(TransitionError::ActorRole {
                required: required_actor,
                actual: actor_role,
            });
        }

        let required_target = self.required_target_role();
        if target_role != required_target {
            return Err(TransitionError::TargetRole {
                required: required_target,
                actual: target_role,
            });
        }

        Ok(match self {
            Self::AcceptApplication => TransitionOutcome {
                target_role: Role::Member,
                target_status: Some(ApplicationStatus::Accepted),
                actor_role: None,
            },
            Self::RejectApplication => TransitionOutcome {
                target_role: Role::Applicant,
                target_status: Some(ApplicationStatus::Rejected),
                actor_role: None,
            },
            Self::PromoteMember => TransitionOutcome {
                target_role: Role::Officer,
                target_status: None,
                actor_role: None,
            },
            Self::DemoteOfficer => TransitionOutcome {
                target_role: Role::Member,
                target_status: None,
                actor_role: None,
            },
            Self::TransferOwnership => TransitionOutcome {
                target_role: Role::Owner,
                target_status: None,
                actor_role: Some(Role::Officer),
            },
        })
    }
}

impl fmt::Display for MembershipAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role changes a successful transition must persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// Role the target holds afterwards.
    pub target_role: Role,
    /// Review outcome to record, when the action touches it.
    pub target_status: Option<ApplicationStatus>,
    /// Role the actor holds afterwards, when the action demotes them.
    pub actor_role: Option<Role>,
}

/// Why a transition was refused. Both variants surface as a forbidden
/// response; no state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// The actor does not hold the role the action demands.
    ActorRole {
        /// Role the action demands.
        required: Role,
        /// Role the actor holds.
        actual: Role,
    },
    /// The target is not in the state the action expects.
    TargetRole {
        /// Role the target must hold.
        required: Role,
        /// Role the target holds.
        actual: Role,
    },
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActorRole { required, actual } => {
                write!(f, "actor must be {required} (was {actual})")
            }
            Self::TargetRole { required, actual } => {
                write!(f, "target must be {required} (was {actual})")
            }
        }
    }
}

impl std::error::Error for TransitionError {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn accept_turns_an_applicant_into_a_member() {
        let outcome = MembershipAction::AcceptApplication
            .plan(Role::Officer, Role::Applicant)
            .expect("guards hold");
        assert_eq!(outcome.target_role, Role::Member);
        assert_eq!(outcome.target_status, Some(ApplicationStatus::Accepted));
        assert_eq!(outcome.actor_role, None);
    }

    #[rstest]
    fn reject_records_the_outcome_without_changing_role() {
        let outcome = MembershipAction::RejectApplication
            .plan(Role::Officer, Role::Applicant)
            .expect("guards hold");
        assert_eq!(outcome.target_role, Role::Applicant);
        assert_eq!(outcome.target_status, Some(ApplicationStatus::Rejected));
        assert_eq!(outcome.actor_role, None);
    }

    #[rstest]
    fn promote_raises_a_member_to_officer() {
        let outcome = MembershipAction::PromoteMember
            .plan(Role::Owner, Role::Member)
            .expect("guards hold");
        assert_eq!(outcome.target_role, Role::Officer);
        assert_eq!(outcome.target_status, None);
        assert_eq!(outcome.actor_role, None);
    }

    #[rstest]
    fn demote_returns_an_officer_to_member() {
        let outcome = MembershipAction::DemoteOfficer
            .plan(Role::Owner, Role::Officer)
            .expect("guards hold");
        assert_eq!(outcome.target_role, Role::Member);
        assert_eq!(outcome.target_status, None);
        assert_eq!(outcome.actor_role, None);
    }

    #[rstest]
    fn transfer_swaps_owner_and_officer() {
        let outcome = MembershipAction::TransferOwnership
            .plan(Role::Owner, Role::Officer)
            .expect("guards hold");
        assert_eq!(outcome.target_role, Role::Owner);
        assert_eq!(outcome.target_status, None);
        assert_eq!(outcome.actor_role, Some(Role::Officer));
    }

    #[rstest]
    #[case::member_cannot_accept(MembershipAction::AcceptApplication, Role::Member)]
    #[case::owner_cannot_accept(MembershipAction::AcceptApplication, Role::Owner)]
    #[case::owner_cannot_reject(MembershipAction::RejectApplication, Role::Owner)]
    #[case::officer_cannot_promote(MembershipAction::PromoteMember, Role::Officer)]
    #[case::officer_cannot_demote(MembershipAction::DemoteOfficer, Role::Officer)]
    #[case::member_cannot_transfer(MembershipAction::TransferOwnership, Role::Member)]
    fn wrong_actor_role_is_refused(#[case] action: MembershipAction, #[case] actor: Role) {
        let err = action
            .plan(actor, action.required_target_role())
            .expect_err("actor guard must refuse");
        assert_eq!(
            err,
            TransitionError::ActorRole {
                required: action.required_actor_role(),
                actual: actor,
            }
        );
    }

    #[rstest]
    #[case::accept_needs_applicant(MembershipAction::AcceptApplication, Role::Member)]
    #[case::promote_needs_member(MembershipAction::PromoteMember, Role::Officer)]
    #[case::demote_needs_officer(MembershipAction::DemoteOfficer, Role::Member)]
    #[case::transfer_needs_officer(MembershipAction::TransferOwnership, Role::Member)]
    fn wrong_target_role_is_refused(#[case] action: MembershipAction, #[case] target: Role) {
        let err = action
            .plan(action.required_actor_role(), target)
            .expect_err("target guard must refuse");
        assert_eq!(
            err,
            TransitionError::TargetRole {
                required: action.required_target_role(),
                actual: target,
            }
        );
    }

    #[rstest]
    #[case::owner_transferring_to_themselves(MembershipAction::TransferOwnership)]
    #[case::officer_accepting_themselves(MembershipAction::AcceptApplication)]
    fn self_targeting_fails_the_target_guard(#[case] action: MembershipAction) {
        let role = action.required_actor_role();
        let err = action.plan(role, role).expect_err("self target must refuse");
        assert!(matches!(err, TransitionError::TargetRole { .. }));
    }
}
