//! Driving port for the guarded membership transitions.

use async_trait::async_trait;

use crate::domain::account::{Account, AccountId};
use crate::domain::error::Error;
use crate::domain::role::{ApplicationStatus, Role};

use super::profile_query::fixture_account;

/// Outcome of a successful transition: the refreshed target plus the role
/// the actor holds afterwards (ownership transfer changes it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionReceipt {
    /// The target account in its new state.
    pub target: Account,
    /// The actor's role after the transition.
    pub actor_role: Role,
}

/// Domain use-case port for membership transitions.
///
/// Every method checks the actor's role and the target's state before any
/// write; a failed guard is forbidden, an unknown target is not found, and
/// neither changes state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipCommand: Send + Sync {
    /// An officer turns a pending applicant into a member.
    async fn accept_application(
        &self,
        actor: &AccountId,
        target: &AccountId,
    ) -> Result<TransitionReceipt, Error>;

    /// An officer records a rejection; the target stays an applicant.
    async fn reject_application(
        &self,
        actor: &AccountId,
        target: &AccountId,
    ) -> Result<TransitionReceipt, Error>;

    /// The owner raises a member to officer.
    async fn promote_member(
        &self,
        actor: &AccountId,
        target: &AccountId,
    ) -> Result<TransitionReceipt, Error>;

    /// The owner returns an officer to member.
    async fn demote_officer(
        &self,
        actor: &AccountId,
        target: &AccountId,
    ) -> Result<TransitionReceipt, Error>;

    /// The owner hands the club to an officer and steps down to officer;
    /// both updates land in one atomic commit.
    async fn transfer_ownership(
        &self,
        actor: &AccountId,
        target: &AccountId,
    ) -> Result<TransitionReceipt, Error>;
}

/// Inert transition runner for handler tests: fabricates receipts in the
/// expected post-state without touching storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMembershipCommand;

#[async_trait]
impl MembershipCommand for FixtureMembershipCommand {
    async fn accept_application(
        &self,
        _actor: &AccountId,
        _target: &AccountId,
    ) -> Result<TransitionReceipt, Error> {
        Ok(TransitionReceipt {
            target: fixture_account(Role::Member)?,
            actor_role: Role::Officer,
        })
    }

    async fn reject_application(
        &self,
        _actor: &AccountId,
        _target: &AccountId,
    ) -> Result<TransitionReceipt, Error> {
        let mut target = fixture_account(Role::Applicant)?;
        target.set_application_status(ApplicationStatus::Rejected);
        Ok(TransitionReceipt {
            target,
            actor_role: Role::Officer,
        })
    }

    async fn promote_member(
        &self,
        _actor: &AccountId,
        _target: &AccountId,
    ) -> Result<TransitionReceipt, Error> {
        Ok(TransitionReceipt {
            target: fixture_account(Role::Officer)?,
            actor_role: Role::Owner,
        })
    }

    async fn demote_officer(
        &self,
        _actor: &AccountId,
        _target: &AccountId,
    ) -> Result<TransitionReceipt, Error> {
        Ok(TransitionReceipt {
            target: fixture_account(Role::Member)?,
            actor_role: Role::Owner,
        })
    }

    async fn transfer_ownership(
        &self,
        _actor: &AccountId,
        _target: &AccountId,
    ) -> Result<TransitionReceipt, Error> {
        Ok(TransitionReceipt {
            target: fixture_account(Role::Owner)?,
            actor_role: Role::Officer,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn fixture_accept_reports_the_member_post_state() {
        let receipt = FixtureMembershipCommand
            .accept_application(&AccountId::random(), &AccountId::random())
            .await
            .expect("fixture accept succeeds");
        assert_eq!(receipt.target.role(), Role::Member);
        assert_eq!(
            receipt.target.application_status(),
            ApplicationStatus::Accepted
        );
        assert_eq!(receipt.actor_role, Role::Officer);
    }

    #[tokio::test]
    async fn fixture_transfer_reports_the_swap() {
        let receipt = FixtureMembershipCommand
            .transfer_ownership(&AccountId::random(), &AccountId::random())
            .await
            .expect("fixture transfer succeeds");
        assert_eq!(receipt.target.role(), Role::Owner);
        assert_eq!(receipt.actor_role, Role::Officer);
    }
}
