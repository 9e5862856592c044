//! Membership domain services.
//!
//! This module implements the driving ports for the guarded role
//! transitions and the roster listings. Guards are planned against the
//! roles read here, then re-checked by the repository at commit time so
//! concurrent transitions cannot slip past each other.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use serde_json::json;

use crate::domain::account::{Account, AccountId};
use crate::domain::error::Error;
use crate::domain::membership::MembershipAction;
use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, MembershipCommand, RosterQuery, TransitionReceipt,
};
use crate::domain::roster::{ROSTER_PAGINATOR, RosterCollection};

/// Membership service implementing the transition and roster ports.
#[derive(Clone)]
pub struct MembershipService<R> {
    repository: Arc<R>,
}

impl<R> MembershipService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> MembershipService<R>
where
    R: AccountRepository,
{
    fn map_repository_error(error: AccountRepositoryError) -> Error {
        match error {
            AccountRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("account repository unavailable: {message}"))
            }
            AccountRepositoryError::Query { message } => {
                Error::internal(format!("account repository error: {message}"))
            }
            AccountRepositoryError::DuplicateUsername => {
                Error::conflict("username is already taken")
            }
            AccountRepositoryError::DuplicateEmail => {
                Error::conflict("email is already registered")
            }
            AccountRepositoryError::NotFound => Error::not_found("account not found"),
            AccountRepositoryError::PreconditionFailed { message } => Error::forbidden(message),
        }
    }

    /// Resolve a session's account, refusing missing or deactivated ones.
    async fn require_actor(&self, id: &AccountId) -> Result<Account, Error> {
        let account = self
            .repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?;
        match account {
            Some(account) if account.is_active() => Ok(account),
            _ => Err(Error::unauthorized(
                "session account is missing or deactivated",
            )),
        }
    }

    async fn run_transition(
        &self,
        action: MembershipAction,
        actor: &AccountId,
        target: &AccountId,
    ) -> Result<TransitionReceipt, Error> {
        let actor_account = self.require_actor(actor).await?;
        let target_account = self
            .repository
            .find_by_id(target)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("account not found"))?;

        let outcome = action
            .plan(actor_account.role(), target_account.role())
            .map_err(|reason| {
                Error::forbidden(format!("{action} refused: {reason}")).with_details(json!({
                    "action": action.as_str(),
                    "reason": reason.to_string(),
                }))
            })?;

        // A post-transition actor role means two records change; that pair
        // must commit atomically.
        if let Some(actor_role) = outcome.actor_role {
            let refreshed = self
                .repository
                .transfer_ownership(actor, target)
                .await
                .map_err(Self::map_repository_error)?;
            return Ok(TransitionReceipt {
                target: refreshed,
                actor_role,
            });
        }

        let refreshed = self
            .repository
            .update_standing(
                target,
                action.required_target_role(),
                outcome.target_role,
                outcome.target_status,
            )
            .await
            .map_err(Self::map_repository_error)?;
        Ok(TransitionReceipt {
            target: refreshed,
            actor_role: actor_account.role(),
        })
    }
}

#[async_trait]
impl<R> MembershipCommand for MembershipService<R>
where
    R: AccountRepository,
{
    async fn accept_application(
        &self,
        actor: &AccountId,
        target: &AccountId,
    ) -> Result<TransitionReceipt, Error> {
        self.run_transition(MembershipAction::AcceptApplication, actor, target)
            .await
    }

    async fn reject_application(
        &self,
        actor: &AccountId,
        target: &AccountId,
    ) -> Result<TransitionReceipt, Error> {
        self.run_transition(MembershipAction::RejectApplication, actor, target)
            .await
    }

    async fn promote_member(
        &self,
        actor: &AccountId,
        target: &AccountId,
    ) -> Result<TransitionReceipt, Error> {
        self.run_transition(MembershipAction::PromoteMember, actor, target)
            .await
    }

    async fn demote_officer(
        &self,
        actor: &AccountId,
        target: &AccountId,
    ) -> Result<TransitionReceipt, Error> {
        self.run_transition(MembershipAction::DemoteOfficer, actor, target)
            .await
    }

    async fn transfer_ownership(
        &self,
        actor: &AccountId,
        target: &AccountId,
    ) -> Result<TransitionReceipt, Error> {
        self.run_transition(MembershipAction::TransferOwnership, actor, target)
            .await
    }
}

#[async_trait]
impl<R> RosterQuery for MembershipService<R>
where
    R: AccountRepository,
{
    async fn browse(
        &self,
        viewer: &AccountId,
        collection: RosterCollection,
        page: PageRequest,
    ) -> Result<Page<Account>, Error> {
        let viewer_account = self.require_actor(viewer).await?;
        if !collection.viewable_by(viewer_account.role()) {
            return Err(
                Error::forbidden(format!("the {collection} roster is not available"))
                    .with_details(json!({
                        "collection": collection.as_str(),
                        "viewerRole": viewer_account.role().as_str(),
                    })),
            );
        }

        let listed_role = collection.listed_role();
        let total = self
            .repository
            .count_by_role(listed_role)
            .await
            .map_err(Self::map_repository_error)?;
        let window = ROSTER_PAGINATOR.resolve(page, total);
        let items = self
            .repository
            .list_by_role(listed_role, window.offset(), window.limit())
            .await
            .map_err(Self::map_repository_error)?;
        Ok(window.into_page(items))
    }
}
