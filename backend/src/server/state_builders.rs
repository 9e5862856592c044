//! Builders for HTTP state ports and repository-backed service wiring.

use std::sync::Arc;

use actix_web::web;

use backend::domain::ports::AccountRepository;
use backend::domain::{AccountService, MembershipService};
use backend::inbound::http::state::HttpState;
use backend::outbound::password::Sha256PasswordHasher;
use backend::outbound::persistence::DieselAccountRepository;

use super::ServerConfig;

/// Wire both domain services over one shared repository so every port
/// observes the same stored accounts.
fn state_from_repository<R>(repository: Arc<R>) -> HttpState
where
    R: AccountRepository + 'static,
{
    let hasher = Arc::new(Sha256PasswordHasher::new());
    let accounts = Arc::new(AccountService::new(Arc::clone(&repository), hasher));
    let membership = Arc::new(MembershipService::new(repository));
    HttpState {
        login: accounts.clone(),
        registration: accounts.clone(),
        profiles: accounts.clone(),
        profile_commands: accounts,
        membership: membership.clone(),
        rosters: membership,
    }
}

/// Build the shared HTTP state from the configured persistence, falling
/// back to fixture ports when no database pool is attached.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => state_from_repository(Arc::new(DieselAccountRepository::new(pool.clone()))),
        None => HttpState::fixtures(),
    };
    web::Data::new(state)
}
