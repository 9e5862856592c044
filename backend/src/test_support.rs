//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is compiled for tests and behind the
//! `test-support` feature.

pub mod http {
    //! In-memory service wiring for HTTP handler and integration tests.

    use std::sync::Arc;

    use actix_session::SessionMiddleware;
    use actix_session::storage::CookieSessionStore;
    use actix_web::cookie::Key;

    use crate::domain::ports::{AccountRepository, InMemoryAccountRepository, PasswordHasher};
    use crate::domain::{
        Account, AccountId, AccountIdentity, AccountProfile, AccountService, ApplicationStatus,
        EmailAddress, MembershipService, PersonName, Role, Username,
    };
    use crate::inbound::http::state::HttpState;
    use crate::outbound::password::Sha256PasswordHasher;

    /// Password shared by every seeded account.
    pub const SEED_PASSWORD: &str = "Password123";

    /// Build an [`HttpState`] whose services share one in-memory repository,
    /// plus a handle on that repository for seeding accounts directly.
    pub fn memory_state_with_repository() -> (HttpState, Arc<InMemoryAccountRepository>) {
        let repository = Arc::new(InMemoryAccountRepository::new());
        let hasher = Arc::new(Sha256PasswordHasher::new());
        let accounts = Arc::new(AccountService::new(Arc::clone(&repository), hasher));
        let membership = Arc::new(MembershipService::new(Arc::clone(&repository)));

        let state = HttpState {
            login: accounts.clone(),
            registration: accounts.clone(),
            profiles: accounts.clone(),
            profile_commands: accounts,
            membership: membership.clone(),
            rosters: membership,
        };
        (state, repository)
    }

    /// Build an [`HttpState`] whose services share one in-memory repository,
    /// so sign-up, login, transitions, and rosters observe each other.
    pub fn memory_state() -> HttpState {
        memory_state_with_repository().0
    }

    /// Insert an active account holding `role`, logging in with
    /// [`SEED_PASSWORD`]. Returns the new account's id.
    pub async fn seed_account(
        repository: &InMemoryAccountRepository,
        username: &str,
        role: Role,
    ) -> AccountId {
        let identity = AccountIdentity {
            username: Username::new(username).expect("seed username is valid"),
            first_name: PersonName::new("Seeded").expect("seed first name is valid"),
            last_name: PersonName::new("Account").expect("seed last name is valid"),
            email: EmailAddress::new(format!("{username}@example.org"))
                .expect("seed email is valid"),
        };
        let account = Account::applicant(AccountId::random(), identity, AccountProfile::default());
        let digest = Sha256PasswordHasher::new()
            .hash(SEED_PASSWORD)
            .expect("seed password hashes");
        repository
            .insert(&account, &digest)
            .await
            .expect("seed account inserts");
        if role != Role::Applicant {
            repository
                .update_standing(
                    account.id(),
                    Role::Applicant,
                    role,
                    Some(ApplicationStatus::Accepted),
                )
                .await
                .expect("seed account reaches its role");
        }
        account.id().clone()
    }

    /// Session middleware with a throwaway key and relaxed cookie security
    /// for plain-HTTP test servers.
    pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
            .cookie_name("session".to_owned())
            .cookie_secure(false)
            .build()
    }
}
