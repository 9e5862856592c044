//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureLoginService, FixtureMembershipCommand, FixtureProfileCommand, FixtureProfileQuery,
    FixtureRegistrationService, FixtureRosterQuery, LoginService, MembershipCommand,
    ProfileCommand, ProfileQuery, RegistrationService, RosterQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub profiles: Arc<dyn ProfileQuery>,
    pub profile_commands: Arc<dyn ProfileCommand>,
    pub membership: Arc<dyn MembershipCommand>,
    pub rosters: Arc<dyn RosterQuery>,
}

impl HttpState {
    /// Construct state backed entirely by fixture ports.
    ///
    /// Useful for handler tests and for running the server without a
    /// database.
    ///
    /// # Examples
    /// ```
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::fixtures();
    /// let _login = state.login.clone();
    /// ```
    #[must_use]
    pub fn fixtures() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            registration: Arc::new(FixtureRegistrationService),
            profiles: Arc::new(FixtureProfileQuery),
            profile_commands: Arc::new(FixtureProfileCommand),
            membership: Arc::new(FixtureMembershipCommand),
            rosters: Arc::new(FixtureRosterQuery),
        }
    }
}
