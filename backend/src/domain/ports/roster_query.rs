//! Driving port for browsing the club rosters.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::account::{Account, AccountId};
use crate::domain::error::Error;
use crate::domain::roster::{ROSTER_PAGINATOR, RosterCollection};

/// Domain use-case port for roster listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterQuery: Send + Sync {
    /// Page through a roster the viewer is allowed to browse.
    ///
    /// Results are ordered by username at the fixed roster page size; page
    /// numbers outside the valid range clamp to the nearest page. A viewer
    /// without access to the collection fails as forbidden.
    async fn browse(
        &self,
        viewer: &AccountId,
        collection: RosterCollection,
        page: PageRequest,
    ) -> Result<Page<Account>, Error>;
}

/// Inert roster reader for handler tests: every roster is empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRosterQuery;

#[async_trait]
impl RosterQuery for FixtureRosterQuery {
    async fn browse(
        &self,
        _viewer: &AccountId,
        _collection: RosterCollection,
        page: PageRequest,
    ) -> Result<Page<Account>, Error> {
        Ok(ROSTER_PAGINATOR.resolve(page, 0).into_page(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn fixture_roster_serves_an_empty_first_page() {
        let page = FixtureRosterQuery
            .browse(
                &AccountId::random(),
                RosterCollection::Members,
                PageRequest::FIRST,
            )
            .await
            .expect("fixture roster succeeds");
        assert!(page.items().is_empty());
        assert_eq!(page.number(), 1);
        assert_eq!(page.total_pages(), 1);
    }
}
