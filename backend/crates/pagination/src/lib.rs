//! Page-number pagination primitives shared by backend listing endpoints.
//!
//! Listings use classic 1-based page numbers with a fixed page size. The
//! primitives here keep the arithmetic in one place:
//!
//! - [`Paginator`] owns the page size and turns a [`PageRequest`] into a
//!   [`PageWindow`] (offset/limit for a database query) or directly into a
//!   [`Page`] for in-memory collections.
//! - Requested page numbers are clamped into `[1, total_pages]`, so a
//!   request beyond the last page returns the final page rather than an
//!   error, and page `0` behaves as page `1`.
//! - An empty collection still has exactly one (empty) page.
//!
//! ```rust
//! use pagination::{PageRequest, Paginator};
//!
//! # fn main() -> Result<(), pagination::PageError> {
//! let paginator = Paginator::new(15)?;
//! let page = paginator.paginate((0..33).collect::<Vec<u32>>(), PageRequest::new(3));
//!
//! assert_eq!(page.items().len(), 3);
//! assert!(page.has_previous());
//! assert!(!page.has_next());
//! # Ok(())
//! # }
//! ```

use std::num::NonZeroUsize;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while constructing pagination primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    /// The paginator was configured with a page size of zero.
    #[error("page size must be non-zero")]
    ZeroPageSize,
}

/// A 1-based page number requested by a caller.
///
/// The raw number is carried as-is; clamping into the valid range happens
/// when the request is resolved against a collection size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: usize,
}

impl PageRequest {
    /// The first page.
    pub const FIRST: Self = Self { number: 1 };

    /// Build a request for the given 1-based page number.
    #[must_use]
    pub const fn new(number: usize) -> Self {
        Self { number }
    }

    /// The requested page number, before clamping.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::FIRST
    }
}

/// A resolved window over a collection: the clamped page number plus the
/// offset/limit to fetch it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    number: usize,
    offset: usize,
    limit: usize,
    total_items: usize,
    total_pages: usize,
}

impl PageWindow {
    /// The clamped, 1-based page number.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    /// Number of items to skip when fetching this window.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Maximum number of items in this window (the page size).
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Total number of items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Total number of pages (at least one).
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Assemble the envelope from items fetched for this window.
    ///
    /// The caller is responsible for fetching with [`Self::offset`] and
    /// [`Self::limit`]; the item count is not re-validated here.
    #[must_use]
    pub const fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            items,
            number: self.number,
            page_size: self.limit,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// One page of results plus the bookkeeping callers need to render
/// navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    number: usize,
    page_size: usize,
    total_items: usize,
    total_pages: usize,
}

impl<T> Page<T> {
    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    /// The configured page size.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total number of items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Total number of pages (at least one).
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Map the items while keeping the envelope bookkeeping.
    ///
    /// ```rust
    /// use pagination::{PageRequest, Paginator};
    ///
    /// # fn main() -> Result<(), pagination::PageError> {
    /// let page = Paginator::new(2)?
    ///     .paginate(vec![1, 2, 3], PageRequest::FIRST)
    ///     .map(|n| n.to_string());
    ///
    /// assert_eq!(page.items(), ["1", "2"]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Relative navigation links for a page, rendered as `path?page=N`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLinks {
    next: Option<String>,
    previous: Option<String>,
}

impl PageLinks {
    /// Build navigation links for `page`, relative to `path`.
    ///
    /// `path` is used verbatim; callers pass the route path without a query
    /// string (for example `/api/v1/roster/members`).
    #[must_use]
    pub fn for_page<T>(page: &Page<T>, path: &str) -> Self {
        Self {
            next: page
                .has_next()
                .then(|| Self::link(path, page.number() + 1)),
            previous: page
                .has_previous()
                .then(|| Self::link(path, page.number().saturating_sub(1))),
        }
    }

    /// The link to the next page, if one exists.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// The link to the previous page, if one exists.
    #[must_use]
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    fn link(path: &str, number: usize) -> String {
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("page", &number.to_string())
            .finish();
        format!("{path}?{query}")
    }
}

/// Pagination policy: a fixed page size applied to page requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: NonZeroUsize,
}

impl Paginator {
    /// Build a paginator with the given page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::ZeroPageSize`] when `page_size` is zero.
    pub const fn new(page_size: usize) -> Result<Self, PageError> {
        match NonZeroUsize::new(page_size) {
            Some(size) => Ok(Self { page_size: size }),
            None => Err(PageError::ZeroPageSize),
        }
    }

    /// The configured page size.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Resolve a request against a collection size, clamping the page
    /// number into `[1, total_pages]`.
    #[must_use]
    pub const fn resolve(&self, request: PageRequest, total_items: usize) -> PageWindow {
        let size = self.page_size.get();
        let total_pages = {
            let pages = total_items.div_ceil(size);
            if pages == 0 { 1 } else { pages }
        };
        let number = {
            let requested = request.number();
            if requested == 0 {
                1
            } else if requested > total_pages {
                total_pages
            } else {
                requested
            }
        };
        PageWindow {
            number,
            offset: (number - 1) * size,
            limit: size,
            total_items,
            total_pages,
        }
    }

    /// Paginate an in-memory collection.
    #[must_use]
    pub fn paginate<T>(&self, items: Vec<T>, request: PageRequest) -> Page<T> {
        let window = self.resolve(request, items.len());
        let selected: Vec<T> = items
            .into_iter()
            .skip(window.offset())
            .take(window.limit())
            .collect();
        window.into_page(selected)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn paginator(size: usize) -> Paginator {
        Paginator::new(size).unwrap_or_else(|error| panic!("page size {size} rejected: {error}"))
    }

    #[rstest]
    fn zero_page_size_is_rejected() {
        assert_eq!(Paginator::new(0), Err(PageError::ZeroPageSize));
    }

    #[rstest]
    #[case::first_page(1, 0)]
    #[case::middle_page(2, 15)]
    #[case::final_partial_page(3, 30)]
    fn resolve_computes_offsets(#[case] requested: usize, #[case] expected_offset: usize) {
        let window = paginator(15).resolve(PageRequest::new(requested), 33);

        assert_eq!(window.offset(), expected_offset);
        assert_eq!(window.limit(), 15);
        assert_eq!(window.total_pages(), 3);
    }

    #[rstest]
    #[case::zero_becomes_first(0, 1)]
    #[case::in_range_is_kept(2, 2)]
    #[case::beyond_last_clamps(99, 3)]
    fn resolve_clamps_page_numbers(#[case] requested: usize, #[case] resolved: usize) {
        let window = paginator(15).resolve(PageRequest::new(requested), 33);

        assert_eq!(window.number(), resolved);
    }

    #[rstest]
    fn final_page_of_33_items_holds_three() {
        let items: Vec<u32> = (0..33).collect();

        let page = paginator(15).paginate(items, PageRequest::new(3));

        assert_eq!(page.items(), [30, 31, 32]);
        assert_eq!(page.total_items(), 33);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[rstest]
    fn empty_collection_yields_one_empty_page() {
        let page = paginator(15).paginate(Vec::<u32>::new(), PageRequest::FIRST);

        assert!(page.items().is_empty());
        assert_eq!(page.number(), 1);
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[rstest]
    fn request_beyond_last_page_returns_final_page() {
        let items: Vec<u32> = (0..33).collect();

        let page = paginator(15).paginate(items, PageRequest::new(12));

        assert_eq!(page.number(), 3);
        assert_eq!(page.items(), [30, 31, 32]);
    }

    #[rstest]
    fn map_preserves_bookkeeping() {
        let page = paginator(2)
            .paginate(vec![1, 2, 3], PageRequest::FIRST)
            .map(|n| n * 10);

        assert_eq!(page.items(), [10, 20]);
        assert_eq!(page.total_items(), 3);
        assert_eq!(page.total_pages(), 2);
    }

    #[rstest]
    fn links_render_relative_queries() {
        let page = paginator(15).paginate((0..33).collect::<Vec<u32>>(), PageRequest::new(2));

        let links = PageLinks::for_page(&page, "/api/v1/roster/members");

        assert_eq!(links.next(), Some("/api/v1/roster/members?page=3"));
        assert_eq!(links.previous(), Some("/api/v1/roster/members?page=1"));
    }

    #[rstest]
    fn first_page_has_no_previous_link() {
        let page = paginator(15).paginate((0..20).collect::<Vec<u32>>(), PageRequest::FIRST);

        let links = PageLinks::for_page(&page, "/api/v1/roster/applicants");

        assert_eq!(links.previous(), None);
        assert_eq!(links.next(), Some("/api/v1/roster/applicants?page=2"));
    }

    #[rstest]
    fn envelope_serializes_in_camel_case() {
        let page = paginator(2).paginate(vec![1, 2, 3], PageRequest::FIRST);

        let value = serde_json::to_value(&page).unwrap_or_default();

        assert_eq!(value.get("items"), Some(&serde_json::json!([1, 2])));
        assert_eq!(value.get("number"), Some(&serde_json::json!(1)));
        assert_eq!(value.get("pageSize"), Some(&serde_json::json!(2)));
        assert_eq!(value.get("totalItems"), Some(&serde_json::json!(3)));
        assert_eq!(value.get("totalPages"), Some(&serde_json::json!(2)));
    }
}
