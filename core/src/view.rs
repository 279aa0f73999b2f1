//! Catalog view state machine.
//!
//! # Design
//! `CatalogView` owns the UI state (page, page size, products, total,
//! phase) and never performs I/O. Every state change that needs data issues
//! a `FetchTicket`; the host executes the request named by the ticket and
//! hands the outcome back through `apply`. Tickets carry a monotonically
//! increasing sequence number, and only the outcome of the most recently
//! issued ticket is applied, so a slow earlier response can never overwrite
//! a later one. Fetch failures become the `Failed` phase instead of
//! escaping to the caller.

use tracing::{debug, warn};

use crate::error::{error_message, ApiError};
use crate::types::{PageRequest, PageResult, Product};

pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// What the view currently shows in place of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Loaded,
    Failed(String),
}

/// Handle for one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    request: PageRequest,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn request(&self) -> PageRequest {
        self.request
    }
}

/// Outcome of handing a fetch result to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The result belonged to the latest ticket and replaced the state.
    Current,
    /// A newer ticket was issued since; the result was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct CatalogView {
    request: PageRequest,
    products: Vec<Product>,
    total: u64,
    phase: Phase,
    latest_seq: u64,
    /// Set once a page has loaded; until then `total` is not the server's.
    total_known: bool,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self {
            request: PageRequest::first(DEFAULT_PAGE_SIZE),
            products: Vec::new(),
            total: 0,
            phase: Phase::Loaded,
            latest_seq: 0,
            total_known: false,
        }
    }
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    /// View starting on `page` with `page_size` items per page.
    pub fn starting_at(page: u32, page_size: u32) -> Result<Self, ApiError> {
        Ok(Self {
            request: PageRequest::new(page, page_size)?,
            ..Self::default()
        })
    }

    /// Initial fetch for the current page.
    pub fn mount(&mut self) -> FetchTicket {
        self.issue(self.request)
    }

    /// Move to `page` with `size` items per page. Always re-fetches, even
    /// when the pair is unchanged.
    pub fn change_page(&mut self, page: u32, size: u32) -> Result<FetchTicket, ApiError> {
        self.request = PageRequest::new(page, size)?;
        Ok(self.issue(self.request))
    }

    /// Next page, or `None` on the last one. Before any page has loaded the
    /// page count is unknown and the move is always allowed.
    pub fn next_page(&mut self) -> Option<FetchTicket> {
        let page = self.request.page();
        if self.total_known && page >= self.page_count() {
            return None;
        }
        self.change_page(page + 1, self.request.limit()).ok()
    }

    pub fn prev_page(&mut self) -> Option<FetchTicket> {
        let page = self.request.page();
        if page <= 1 {
            return None;
        }
        self.change_page(page - 1, self.request.limit()).ok()
    }

    /// Switch the page size and go back to the first page.
    pub fn set_page_size(&mut self, size: u32) -> Result<FetchTicket, ApiError> {
        self.change_page(1, size)
    }

    /// Hand the outcome of `ticket`'s request to the view.
    pub fn apply(&mut self, ticket: FetchTicket, outcome: Result<PageResult, ApiError>) -> Applied {
        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale page result"
            );
            return Applied::Stale;
        }

        match outcome {
            Ok(page) => {
                debug!(
                    seq = ticket.seq,
                    count = page.products.len(),
                    total = page.total,
                    "page loaded"
                );
                self.products = page.products;
                self.total = page.total;
                self.total_known = true;
                self.phase = Phase::Loaded;
            }
            Err(err) => {
                let message = error_message(&err);
                warn!(seq = ticket.seq, error = %err, "failed to fetch products");
                self.products.clear();
                self.phase = Phase::Failed(message);
            }
        }
        Applied::Current
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn current_page(&self) -> u32 {
        self.request.page()
    }

    pub fn page_size(&self) -> u32 {
        self.request.limit()
    }

    /// Number of pages implied by the last known total; at least 1.
    pub fn page_count(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.request.limit())).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    fn issue(&mut self, request: PageRequest) -> FetchTicket {
        self.latest_seq += 1;
        self.phase = Phase::Loading;
        debug!(
            seq = self.latest_seq,
            page = request.page(),
            limit = request.limit(),
            "issuing page fetch"
        );
        FetchTicket {
            seq: self.latest_seq,
            request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn products(n: usize) -> Vec<Product> {
        (1..=n)
            .map(|i| Product {
                id: ProductId::new(i.to_string()),
                title: format!("Product {i}"),
                thumbnail: format!("https://cdn.example/{i}.png"),
                description: format!("Description {i}"),
            })
            .collect()
    }

    fn page(n: usize, total: u64) -> PageResult {
        PageResult {
            products: products(n),
            total,
        }
    }

    #[test]
    fn starts_on_first_page_with_default_size() {
        let view = CatalogView::new();
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.page_size(), DEFAULT_PAGE_SIZE);
        assert!(!view.is_loading());
        assert!(view.products().is_empty());
        assert_eq!(view.total(), 0);
    }

    #[test]
    fn mount_enters_loading_with_current_request() {
        let mut view = CatalogView::new();
        let ticket = view.mount();
        assert!(view.is_loading());
        assert_eq!(ticket.seq(), 1);
        assert_eq!(ticket.request(), PageRequest::new(1, 12).unwrap());
    }

    #[test]
    fn successful_fetch_replaces_list_and_total() {
        let mut view = CatalogView::new();
        let ticket = view.mount();
        assert_eq!(view.apply(ticket, Ok(page(5, 5))), Applied::Current);
        assert_eq!(view.phase(), &Phase::Loaded);
        assert_eq!(view.products().len(), 5);
        assert_eq!(view.total(), 5);
        assert_eq!(view.products()[0].title, "Product 1");
        assert_eq!(view.products()[4].title, "Product 5");
    }

    #[test]
    fn change_page_issues_exact_request_and_supersedes_previous_list() {
        let mut view = CatalogView::new();
        let first = view.mount();
        view.apply(first, Ok(page(12, 30)));

        let second = view.change_page(2, 12).unwrap();
        assert!(view.is_loading());
        assert_eq!(second.request(), PageRequest::new(2, 12).unwrap());
        assert_eq!(view.current_page(), 2);

        let mut next = page(12, 30);
        next.products[0].title = "Page two".to_string();
        view.apply(second, Ok(next));
        assert_eq!(view.products().len(), 12);
        assert_eq!(view.products()[0].title, "Page two");
    }

    #[test]
    fn change_page_rejects_zero_without_touching_state() {
        let mut view = CatalogView::new();
        let err = view.change_page(0, 12).unwrap_err();
        assert!(matches!(err, ApiError::InvalidPageRequest { .. }));
        assert_eq!(view.current_page(), 1);
        assert!(!view.is_loading());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut view = CatalogView::new();
        let slow = view.mount();
        let fast = view.change_page(2, 12).unwrap();

        assert_eq!(view.apply(fast, Ok(page(3, 15))), Applied::Current);
        assert_eq!(view.apply(slow, Ok(page(12, 15))), Applied::Stale);

        assert_eq!(view.products().len(), 3);
        assert_eq!(view.current_page(), 2);
        assert_eq!(view.phase(), &Phase::Loaded);
    }

    #[test]
    fn stale_response_does_not_end_loading() {
        let mut view = CatalogView::new();
        let old = view.mount();
        let _current = view.change_page(2, 12).unwrap();
        view.apply(old, Ok(page(12, 30)));
        assert!(view.is_loading());
        assert!(view.products().is_empty());
    }

    #[test]
    fn failure_clears_list_and_records_message() {
        let mut view = CatalogView::new();
        let ticket = view.mount();
        view.apply(ticket, Ok(page(4, 4)));

        let ticket = view.change_page(1, 12).unwrap();
        let err = ApiError::HttpError {
            status: 503,
            body: r#"{"message":"maintenance"}"#.to_string(),
        };
        assert_eq!(view.apply(ticket, Err(err)), Applied::Current);
        assert!(!view.is_loading());
        assert!(view.products().is_empty());
        assert_eq!(view.phase(), &Phase::Failed("maintenance".to_string()));
    }

    #[test]
    fn next_and_prev_stay_in_range() {
        let mut view = CatalogView::new();
        assert!(view.prev_page().is_none());
        let ticket = view.mount();
        view.apply(ticket, Ok(page(12, 30)));
        assert_eq!(view.page_count(), 3);

        let t = view.next_page().unwrap();
        assert_eq!(t.request().page(), 2);
        let t = view.next_page().unwrap();
        assert_eq!(t.request().page(), 3);
        assert!(view.next_page().is_none());
        let t = view.prev_page().unwrap();
        assert_eq!(t.request().page(), 2);
    }

    #[test]
    fn next_before_first_load_is_allowed() {
        let mut view = CatalogView::new();
        let first = view.mount();
        let ticket = view.next_page().unwrap();
        assert_eq!(ticket.request(), PageRequest::new(2, 12).unwrap());

        assert_eq!(view.apply(first, Ok(page(12, 30))), Applied::Stale);
        view.apply(ticket, Ok(page(12, 30)));
        assert_eq!(view.current_page(), 2);
        assert_eq!(view.products().len(), 12);
    }

    #[test]
    fn failed_first_load_keeps_page_count_unknown() {
        let mut view = CatalogView::new();
        let ticket = view.mount();
        view.apply(ticket, Err(ApiError::Transport("refused".to_string())));
        assert!(view.next_page().is_some());
    }

    #[test]
    fn set_page_size_resets_to_first_page() {
        let mut view = CatalogView::starting_at(3, 12).unwrap();
        let ticket = view.set_page_size(24).unwrap();
        assert_eq!(ticket.request(), PageRequest::new(1, 24).unwrap());
        assert_eq!(view.page_size(), 24);
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn page_count_is_at_least_one() {
        let view = CatalogView::new();
        assert_eq!(view.page_count(), 1);
    }

    #[test]
    fn sequence_numbers_increase() {
        let mut view = CatalogView::new();
        let a = view.mount();
        let b = view.change_page(1, 12).unwrap();
        let c = view.set_page_size(6).unwrap();
        assert!(a.seq() < b.seq() && b.seq() < c.seq());
    }
}
