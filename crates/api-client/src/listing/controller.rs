//! Paginated list state machine

use super::filter::{Filter, ListItem, Matcher, distinct_categories, matches_query};
use super::{PageRequest, PageSource};
use crate::error::ApiResult;
use crate::models::Paginated;
use tracing::{debug, trace};

/// What a list view should render
#[derive(Debug, PartialEq)]
pub enum ListView<'a, T> {
    /// A fetch is in flight
    Loading,
    /// The server returned an empty page
    Empty,
    /// The page has items but the filter hides all of them
    NoMatch,
    /// Items to show, in server order
    Items(Vec<&'a T>),
}

/// Proof that a fetch was started; its result is applied only if no later
/// fetch was started in the meantime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct FetchTicket {
    generation: u64,
    request: PageRequest,
}

impl FetchTicket {
    /// Page and size to fetch
    pub fn request(&self) -> PageRequest {
        self.request
    }
}

/// Drives one paginated list view
///
/// The controller owns the current page, the fetched items and the
/// page-local filter. Searching only narrows what was already fetched; only
/// page changes and [`refresh`](Self::refresh) go back to the source.
pub struct ListController<T, S> {
    source: S,
    page: u32,
    page_size: u32,
    items: Vec<T>,
    total: u64,
    total_pages: Option<u32>,
    loading: bool,
    filter: Filter,
    matcher: Matcher<T>,
    generation: u64,
    closed: bool,
}

impl<T, S> ListController<T, S>
where
    T: ListItem,
    S: PageSource<T>,
{
    /// Create a controller on page 1; nothing is fetched until [`load`](Self::load)
    pub fn new(source: S, page_size: u32) -> Self {
        Self {
            source,
            page: 1,
            page_size: page_size.max(1),
            items: Vec::new(),
            total: 0,
            total_pages: None,
            loading: true,
            filter: Filter::new(),
            matcher: matches_query::<T>,
            generation: 0,
            closed: false,
        }
    }

    /// Replace the search matcher (the default searches every haystack)
    #[must_use]
    pub fn with_matcher(mut self, matcher: Matcher<T>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Start on another page
    #[must_use]
    pub fn starting_at(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    // -------------------------------------------------------------------------
    // Fetching
    // -------------------------------------------------------------------------

    /// Mark a fetch of the current page as started
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
            request: PageRequest::new(self.page, self.page_size),
        }
    }

    /// Apply a fetched page; returns `false` when the result was discarded
    pub fn apply(&mut self, ticket: FetchTicket, page: Paginated<T>) -> bool {
        if self.closed || ticket.generation != self.generation {
            trace!(
                ticket = ticket.generation,
                latest = self.generation,
                closed = self.closed,
                "Discarding stale page"
            );
            return false;
        }

        self.items = page.data;
        self.total = page.total;
        self.total_pages = Some(page.total_page);
        self.loading = false;
        true
    }

    /// Record that a fetch failed; the previous items stay in place
    pub fn fail(&mut self, ticket: FetchTicket) {
        if !self.closed && ticket.generation == self.generation {
            self.loading = false;
        }
    }

    /// Fetch the current page
    pub async fn load(&mut self) -> ApiResult<()> {
        let ticket = self.begin_fetch();
        debug!(page = self.page, page_size = self.page_size, "Fetching page");

        match self.source.fetch_page(ticket.request).await {
            Ok(page) => {
                self.apply(ticket, page);
                Ok(())
            }
            Err(e) => {
                self.fail(ticket);
                Err(e)
            }
        }
    }

    /// Re-fetch the current page (after a mutation)
    pub async fn refresh(&mut self) -> ApiResult<()> {
        self.load().await
    }

    /// Go to `page` and fetch it
    ///
    /// The page is clamped to `1..=total_pages` once the page count is
    /// known. Returns `false` without fetching when the clamped page is
    /// already loaded. On a failed fetch the previous page number is kept,
    /// so `page()` still describes the items on screen.
    pub async fn set_page(&mut self, page: u32) -> ApiResult<bool> {
        let target = self.clamp(page);
        if target == self.page && self.total_pages.is_some() {
            return Ok(false);
        }
        let previous = std::mem::replace(&mut self.page, target);
        if let Err(e) = self.load().await {
            self.page = previous;
            return Err(e);
        }
        Ok(true)
    }

    /// Go to the next page, if any
    pub async fn next_page(&mut self) -> ApiResult<bool> {
        self.set_page(self.page.saturating_add(1)).await
    }

    /// Go to the previous page, if any
    pub async fn prev_page(&mut self) -> ApiResult<bool> {
        self.set_page(self.page.saturating_sub(1)).await
    }

    fn clamp(&self, page: u32) -> u32 {
        let page = page.max(1);
        match self.total_pages {
            Some(last) if last > 0 => page.min(last),
            Some(_) => 1,
            None => page,
        }
    }

    /// Stop applying results; later fetches are discarded
    pub fn close(&mut self) {
        self.closed = true;
        self.loading = false;
    }

    // -------------------------------------------------------------------------
    // Local state
    // -------------------------------------------------------------------------

    /// Drop an item from the current page without a fetch
    pub fn remove_local(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        let removed = self.items.len() != before;
        if removed {
            self.total = self.total.saturating_sub(1);
        }
        removed
    }

    /// Set the search text; never fetches
    pub fn set_filter(&mut self, text: &str) {
        self.filter.set_query(text);
    }

    /// Set the category (`"all"` clears it); never fetches
    pub fn set_category(&mut self, category: &str) {
        self.filter.set_category(category);
    }

    /// Reset search text and category
    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    /// Items of the current page that pass the filter
    pub fn visible(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| self.filter.accepts(*item, self.matcher))
            .collect()
    }

    /// What to render
    pub fn view(&self) -> ListView<'_, T> {
        if self.loading {
            return ListView::Loading;
        }
        if self.items.is_empty() {
            return ListView::Empty;
        }
        let visible = self.visible();
        if visible.is_empty() {
            ListView::NoMatch
        } else {
            ListView::Items(visible)
        }
    }

    /// Distinct categories on the current page
    pub fn categories(&self) -> Vec<&str> {
        distinct_categories(&self.items)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current 1-based page
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page size requested from the source
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Items on the current page, unfiltered
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Total items across pages, as reported by the server
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of pages, once a page has been fetched
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Check whether a fetch is in flight (or none has completed yet)
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Check whether [`close`](Self::close) was called
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Active filter
    pub fn filter(&self) -> &Filter {
        &self.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        name: String,
    }

    impl ListItem for Row {
        fn id(&self) -> &str {
            &self.id
        }
        fn haystacks(&self) -> Vec<&str> {
            vec![self.name.as_str()]
        }
    }

    /// Serves `total` rows named `row-N`, recording each request
    struct Numbers {
        total: u32,
        requests: Mutex<Vec<PageRequest>>,
    }

    impl Numbers {
        fn new(total: u32) -> Self {
            Self {
                total,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<PageRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl<'a> PageSource<Row> for &'a Numbers {
        async fn fetch_page(&self, request: PageRequest) -> ApiResult<Paginated<Row>> {
            self.requests.lock().unwrap().push(request);
            let start = (request.page - 1) * request.page_size;
            let end = (start + request.page_size).min(self.total);
            let data = (start..end)
                .map(|n| Row {
                    id: n.to_string(),
                    name: format!("row-{n}"),
                })
                .collect();
            Ok(Paginated {
                data,
                total: u64::from(self.total),
                total_page: self.total.div_ceil(request.page_size),
                page: request.page,
                limit: request.page_size,
            })
        }
    }

    fn row(id: &str) -> Row {
        Row {
            id: id.to_string(),
            name: id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_then_view() {
        let source = Numbers::new(25);
        let mut list = ListController::new(&source, 10);
        assert_eq!(list.view(), ListView::Loading);

        list.load().await.unwrap();

        assert_eq!(list.items().len(), 10);
        assert_eq!(list.total_pages(), Some(3));
        assert!(matches!(list.view(), ListView::Items(items) if items.len() == 10));
    }

    #[tokio::test]
    async fn test_page_clamped_to_bounds() {
        let source = Numbers::new(25);
        let mut list = ListController::new(&source, 10);
        list.load().await.unwrap();

        assert!(!list.prev_page().await.unwrap());
        assert!(list.set_page(99).await.unwrap());
        assert_eq!(list.page(), 3);
        assert!(!list.next_page().await.unwrap());

        let pages: Vec<u32> = source.requests().iter().map(|r| r.page).collect();
        assert_eq!(pages, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_empty_source() {
        let source = Numbers::new(0);
        let mut list = ListController::new(&source, 10);
        list.load().await.unwrap();
        assert_eq!(list.view(), ListView::Empty);
        assert!(!list.next_page().await.unwrap());
    }

    #[tokio::test]
    async fn test_filter_never_fetches() {
        let source = Numbers::new(10);
        let mut list = ListController::new(&source, 10);
        list.load().await.unwrap();

        list.set_filter("ROW-1");
        assert!(matches!(list.view(), ListView::Items(items) if items.len() == 1));

        list.set_filter("nothing");
        assert_eq!(list.view(), ListView::NoMatch);

        list.clear_filter();
        assert_eq!(list.visible().len(), 10);
        assert_eq!(source.requests().len(), 1);
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let source = Numbers::new(0);
        let mut list = ListController::new(&source, 10);

        let first = list.begin_fetch();
        let second = list.begin_fetch();

        assert!(!list.apply(first, Paginated::single_page(vec![row("old")])));
        assert!(list.is_loading());
        assert!(list.apply(second, Paginated::single_page(vec![row("new")])));
        assert_eq!(list.items()[0].id, "new");
    }

    #[test]
    fn test_closed_controller_ignores_results() {
        let source = Numbers::new(0);
        let mut list = ListController::new(&source, 10);

        let ticket = list.begin_fetch();
        list.close();

        assert!(!list.apply(ticket, Paginated::single_page(vec![row("late")])));
        assert!(list.items().is_empty());
        assert!(list.is_closed());
    }

    #[test]
    fn test_remove_local() {
        let source = Numbers::new(0);
        let mut list = ListController::new(&source, 10);
        let ticket = list.begin_fetch();
        list.apply(ticket, Paginated::single_page(vec![row("a"), row("b")]));

        assert!(list.remove_local("a"));
        assert!(!list.remove_local("a"));
        assert_eq!(list.total(), 1);
        assert_eq!(list.items(), &[row("b")]);
    }

    #[test]
    fn test_custom_matcher() {
        let source = Numbers::new(0);
        let mut list =
            ListController::new(&source, 10).with_matcher(|row: &Row, q: &str| row.id.starts_with(q));
        let ticket = list.begin_fetch();
        list.apply(ticket, Paginated::single_page(vec![row("ab"), row("ba")]));

        list.set_filter("a");
        assert_eq!(list.visible(), vec![&row("ab")]);
    }
}
