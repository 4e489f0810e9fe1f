//! Page-by-page list state for aliases, contacts and activities.
//!
//! One [`PagedList`] instance backs one on-screen list. The bookkeeping
//! follows the list-fetch rules of the service's clients: at most one
//! in-flight page fetch per list, extra calls dropped (not queued), and
//! a short or empty page marking the end of the collection until the
//! next refresh.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Server-side page size; a page shorter than this is the last one.
pub const PAGE_SIZE: usize = 20;

/// What a `load_more`/`refresh` call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page was fetched and this many items were appended.
    Loaded(usize),
    /// The call was dropped: a fetch was already in flight, or the list
    /// has no more pages.
    Skipped,
}

#[derive(Debug)]
struct ListState<T> {
    items: Vec<T>,
    /// Next page to request, zero-based.
    page: u32,
    in_flight: bool,
    more_to_load: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            in_flight: false,
            more_to_load: true,
        }
    }
}

/// An insertion-ordered collection filled one server page at a time.
///
/// All mutation happens through [`PagedList::load_more`] and
/// [`PagedList::refresh`]. The internal lock is only ever held across
/// synchronous bookkeeping, never across an await; the `in_flight` flag,
/// not the lock, is what drops concurrent calls.
#[derive(Debug, Default)]
pub struct PagedList<T> {
    state: Mutex<ListState<T>>,
}

impl<T> PagedList<T> {
    /// Creates an empty list expecting its first page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ListState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the next page with `fetch` and appends its items.
    ///
    /// Dropped ([`FetchOutcome::Skipped`]) when a fetch is already in
    /// flight or when the last page was already seen. A failed fetch
    /// leaves the page index and `more_to_load` untouched, so the caller
    /// can simply re-trigger.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error unchanged; nothing is retried.
    pub async fn load_more<F, Fut, E>(&self, fetch: F) -> Result<FetchOutcome, E>
    where
        F: FnOnce(u32) -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        let page = {
            let mut state = self.lock();
            if state.in_flight || !state.more_to_load {
                return Ok(FetchOutcome::Skipped);
            }
            state.in_flight = true;
            state.page
        };

        let result = fetch(page).await;
        self.finish(result)
    }

    /// Clears the list and re-fetches page zero with `fetch`.
    ///
    /// Dropped ([`FetchOutcome::Skipped`]) when a fetch is already in
    /// flight — at most one in-flight fetch per list instance, extra
    /// calls are ignored rather than queued. The collection is cleared
    /// before the fetch starts, matching pull-to-refresh semantics.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error unchanged; the list stays empty and
    /// ready for another refresh.
    pub async fn refresh<F, Fut, E>(&self, fetch: F) -> Result<FetchOutcome, E>
    where
        F: FnOnce(u32) -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        {
            let mut state = self.lock();
            if state.in_flight {
                return Ok(FetchOutcome::Skipped);
            }
            state.in_flight = true;
            state.items.clear();
            state.page = 0;
            state.more_to_load = true;
        }

        let result = fetch(0).await;
        self.finish(result)
    }

    fn finish<E>(&self, result: Result<Vec<T>, E>) -> Result<FetchOutcome, E> {
        let mut state = self.lock();
        state.in_flight = false;
        match result {
            Ok(items) => {
                let count = items.len();
                if count < PAGE_SIZE {
                    state.more_to_load = false;
                }
                state.items.extend(items);
                state.page += 1;
                Ok(FetchOutcome::Loaded(count))
            }
            Err(err) => Err(err),
        }
    }

    /// Number of items loaded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    /// Whether no items are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Whether the server may still have more pages.
    #[must_use]
    pub fn more_to_load(&self) -> bool {
        self.lock().more_to_load
    }

    /// Whether a page fetch is currently in flight.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.lock().in_flight
    }
}

impl<T: Clone> PagedList<T> {
    /// Snapshot of the loaded items, in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.lock().items.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready, task};

    type TestResult = Result<Vec<u32>, String>;

    /// Fetch stub for calls that the guard must drop before fetching.
    async fn no_fetch(_page: u32) -> TestResult {
        panic!("must not fetch while dropped or terminal")
    }

    fn full_page(page: u32) -> Vec<u32> {
        let base = page * u32::try_from(PAGE_SIZE).unwrap();
        (base..base + u32::try_from(PAGE_SIZE).unwrap()).collect()
    }

    #[tokio::test]
    async fn test_pages_accumulate_until_empty_page() {
        let list = PagedList::new();

        let outcome = list
            .load_more(|page| async move { TestResult::Ok(full_page(page)) })
            .await
            .unwrap();
        assert_eq!(outcome, FetchOutcome::Loaded(PAGE_SIZE));
        assert!(list.more_to_load());

        list.load_more(|page| async move { TestResult::Ok(full_page(page)) })
            .await
            .unwrap();
        assert!(list.more_to_load());
        assert_eq!(list.len(), 40);

        let outcome = list
            .load_more(|_page| async move { TestResult::Ok(Vec::new()) })
            .await
            .unwrap();
        assert_eq!(outcome, FetchOutcome::Loaded(0));
        assert!(!list.more_to_load());
        assert_eq!(list.len(), 40);

        // Terminal: further calls are dropped without fetching.
        let outcome = list.load_more(no_fetch).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_short_page_is_the_last_page() {
        let list = PagedList::new();
        list.load_more(|_page| async move { TestResult::Ok(vec![1, 2, 3]) })
            .await
            .unwrap();
        assert_eq!(list.len(), 3);
        assert!(!list.more_to_load());
    }

    #[tokio::test]
    async fn test_pages_are_requested_in_order() {
        let list = PagedList::new();
        for expected in 0..3 {
            list.load_more(|page| async move {
                assert_eq!(page, expected);
                TestResult::Ok(full_page(page))
            })
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_state_for_retry() {
        let list = PagedList::new();
        list.load_more(|page| async move { TestResult::Ok(full_page(page)) })
            .await
            .unwrap();

        let err = list
            .load_more(|_page| async move { TestResult::Err("boom".into()) })
            .await
            .unwrap_err();
        assert_eq!(err, "boom");
        assert_eq!(list.len(), PAGE_SIZE);
        assert!(list.more_to_load());
        assert!(!list.is_fetching());

        // Retry resumes at the same page index.
        list.load_more(|page| async move {
            assert_eq!(page, 1);
            TestResult::Ok(full_page(page))
        })
        .await
        .unwrap();
        assert_eq!(list.len(), 40);
    }

    #[tokio::test]
    async fn test_refresh_clears_and_restarts() {
        let list = PagedList::new();
        list.load_more(|_page| async move { TestResult::Ok(vec![1, 2, 3]) })
            .await
            .unwrap();
        assert!(!list.more_to_load());

        let outcome = list
            .refresh(|page| async move {
                assert_eq!(page, 0);
                TestResult::Ok(vec![7])
            })
            .await
            .unwrap();
        assert_eq!(outcome, FetchOutcome::Loaded(1));
        assert_eq!(list.items(), vec![7]);
    }

    #[tokio::test]
    async fn test_refresh_during_inflight_fetch_is_dropped() {
        let list = PagedList::new();
        let (release, gate) = tokio::sync::oneshot::channel::<()>();

        let mut inflight = task::spawn(list.load_more(|page| async move {
            gate.await.ok();
            TestResult::Ok(full_page(page))
        }));
        assert_pending!(inflight.poll());
        assert!(list.is_fetching());

        // A refresh issued while the page fetch is in flight is ignored.
        let outcome = list.refresh(no_fetch).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Skipped);

        // So is a second load_more.
        let outcome = list.load_more(no_fetch).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Skipped);

        release.send(()).unwrap();
        let outcome = assert_ready!(inflight.poll()).unwrap();
        assert_eq!(outcome, FetchOutcome::Loaded(PAGE_SIZE));
        assert!(!list.is_fetching());
        assert_eq!(list.len(), PAGE_SIZE);
    }
}
