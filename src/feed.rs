//! Per-category paginated feed controller.
//!
//! A [`CategoryFeed`] owns the article list for the currently selected
//! category: it accumulates pages from the search API, gates so at most one
//! fetch is in flight, and advances pagination when the viewport reaches the
//! bottom of the list. Selecting a category (including re-selecting the
//! current one) resets the feed entirely; there is no cross-category cache.
//!
//! Responses are matched against a generation counter. `open` bumps the
//! generation and aborts the in-flight task, so a response that outlives the
//! reset that superseded it is discarded instead of mutating fresh state.

use crate::api::{Article, ArticlePage, FetchError, NewsClient};
use crate::app::{AppEvent, Category, ProgressBar};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Paginated article state for one category.
///
/// Lifecycle per category selection: `open` resets everything and fetches
/// page 1 (`initial_loading`); each reaching-bottom scroll with room left
/// fetches the next page (`loading_more`); `apply_page` folds results in.
pub struct CategoryFeed {
    pub category: Category,
    /// Accumulated articles, append-only until the next `open`.
    pub articles: Vec<Article>,
    /// Current 1-based page; the last page requested, not the next one.
    pub page: u32,
    /// Upstream's total result count; pagination stops once the list
    /// reaches it. Zero until the first page arrives.
    pub total_available: u64,
    /// True while the first fetch after `open` is outstanding.
    pub initial_loading: bool,
    /// True while a pagination fetch is outstanding.
    pub loading_more: bool,
    /// Most recent fetch failure, shown in the status line until the next
    /// successful fetch or retry.
    pub last_error: Option<String>,

    generation: u64,
    fetch_handle: Option<JoinHandle<()>>,
}

impl CategoryFeed {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            articles: Vec::new(),
            page: 1,
            total_available: 0,
            initial_loading: false,
            loading_more: false,
            last_error: None,
            generation: 0,
            fetch_handle: None,
        }
    }

    /// Whether a fetch is logically in flight.
    pub fn in_flight(&self) -> bool {
        self.initial_loading || self.loading_more
    }

    /// Whether every available article has been accumulated.
    pub fn exhausted(&self) -> bool {
        self.articles.len() as u64 >= self.total_available
    }

    /// Open the feed for `category`: abort any in-flight fetch, reset all
    /// state, and fetch page 1.
    ///
    /// This is the only operation that truncates `articles`.
    pub fn open(
        &mut self,
        category: Category,
        client: &NewsClient,
        event_tx: &mpsc::Sender<AppEvent>,
        progress: &mut ProgressBar,
    ) {
        self.close();
        self.generation = self.generation.wrapping_add(1);
        self.category = category;
        self.articles.clear();
        self.page = 1;
        self.total_available = 0;
        self.last_error = None;
        self.initial_loading = true;
        self.loading_more = false;
        self.spawn_fetch(1, client, event_tx, progress);
    }

    /// Pagination gate: bottom reached, nothing in flight, and the upstream
    /// reports more articles than we hold.
    fn should_load_more(&self, at_bottom: bool) -> bool {
        at_bottom && !self.in_flight() && (self.articles.len() as u64) < self.total_available
    }

    /// React to a scroll movement: fetch the next page when the gate opens.
    ///
    /// Invoked after every scroll event. Returns true if a fetch was
    /// started; repeated calls while one is in flight start nothing.
    pub fn maybe_load_more(
        &mut self,
        at_bottom: bool,
        client: &NewsClient,
        event_tx: &mpsc::Sender<AppEvent>,
        progress: &mut ProgressBar,
    ) -> bool {
        if !self.should_load_more(at_bottom) {
            return false;
        }
        self.page += 1;
        self.loading_more = true;
        self.spawn_fetch(self.page, client, event_tx, progress);
        true
    }

    /// Re-fetch the page recorded by the last failure.
    ///
    /// Returns false when there is nothing to retry or a fetch is already
    /// in flight.
    pub fn retry(
        &mut self,
        client: &NewsClient,
        event_tx: &mpsc::Sender<AppEvent>,
        progress: &mut ProgressBar,
    ) -> bool {
        if self.in_flight() || self.last_error.is_none() {
            return false;
        }
        self.last_error = None;
        if self.articles.is_empty() {
            self.initial_loading = true;
        } else {
            self.loading_more = true;
        }
        self.spawn_fetch(self.page, client, event_tx, progress);
        true
    }

    /// The single fetch trigger: every page request flows through here.
    ///
    /// Signals the progress bar, then spawns a task that always delivers a
    /// `PageLoaded` event, success or failure alike.
    fn spawn_fetch(
        &mut self,
        page: u32,
        client: &NewsClient,
        event_tx: &mpsc::Sender<AppEvent>,
        progress: &mut ProgressBar,
    ) {
        // Gating means no task should be live here; the abort is a guard
        // against state drift, not a code path.
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
        }

        progress.start();

        let generation = self.generation;
        let category = self.category;
        let client = client.clone();
        let tx = event_tx.clone();

        tracing::debug!(
            category = category.query(),
            page,
            generation,
            "Spawning article fetch"
        );

        self.fetch_handle = Some(tokio::spawn(async move {
            let result = client.search(category.query(), page).await;
            let event = AppEvent::PageLoaded {
                category,
                generation,
                page,
                result,
            };
            if tx.send(event).await.is_err() {
                tracing::warn!("Failed to deliver fetched page (receiver dropped)");
            }
        }));
    }

    /// Fold a fetch result into the feed.
    ///
    /// A stale generation means the fetch was superseded by an `open`; the
    /// event is discarded and the method returns false. Otherwise the
    /// loading flags are cleared unconditionally — the `finally` path — and
    /// on success the page is appended, on failure prior articles are kept
    /// and the error is recorded.
    pub fn apply_page(
        &mut self,
        generation: u64,
        page: u32,
        result: Result<ArticlePage, FetchError>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "Discarding page response from a superseded fetch"
            );
            return false;
        }

        match result {
            Ok(page_data) => {
                tracing::info!(
                    category = self.category.query(),
                    page,
                    received = page_data.articles.len(),
                    total = page_data.total_results,
                    "Applied article page"
                );
                self.total_available = page_data.total_results;
                self.articles.extend(page_data.articles);
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!(
                    category = self.category.query(),
                    page,
                    error = %e,
                    "Article fetch failed, keeping prior pages"
                );
                self.last_error = Some(e.to_string());
            }
        }

        self.initial_loading = false;
        self.loading_more = false;
        self.fetch_handle = None;
        true
    }

    /// Abort the in-flight fetch, if any. Runs on every exit path:
    /// category change (via `open`) and application shutdown.
    pub fn close(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
        }
    }
}

impl Drop for CategoryFeed {
    fn drop(&mut self) {
        self.close();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn article(url: &str) -> Article {
        Article {
            title: Some("Title".to_string()),
            description: None,
            image_url: None,
            url: url.to_string(),
            author: None,
            published_at: None,
            source_name: None,
        }
    }

    fn page_of(count: usize, total: u64) -> ArticlePage {
        ArticlePage {
            articles: (0..count)
                .map(|i| article(&format!("https://example.com/{}", i)))
                .collect(),
            total_results: total,
        }
    }

    fn ready_feed(articles: usize, total: u64) -> CategoryFeed {
        let mut feed = CategoryFeed::new(Category::General);
        feed.apply_page(0, 1, Ok(page_of(articles, total)));
        feed
    }

    #[test]
    fn success_appends_and_clears_flags() {
        let mut feed = CategoryFeed::new(Category::Science);
        feed.initial_loading = true;

        assert!(feed.apply_page(0, 1, Ok(page_of(6, 40))));
        assert_eq!(feed.articles.len(), 6);
        assert_eq!(feed.total_available, 40);
        assert!(!feed.initial_loading);
        assert!(!feed.loading_more);
        assert!(feed.last_error.is_none());
    }

    #[test]
    fn failure_keeps_prior_articles_and_clears_flags() {
        let mut feed = ready_feed(6, 12);
        feed.loading_more = true;
        feed.page = 2;

        assert!(feed.apply_page(0, 2, Err(FetchError::HttpStatus(502))));
        assert_eq!(feed.articles.len(), 6, "page-1 articles must survive");
        assert!(!feed.loading_more);
        assert!(feed.last_error.is_some());
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut feed = ready_feed(6, 12);
        let before = feed.articles.len();

        // Generation 7 was never issued by this feed
        assert!(!feed.apply_page(7, 2, Ok(page_of(6, 12))));
        assert_eq!(feed.articles.len(), before);
    }

    #[test]
    fn gate_requires_bottom_idle_and_room() {
        let feed = ready_feed(6, 12);
        assert!(feed.should_load_more(true));
        assert!(!feed.should_load_more(false), "not at bottom");

        let mut busy = ready_feed(6, 12);
        busy.loading_more = true;
        assert!(!busy.should_load_more(true), "fetch in flight");

        let full = ready_feed(12, 12);
        assert!(full.exhausted());
        assert!(!full.should_load_more(true), "no room left");
    }

    #[test]
    fn gate_stays_closed_before_first_page() {
        // total_available is still 0, so 0 < 0 fails and a scroll on an
        // empty feed cannot start a second initial fetch.
        let feed = CategoryFeed::new(Category::Sports);
        assert!(!feed.should_load_more(true));
    }

    #[test]
    fn gate_stays_closed_after_failed_first_page() {
        let mut feed = CategoryFeed::new(Category::Sports);
        feed.initial_loading = true;
        feed.apply_page(0, 1, Err(FetchError::Timeout));
        assert!(!feed.should_load_more(true), "retry is the only way back");
    }

    #[test]
    fn overfull_page_marks_exhausted() {
        // Upstream contract says this cannot happen; the gate must still
        // not underflow or keep paginating.
        let feed = ready_feed(15, 12);
        assert!(feed.exhausted());
        assert!(!feed.should_load_more(true));
    }
}
