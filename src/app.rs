use crate::api::{ArticlePage, FetchError, NewsClient};
use crate::feed::CategoryFeed;
use crate::theme::{ColorPalette, ThemeVariant};
use std::borrow::Cow;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Name shown in the terminal window title and the page header.
pub const SITE_NAME: &str = "The Daily Bulletin";

/// How long a status message stays visible before expiring.
const STATUS_TTL: Duration = Duration::from_secs(5);

// ============================================================================
// Categories
// ============================================================================

/// The fixed set of browsable news categories.
///
/// These double as the free-text query sent to the search API. The home
/// view is `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    General,
    Science,
    Sports,
    Business,
    Entertainment,
    Technology,
    Health,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Science,
        Category::Sports,
        Category::Business,
        Category::Entertainment,
        Category::Technology,
        Category::Health,
    ];

    /// Lowercase form, used as the API query string.
    pub fn query(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::Technology => "technology",
            Category::Health => "health",
        }
    }

    /// Capitalized form for headers and the window title.
    pub fn title(self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Science => "Science",
            Category::Sports => "Sports",
            Category::Business => "Business",
            Category::Entertainment => "Entertainment",
            Category::Technology => "Technology",
            Category::Health => "Health",
        }
    }

    /// Terminal window title for this category.
    pub fn window_title(self) -> String {
        format!("{} - {}", self.title(), SITE_NAME)
    }

    /// Position within [`Category::ALL`] (drives the tab bar highlight).
    pub fn index(self) -> usize {
        Category::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    /// Category for a 0-based tab index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Category::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Category::ALL[(self.index() + 1) % Category::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let len = Category::ALL.len();
        Category::ALL[(self.index() + len - 1) % len]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.query().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = Category::ALL.iter().map(|c| c.query()).collect();
                format!("unknown category '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

// ============================================================================
// Progress Bar
// ============================================================================

/// Top-of-screen progress indicator, bracketing every fetch.
///
/// `start` begins an indeterminate animation: each tick creeps the value
/// toward 90 without ever arriving, mirroring a browser-style loading bar.
/// `complete` snaps to 100; the tick after that resets to 0 so the full bar
/// is visible for one frame.
#[derive(Debug)]
pub struct ProgressBar {
    percent: f64,
    running: bool,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBar {
    /// Fraction of the remaining distance to 90 covered per tick.
    const CREEP_FACTOR: f64 = 0.12;

    pub fn new() -> Self {
        Self {
            percent: 0.0,
            running: false,
        }
    }

    /// Begin the indeterminate animation. Called at the start of every fetch.
    pub fn start(&mut self) {
        self.running = true;
        if self.percent <= 0.0 || self.percent >= 100.0 {
            self.percent = 8.0;
        }
    }

    /// Snap to 100%. Called when a fetch resolves, success or failure alike.
    pub fn complete(&mut self) {
        self.running = false;
        self.percent = 100.0;
    }

    /// Advance the animation one frame. Returns true if the visible value
    /// changed (the caller schedules a redraw on true).
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.percent += (90.0 - self.percent) * Self::CREEP_FACTOR;
            true
        } else if self.percent >= 100.0 {
            self.percent = 0.0;
            true
        } else {
            false
        }
    }

    /// Current fill ratio in 0.0..=1.0 for the gauge widget.
    pub fn ratio(&self) -> f64 {
        (self.percent / 100.0).clamp(0.0, 1.0)
    }

    /// Whether the bar should be drawn at all.
    pub fn is_visible(&self) -> bool {
        self.percent > 0.0
    }
}

// ============================================================================
// Events
// ============================================================================

/// Events delivered from background fetch tasks to the event loop.
pub enum AppEvent {
    /// A page fetch resolved, successfully or not.
    ///
    /// `generation` is the feed generation at spawn time; the feed discards
    /// the event if it has since been reset (category change, shutdown).
    PageLoaded {
        category: Category,
        generation: u64,
        page: u32,
        result: Result<ArticlePage, FetchError>,
    },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
pub struct App {
    pub client: NewsClient,
    pub feed: CategoryFeed,
    pub progress: ProgressBar,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: ColorPalette,

    // Card list position
    /// Index of the selected article card.
    pub selected: usize,
    /// Index of the first visible card.
    pub scroll_offset: usize,
    /// Cards that fit in the list viewport; updated during rendering so the
    /// scroll math in input handlers matches what is on screen.
    pub cards_per_screen: usize,

    /// Status message with expiry. Cow avoids allocation for static hints.
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders.
    pub needs_redraw: bool,

    /// Current frame of the loading spinner animation.
    pub spinner_frame: usize,

    /// Whether the help overlay is currently displayed.
    pub show_help: bool,
}

impl App {
    pub fn new(client: NewsClient, start_category: Category, theme_variant: ThemeVariant) -> Self {
        Self {
            client,
            feed: CategoryFeed::new(start_category),
            progress: ProgressBar::new(),
            theme_variant,
            theme: theme_variant.palette(),
            selected: 0,
            scroll_offset: 0,
            cards_per_screen: 0,
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
            show_help: false,
        }
    }

    /// Switch to a different theme variant at runtime.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = variant.palette();
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant (Dark → Light → Dark).
    ///
    /// Returns the name of the new theme for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    /// Select a category: the feed is fully reset and page 1 is fetched.
    ///
    /// Switching to the already-selected category is a refresh; the reset
    /// semantics are identical. The caller (the navigation shell) is
    /// responsible for the window-title side effect.
    pub fn select_category(&mut self, category: Category, event_tx: &mpsc::Sender<AppEvent>) {
        self.feed
            .open(category, &self.client, event_tx, &mut self.progress);
        self.selected = 0;
        self.scroll_offset = 0;
        self.needs_redraw = true;
    }

    /// Retry after a failed fetch, or re-open the category when healthy.
    pub fn retry_or_refresh(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        if self.feed.last_error.is_some() {
            if self
                .feed
                .retry(&self.client, event_tx, &mut self.progress)
            {
                self.set_status("Retrying...");
            }
        } else {
            self.select_category(self.feed.category, event_tx);
        }
    }

    /// Whether the viewport bottom has reached the bottom of the card list.
    pub fn at_bottom(&self) -> bool {
        self.scroll_offset + self.cards_per_screen >= self.feed.articles.len()
    }

    /// Re-evaluate pagination after any scroll movement.
    ///
    /// Fires on every scroll event; the feed's own gating ensures at most
    /// one fetch is triggered per reaching-bottom.
    pub fn poke_pagination(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        let at_bottom = self.at_bottom();
        self.feed
            .maybe_load_more(at_bottom, &self.client, event_tx, &mut self.progress);
    }

    pub fn selected_article(&self) -> Option<&crate::api::Article> {
        self.feed.articles.get(self.selected)
    }

    pub fn nav_down(&mut self, step: usize) {
        let len = self.feed.articles.len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + step).min(len - 1);
        self.ensure_selected_visible();
    }

    pub fn nav_up(&mut self, step: usize) {
        self.selected = self.selected.saturating_sub(step);
        self.ensure_selected_visible();
    }

    pub fn nav_top(&mut self) {
        self.selected = 0;
        self.ensure_selected_visible();
    }

    pub fn nav_bottom(&mut self) {
        let len = self.feed.articles.len();
        if len == 0 {
            return;
        }
        self.selected = len - 1;
        self.ensure_selected_visible();
    }

    fn ensure_selected_visible(&mut self) {
        let visible = self.cards_per_screen.max(1);
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible {
            self.scroll_offset = self.selected + 1 - visible;
        }
    }

    /// Show a transient status message.
    pub fn set_status(&mut self, message: impl Into<Cow<'static, str>>) {
        self.status_message = Some((message.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear the status message once its TTL has elapsed.
    ///
    /// Returns true if a message was cleared (caller schedules a redraw).
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, shown_at)) = &self.status_message {
            if shown_at.elapsed() >= STATUS_TTL {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_cycle_is_closed() {
        let mut c = Category::General;
        for _ in 0..Category::ALL.len() {
            c = c.next();
        }
        assert_eq!(c, Category::General);
        assert_eq!(Category::General.prev(), Category::Health);
    }

    #[test]
    fn category_from_index_matches_all() {
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(Category::from_index(i), Some(*c));
        }
        assert_eq!(Category::from_index(7), None);
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Sports".parse::<Category>().unwrap(), Category::Sports);
        assert_eq!(" health ".parse::<Category>().unwrap(), Category::Health);
        assert!("weather".parse::<Category>().is_err());
    }

    #[test]
    fn window_title_capitalizes_category() {
        assert_eq!(
            Category::Technology.window_title(),
            "Technology - The Daily Bulletin"
        );
    }

    #[test]
    fn progress_starts_low_and_creeps_toward_90() {
        let mut bar = ProgressBar::new();
        assert!(!bar.is_visible());

        bar.start();
        assert!(bar.is_visible());
        let before = bar.ratio();

        for _ in 0..200 {
            bar.tick();
        }
        assert!(bar.ratio() > before);
        assert!(bar.ratio() < 0.91, "indeterminate bar must not reach 100%");
    }

    #[test]
    fn progress_completes_then_resets_on_next_tick() {
        let mut bar = ProgressBar::new();
        bar.start();
        bar.tick();
        bar.complete();
        assert_eq!(bar.ratio(), 1.0);

        // One tick later the bar is gone
        assert!(bar.tick());
        assert!(!bar.is_visible());
        assert!(!bar.tick());
    }

    #[test]
    fn progress_restart_after_complete_begins_fresh() {
        let mut bar = ProgressBar::new();
        bar.start();
        bar.complete();
        bar.start();
        assert!(bar.ratio() < 0.5, "restart should not keep the full bar");
    }
}
