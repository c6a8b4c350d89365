//! Application event handling.
//!
//! Processes completion events from background fetch tasks and folds them
//! into feed state.

use crate::app::{App, AppEvent};

/// Handle an event from a background fetch task.
///
/// The feed performs the generation check; a discarded (stale) event leaves
/// all state untouched, including the progress bar, because the `open` that
/// superseded the fetch has already restarted it.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::PageLoaded {
            category,
            generation,
            page,
            result,
        } => {
            tracing::trace!(category = category.query(), generation, page, "Page event");
            if !app.feed.apply_page(generation, page, result) {
                return;
            }

            // The finally path: the fetch resolved, whatever the outcome.
            app.progress.complete();

            if let Some(err) = app.feed.last_error.clone() {
                app.set_status(format!("Fetch failed: {}", err));
            } else if app.feed.articles.is_empty() {
                app.set_status("No articles found for this category.");
            }
        }
    }
}
