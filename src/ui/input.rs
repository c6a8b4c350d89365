//! Input handling for the TUI.
//!
//! This is the navigation shell: it maps keys to category selection, card
//! scrolling, and article opening. Every scroll movement re-evaluates the
//! feed's pagination gate, and every category switch applies the window
//! title side effect that the feed controller itself stays free of.

use crate::app::{App, AppEvent, Category};
use crate::util::validate_outbound_url;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::Action;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    // Help overlay captures all keys while visible
    if app.show_help {
        if matches!(
            code,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter
        ) {
            app.show_help = false;
        }
        return Ok(Action::Continue);
    }

    // Ctrl combinations first; KeyModifiers is a bitflags type, so it is
    // tested with contains() rather than matched structurally.
    if modifiers.contains(KeyModifiers::CONTROL) {
        match code {
            KeyCode::Char('c') => return Ok(Action::Quit),
            KeyCode::Char('d') => {
                app.nav_down(app.cards_per_screen.max(1));
                app.poke_pagination(event_tx);
            }
            KeyCode::Char('u') => {
                app.nav_up(app.cards_per_screen.max(1));
            }
            _ => {}
        }
        return Ok(Action::Continue);
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(Action::Quit),

        KeyCode::Char('?') => app.show_help = true,

        // Category selection: direct jump or cycling
        KeyCode::Char(c @ '1'..='7') => {
            let index = c as usize - '1' as usize;
            if let Some(category) = Category::from_index(index) {
                switch_category(app, category, event_tx);
            }
        }
        KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => {
            let next = app.feed.category.next();
            switch_category(app, next, event_tx);
        }
        KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => {
            let prev = app.feed.category.prev();
            switch_category(app, prev, event_tx);
        }

        // Card scrolling; downward movement can open the pagination gate
        KeyCode::PageDown => {
            app.nav_down(app.cards_per_screen.max(1));
            app.poke_pagination(event_tx);
        }
        KeyCode::PageUp => {
            app.nav_up(app.cards_per_screen.max(1));
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.nav_down(1);
            app.poke_pagination(event_tx);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.nav_up(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.nav_top(),
        KeyCode::Char('G') | KeyCode::End => {
            app.nav_bottom();
            app.poke_pagination(event_tx);
        }

        KeyCode::Char('r') => app.retry_or_refresh(event_tx),

        KeyCode::Char('t') => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }

        KeyCode::Char('o') | KeyCode::Enter => open_selected(app),

        _ => {}
    }

    Ok(Action::Continue)
}

/// Select a category and apply the shell-owned window title effect.
fn switch_category(app: &mut App, category: Category, event_tx: &mpsc::Sender<AppEvent>) {
    app.select_category(category, event_tx);
    super::set_window_title(category);
}

/// Open the selected article's URL in the system browser.
fn open_selected(app: &mut App) {
    let Some(article_url) = app.selected_article().map(|a| a.url.clone()) else {
        app.set_status("No article selected");
        return;
    };

    match validate_outbound_url(&article_url) {
        Ok(url) => {
            tracing::info!(url = %url, "Opening article in browser");
            if let Err(e) = open::that_detached(url.as_str()) {
                app.set_status(format!("Failed to open browser: {}", e));
            } else {
                app.set_status("Opened in browser");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Refusing to open article URL");
            app.set_status(format!("Refusing to open: {}", e));
        }
    }
}
