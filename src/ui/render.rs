//! Render functions for the TUI.
//!
//! Layout, top to bottom: progress bar, category tabs, page header, card
//! list, status bar. The help overlay draws on top when active.

use crate::app::{App, Category, SITE_NAME};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    symbols,
    text::Line,
    widgets::{Block, Borders, Clear, LineGauge, Paragraph, Tabs},
    Frame,
};

use super::{cards, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // progress bar
            Constraint::Length(1), // category tabs
            Constraint::Length(1), // page header
            Constraint::Min(0),    // article cards
            Constraint::Length(1), // status bar
        ])
        .split(area);

    render_progress(f, app, chunks[0]);
    render_tabs(f, app, chunks[1]);
    render_header(f, app, chunks[2]);
    cards::render(f, app, chunks[3]);
    status::render(f, app, chunks[4]);

    if app.show_help {
        render_help_overlay(f, app);
    }
}

/// Top loading bar. The line is always reserved so the layout does not
/// jump; the gauge itself only draws while a fetch is running out or the
/// completion frame is still visible.
fn render_progress(f: &mut Frame, app: &App, area: Rect) {
    if !app.progress.is_visible() {
        return;
    }
    let gauge = LineGauge::default()
        .ratio(app.progress.ratio())
        .label("")
        .line_set(symbols::line::THICK)
        .filled_style(app.theme.progress_filled)
        .unfilled_style(app.theme.progress_unfilled);
    f.render_widget(gauge, area);
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Category::ALL
        .iter()
        .map(|c| Line::from(c.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.feed.category.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active);
    f.render_widget(tabs, area);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = format!(
        "{} - Top {} Headlines",
        SITE_NAME,
        app.feed.category.title()
    );
    let paragraph = Paragraph::new(header)
        .style(app.theme.header)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Render the help overlay centered on screen.
fn render_help_overlay(f: &mut Frame, app: &App) {
    let area = f.area();

    let text = "\
  1-7        jump to category
  Tab / l    next category
  S-Tab / h  previous category
  j / Down   select next card
  k / Up     select previous card
  Ctrl+d/u   page down / up
  g / G      first / last card
  o / Enter  open article in browser
  r          retry failed fetch / refresh
  t          cycle theme
  ?          toggle this help
  q / Esc    quit

Scrolling past the last card loads the next page.";

    let width = 52u16.min(area.width.saturating_sub(4));
    let height = 18u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height);

    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.theme.panel_border)
            .title(" Help "),
    );
    f.render_widget(paragraph, overlay);
}
