use crate::app::App;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Cow avoids allocations for the static hint line
    let text: Cow<'_, str> = if let Some(err) = &app.feed.last_error {
        Cow::Owned(format!("Fetch failed: {} | press r to retry", err))
    } else if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.feed.loading_more {
        Cow::Borrowed("Loading more articles...")
    } else {
        Cow::Borrowed(
            "[1-7]category [Tab]switch [j/k]scroll [o]pen [r]efresh [t]heme [?]help [q]uit",
        )
    };

    let paragraph = Paragraph::new(text).style(app.theme.status_bar);
    f.render_widget(paragraph, area);
}
