//! Article card widget.
//!
//! `card_lines` is the pure renderer: one article record in, styled card
//! lines out. Display fallbacks live here — a card never fails to render,
//! whatever the upstream record was missing.

use crate::api::Article;
use crate::app::App;
use crate::theme::ColorPalette;
use crate::util::{strip_control_chars, truncate_to_width};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::SPINNER_FRAMES;

/// Terminal rows per card: source/title, description, image, byline, gap.
pub const CARD_ROWS: usize = 5;

/// Shown in the image slot when a record carries no image URL.
const PLACEHOLDER_IMAGE: &str =
    "https://png.pngtree.com/png-vector/20210601/ourmid/pngtree-latest-breaking-news-png-image_3369122.jpg";

const NO_TITLE: &str = "No Title";
const NO_DESCRIPTION: &str = "No Description";
const UNKNOWN_AUTHOR: &str = "unknown author";
const UNKNOWN_SOURCE: &str = "unknown source";
const UNKNOWN_DATE: &str = "unknown date";

/// Render one article as styled card lines, `CARD_ROWS` tall.
///
/// Text fields are sanitized (API text can carry control characters) and
/// truncated to `width` columns. Title and description get an ellipsis
/// suffix when present and a placeholder when absent; the source name
/// falls back to "unknown source" rather than assuming the nested source
/// object exists.
pub fn card_lines(
    article: &Article,
    width: usize,
    theme: &ColorPalette,
    selected: bool,
) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(CARD_ROWS);

    // Source badge + title
    let source = article
        .source_name
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(UNKNOWN_SOURCE);
    let badge = format!("[{}]", strip_control_chars(source));
    let badge_width = crate::util::display_width(&badge);
    let title_width = width.saturating_sub(badge_width + 1);

    let title_style = if selected {
        theme.card_title_selected
    } else {
        theme.card_title
    };
    let title_span = match article.title.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(title) => {
            let text = format!("{}...", strip_control_chars(title));
            Span::styled(
                truncate_to_width(&text, title_width).into_owned(),
                title_style,
            )
        }
        None => Span::styled(NO_TITLE.to_string(), theme.card_placeholder),
    };
    lines.push(Line::from(vec![
        Span::styled(badge, theme.card_source_badge),
        Span::raw(" "),
        title_span,
    ]));

    // Description
    let description_span = match article
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
    {
        Some(description) => {
            let text = format!("{}...", strip_control_chars(description));
            Span::styled(
                truncate_to_width(&text, width).into_owned(),
                theme.card_description,
            )
        }
        None => Span::styled(NO_DESCRIPTION.to_string(), theme.card_placeholder),
    };
    lines.push(Line::from(description_span));

    // Image slot (a terminal cell cannot show the picture itself)
    let image_url = article.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE);
    let image_text = format!("Image: {}", strip_control_chars(image_url));
    lines.push(Line::from(Span::styled(
        truncate_to_width(&image_text, width).into_owned(),
        theme.card_image,
    )));

    // Byline
    let author = article
        .author
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or(UNKNOWN_AUTHOR);
    let byline = format!(
        "By {} on {}",
        strip_control_chars(author),
        gmt_string(article.published_at.as_deref())
    );
    lines.push(Line::from(Span::styled(
        truncate_to_width(&byline, width).into_owned(),
        theme.card_meta,
    )));

    lines.push(Line::default());
    lines
}

/// Format a publish timestamp as a locale-independent GMT string.
///
/// Unparsable timestamps are shown raw rather than dropped.
fn gmt_string(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return UNKNOWN_DATE.to_string();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt
            .with_timezone(&Utc)
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string(),
        Err(_) => strip_control_chars(raw).into_owned(),
    }
}

/// Render the card list area.
///
/// Updates `app.cards_per_screen` so the input handlers' scroll math
/// matches the viewport the user actually sees.
pub(super) fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    app.cards_per_screen = (area.height as usize / CARD_ROWS).max(1);

    let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];

    if app.feed.initial_loading {
        let text = format!("{} Loading articles...", spinner);
        let paragraph = Paragraph::new(text)
            .style(app.theme.spinner)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, centered_line(area));
        return;
    }

    if app.feed.articles.is_empty() {
        let (text, style) = match &app.feed.last_error {
            Some(err) => (
                format!("Fetch failed: {}\n\nPress r to retry.", err),
                app.theme.error,
            ),
            None => (
                "No articles found for this category.".to_string(),
                app.theme.card_placeholder,
            ),
        };
        let paragraph = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, centered_line(area));
        return;
    }

    let width = area.width as usize;
    let len = app.feed.articles.len();
    let first = app.scroll_offset.min(len.saturating_sub(1));
    let last = (first + app.cards_per_screen).min(len);

    let mut lines: Vec<Line> = Vec::with_capacity((last - first) * CARD_ROWS + 1);
    for (i, article) in app.feed.articles[first..last].iter().enumerate() {
        lines.extend(card_lines(
            article,
            width,
            &app.theme,
            first + i == app.selected,
        ));
    }

    // Bottom-of-list spinner while the next page is on its way
    if app.feed.loading_more && last == len {
        lines.push(Line::from(Span::styled(
            format!("{} Loading more articles...", spinner),
            app.theme.spinner,
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// One-line rect vertically centered in `area`, for loading/empty notices.
fn centered_line(area: Rect) -> Rect {
    let y = area.y + area.height / 2;
    Rect::new(area.x, y, area.width, 1.min(area.height))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeVariant;

    fn bare_article() -> Article {
        Article {
            title: None,
            description: None,
            image_url: None,
            url: "https://example.com/story".to_string(),
            author: None,
            published_at: None,
            source_name: None,
        }
    }

    fn flatten(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| {
                l.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn record_missing_source_renders_fallback_badge() {
        let theme = ThemeVariant::Dark.palette();
        let lines = card_lines(&bare_article(), 80, &theme, false);
        let text = flatten(&lines);
        assert!(text.contains("[unknown source]"));
    }

    #[test]
    fn all_fallbacks_apply_on_a_bare_record() {
        let theme = ThemeVariant::Dark.palette();
        let text = flatten(&card_lines(&bare_article(), 200, &theme, false));
        assert!(text.contains("No Title"));
        assert!(text.contains("No Description"));
        assert!(text.contains("unknown author"));
        assert!(text.contains("unknown date"));
        assert!(text.contains(PLACEHOLDER_IMAGE));
    }

    #[test]
    fn present_title_gets_ellipsis_suffix() {
        let theme = ThemeVariant::Dark.palette();
        let article = Article {
            title: Some("Markets rally".to_string()),
            source_name: Some("The Wire".to_string()),
            ..bare_article()
        };
        let text = flatten(&card_lines(&article, 200, &theme, false));
        assert!(text.contains("Markets rally..."));
        assert!(text.contains("[The Wire]"));
    }

    #[test]
    fn card_is_exactly_card_rows_tall() {
        let theme = ThemeVariant::Dark.palette();
        assert_eq!(card_lines(&bare_article(), 80, &theme, true).len(), CARD_ROWS);
    }

    #[test]
    fn control_chars_are_stripped_from_api_text() {
        let theme = ThemeVariant::Dark.palette();
        let article = Article {
            title: Some("bad\x1b[31mtitle".to_string()),
            ..bare_article()
        };
        let text = flatten(&card_lines(&article, 200, &theme, false));
        assert!(text.contains("badtitle..."));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn gmt_formatting() {
        assert_eq!(
            gmt_string(Some("2024-10-01T12:30:45Z")),
            "Tue, 01 Oct 2024 12:30:45 GMT"
        );
        // Offset timestamps are converted, not normalized away upstream
        assert_eq!(
            gmt_string(Some("2024-10-01T18:00:00+05:30")),
            "Tue, 01 Oct 2024 12:30:00 GMT"
        );
        assert_eq!(gmt_string(Some("yesterday-ish")), "yesterday-ish");
        assert_eq!(gmt_string(None), "unknown date");
    }
}
