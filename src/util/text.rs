use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
///
/// Accounts for CJK characters and emoji (2 columns) and zero-width
/// characters (combining marks), unlike `str::len` or `chars().count()`.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncates a string to fit within `max_width` terminal columns, appending
/// "..." when text was cut off.
///
/// Returns `Cow::Borrowed` when the string already fits (no allocation).
/// Widths of 3 columns or fewer are too narrow for "char + ellipsis", so the
/// result is simply as many characters as fit, without the ellipsis.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    // Narrow columns: return whatever fits, no ellipsis.
    if max_width <= ELLIPSIS_WIDTH {
        return Cow::Owned(take_width(s, max_width).to_string());
    }

    let cut = take_width(s, max_width - ELLIPSIS_WIDTH);
    Cow::Owned(format!("{}{}", cut, ELLIPSIS))
}

/// Longest prefix of `s` whose display width is at most `width`.
fn take_width(s: &str, width: usize) -> &str {
    let mut used = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }
    &s[..end]
}

/// Strips terminal control characters and ANSI escape sequences.
///
/// Article titles, descriptions, and source names come from a third-party
/// API; a crafted record could otherwise inject escape sequences into the
/// terminal. Tab, newline, and carriage return are preserved.
///
/// Returns `Cow::Borrowed` when the input is already clean (common case).
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    fn is_forbidden(b: u8) -> bool {
        b == 0x1b || b == 0x7f || (b < 0x20 && b != 0x09 && b != 0x0a && b != 0x0d)
    }

    if !s.bytes().any(is_forbidden) {
        return Cow::Borrowed(s);
    }

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            0x1b => {
                i += 1;
                match bytes.get(i) {
                    // CSI: parameter bytes until a final byte in 0x40..=0x7e
                    Some(b'[') => {
                        i += 1;
                        while let Some(&c) = bytes.get(i) {
                            i += 1;
                            if (0x40..=0x7e).contains(&c) {
                                break;
                            }
                        }
                    }
                    // OSC: everything until BEL or ST
                    Some(b']') => {
                        i += 1;
                        while let Some(&c) = bytes.get(i) {
                            if c == 0x07 {
                                i += 1;
                                break;
                            }
                            if c == 0x1b && bytes.get(i + 1) == Some(&b'\\') {
                                i += 2;
                                break;
                            }
                            i += 1;
                        }
                    }
                    // Bare ESC: already skipped
                    _ => {}
                }
            }
            b if is_forbidden(b) => i += 1,
            _ => {
                // Run of safe bytes. Control bytes are ASCII, so they never
                // appear mid-codepoint and the slice stays valid UTF-8.
                let start = i;
                while i < bytes.len() && !is_forbidden(bytes[i]) {
                    i += 1;
                }
                out.push_str(&s[start..i]);
            }
        }
    }

    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn width_counts_terminal_columns() {
        assert_eq!(display_width("headline"), 8);
        assert_eq!(display_width("日本語"), 6);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn short_strings_are_borrowed() {
        let result = truncate_to_width("Short", 10);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "Short");
    }

    #[test]
    fn long_strings_get_ellipsis() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
    }

    #[test]
    fn wide_chars_truncate_on_column_boundary() {
        // Each char is 2 columns; 7 columns leaves 4 for text after "..."
        assert_eq!(truncate_to_width("你好世界", 7), "你好...");
    }

    #[test]
    fn narrow_widths_skip_ellipsis() {
        assert_eq!(truncate_to_width("Test!", 0), "");
        assert_eq!(truncate_to_width("Test!", 1), "T");
        assert_eq!(truncate_to_width("Test!", 3), "Tes");
    }

    #[test]
    fn exact_fit_is_not_truncated() {
        assert_eq!(truncate_to_width("12345", 5), "12345");
    }

    #[test]
    fn strips_csi_sequences() {
        assert_eq!(strip_control_chars("a\x1b[31mred\x1b[0mb"), "aredb");
    }

    #[test]
    fn strips_osc_sequences() {
        assert_eq!(strip_control_chars("x\x1b]0;title\x07y"), "xy");
        assert_eq!(strip_control_chars("x\x1b]8;;url\x1b\\y"), "xy");
    }

    #[test]
    fn preserves_whitespace_controls() {
        assert_eq!(strip_control_chars("a\tb\nc"), "a\tb\nc");
    }

    #[test]
    fn clean_input_is_borrowed() {
        let result = strip_control_chars("plain headline");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn truncated_osc_at_end_of_input() {
        assert_eq!(strip_control_chars("a\x1b]0;never-terminated"), "a");
        assert_eq!(strip_control_chars("a\x1b"), "a");
    }

    proptest! {
        #[test]
        fn truncation_never_exceeds_width(s in "\\PC*", width in 0usize..80) {
            let out = truncate_to_width(&s, width);
            prop_assert!(display_width(&out) <= width);
        }

        #[test]
        fn stripping_removes_all_control_bytes(s in ".*") {
            let out = strip_control_chars(&s);
            prop_assert!(!out.bytes().any(|b| b == 0x1b || b == 0x7f));
        }
    }
}
