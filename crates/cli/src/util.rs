use unicode_width::UnicodeWidthStr;

/// Display width of a string, accounting for double-width glyphs and emoji.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` to at most `width` display columns and append "...", cut or not.
/// Post texts are previewed this way in the error listing.
pub(crate) fn preview(s: &str, width: usize) -> String {
    // Newlines inside a post would break the listing
    let flat: String = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if display_width(&flat) <= width {
        return format!("{flat}...");
    }

    let mut used = 0;
    let mut end_byte = 0;
    for (i, ch) in flat.char_indices() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > width {
            break;
        }
        used += cw;
        end_byte = i + ch.len_utf8();
    }

    format!("{}...", &flat[..end_byte])
}

/// Right-pad to exactly `width` display columns (no truncation).
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let sw = display_width(s);
    if sw >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - sw))
    }
}
