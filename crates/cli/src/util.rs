use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a column may grow in terminal tables before values are cut.
pub(crate) const MAX_COLUMN_WIDTH: usize = 32;

/// Display width of a string, accounting for CJK double-width, emoji, etc.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` to at most `width` display columns, ending in ".." when cut.
pub(crate) fn truncate_display(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width < 3 {
        return s
            .chars()
            .next()
            .filter(|ch| ch.width().unwrap_or(0) <= width)
            .map(|ch| ch.to_string())
            .unwrap_or_default();
    }

    let budget = width - 2;
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let cw = ch.width().unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        out.push(ch);
    }
    out.push_str("..");
    out
}

/// Pad or truncate a string to exactly `width` display columns.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let cut = truncate_display(s, width);
    let pad = width.saturating_sub(display_width(&cut));
    format!("{}{}", cut, " ".repeat(pad))
}

/// Render rows under a header line, columns sized to their widest value
/// (capped at `MAX_COLUMN_WIDTH`). Newlines inside values are flattened.
pub(crate) fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let flatten = |s: &str| s.replace(['\r', '\n'], " ");
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|value| display_width(&flatten(value)))
                .chain(std::iter::once(display_width(header)))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let render = |values: Vec<String>| -> String {
        let line = values
            .iter()
            .zip(&widths)
            .map(|(value, &width)| pad_right(value, width))
            .collect::<Vec<_>>()
            .join("  ");
        line.trim_end().to_string()
    };

    let mut out = render(headers.iter().map(|h| h.to_string()).collect());
    out.push('\n');
    for row in rows {
        out.push_str(&render(row.iter().map(|v| flatten(v)).collect()));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_cjk() {
        // CJK characters are 2 display columns each
        assert_eq!(display_width("\u{4e16}\u{754c}"), 4); // "世界"
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncate_cuts() {
        assert_eq!(truncate_display("abc", 3), "abc");
        assert_eq!(truncate_display("abcdef", 5), "abc..");
        assert_eq!(truncate_display("abc", 2), "a");
        assert_eq!(truncate_display("", 0), "");
    }

    #[test]
    fn truncate_cjk_boundary() {
        let t = truncate_display("\u{4e16}\u{754c}\u{4f60}\u{597d}", 5);
        assert_eq!(t, "\u{4e16}..");
        assert!(display_width(&t) <= 5);
    }

    #[test]
    fn pad_right_sizes() {
        assert_eq!(pad_right("ab", 5), "ab   ");
        assert_eq!(pad_right("abcdef", 5), "abc..");
    }

    #[test]
    fn table_aligns_columns() {
        let rows = vec![
            vec!["1".to_string(), "Alice".to_string()],
            vec!["12".to_string(), "line\nbreak".to_string()],
        ];
        let out = format_table(&["ID", "Name"], &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID  Name");
        assert_eq!(lines[1], "1   Alice");
        assert_eq!(lines[2], "12  line break");
    }
}
