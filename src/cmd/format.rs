/*!
format.rs

Human output primitives for the `loom` CLI: colors, emoji markers, a boxed
header and a simple column table. Everything returns `String`; nothing here
prints. JSON output paths do not use these helpers.

Environment:
  NO_COLOR   disable ANSI colors
  NO_EMOJI   disable emoji markers
  COLUMNS    terminal width hint (clamped 40..=220, default 100)
*/

use std::borrow::Cow;

/* -------------------------------------------------------------------------- */
/* Style Options                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
    pub term_width: usize,
}

impl StyleOptions {
    pub fn detect() -> Self {
        let term_width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);

        StyleOptions {
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_emoji: std::env::var_os("NO_EMOJI").is_none(),
            ..StyleOptions::plain(term_width)
        }
    }

    /// No color, no emoji, fixed width. Stable output for tests and pipes.
    pub fn plain(term_width: usize) -> Self {
        StyleOptions {
            use_color: false,
            use_emoji: false,
            term_width,
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Color / Emoji                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Primary,
    Secondary,
    Accent,
    Success,
    Warning,
    Error,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Primary => "38;5;45",
        Role::Secondary => "38;5;250",
        Role::Accent => "38;5;213",
        Role::Success => "38;5;82",
        Role::Warning => "38;5;214",
        Role::Error => "38;5;196",
        Role::Dim => "2",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match tag {
        "success" => "✔",
        "error" => "✖",
        "warn" => "⚠",
        "info" => "ℹ",
        "model" => "🧵",
        _ => "",
    }
}

/* -------------------------------------------------------------------------- */
/* Box Header                                                                 */
/* -------------------------------------------------------------------------- */

/// Single-line title (plus optional subtitle) inside a light box.
/// Content wider than the terminal is truncated with an ellipsis.
pub fn box_header(
    title: impl AsRef<str>,
    subtitle: Option<impl AsRef<str>>,
    style: &StyleOptions,
) -> String {
    let max_inner = style.term_width.saturating_sub(4).max(10);
    let title: &str = title.as_ref();
    let sub: Option<&str> = subtitle.as_ref().map(|s| s.as_ref());

    let plain = match sub {
        Some(sub) => format!("{title}  {sub}"),
        None => title.to_string(),
    };
    let inner = if display_width(&plain) > max_inner {
        color(Role::Primary, truncate_ellipsis(&strip_ansi(&plain), max_inner), style)
    } else {
        match sub {
            Some(sub) => format!(
                "{}  {}",
                color(Role::Primary, title, style),
                color(Role::Secondary, sub, style)
            ),
            None => color(Role::Primary, title, style),
        }
    };

    let width = display_width(&inner);
    let bar = "─".repeat(width + 2);
    format!("┌{bar}┐\n│ {inner} │\n└{bar}┘")
}

/* -------------------------------------------------------------------------- */
/* Table Rendering                                                             */
/* -------------------------------------------------------------------------- */

/// Left-aligned columns separated by two spaces, with a dashed header rule.
/// The widest columns shrink (down to four chars) when the row overflows
/// `style.term_width`.
pub fn table(headers: &[&str], rows: &[Vec<String>], style: &StyleOptions) -> String {
    const MIN_COL: usize = 4;

    if headers.is_empty() {
        return String::new();
    }
    let cols = headers.len();

    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let total: usize = widths.iter().sum::<usize>() + (cols - 1) * 2;
    if total > style.term_width {
        let mut overflow = total - style.term_width;
        let mut order: Vec<usize> = (0..cols).collect();
        order.sort_by(|a, b| widths[*b].cmp(&widths[*a]));
        for idx in order {
            if overflow == 0 {
                break;
            }
            let spare = widths[idx].saturating_sub(MIN_COL);
            let cut = spare.min(overflow);
            widths[idx] -= cut;
            overflow -= cut;
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(color(
        Role::Accent,
        render_row(headers.iter().copied(), &widths),
        style,
    ));
    lines.push(color(
        Role::Dim,
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
        style,
    ));
    for row in rows {
        let cells = (0..cols).map(|c| row.get(c).map(String::as_str).unwrap_or(""));
        lines.push(render_row(cells, &widths));
    }
    lines.join("\n")
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, w)| fit(cell, *w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn fit(s: &str, width: usize) -> String {
    let len = display_width(s);
    if len > width {
        return truncate_ellipsis(&strip_ansi(s), width);
    }
    format!("{s}{}", " ".repeat(width - len))
}

/* -------------------------------------------------------------------------- */
/* Text Helpers                                                                */
/* -------------------------------------------------------------------------- */

pub fn truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Drop `ESC [ ... <letter>` sequences.
fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for t in chars.by_ref() {
                if t.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    Cow::Owned(out)
}

fn display_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                       */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_header_plain() {
        let style = StyleOptions::plain(80);
        let b = box_header("loom", Some("3 tokens"), &style);
        let bar = "─".repeat(16);
        assert_eq!(b, format!("┌{bar}┐\n│ loom  3 tokens │\n└{bar}┘"));
    }

    #[test]
    fn box_header_truncates_to_terminal() {
        let style = StyleOptions::plain(40);
        let b = box_header("x".repeat(100), None::<&str>, &style);
        let middle = b.lines().nth(1).unwrap();
        assert!(middle.contains('…'));
        assert!(display_width(middle) <= 40);
    }

    #[test]
    fn table_aligns_columns() {
        let style = StyleOptions::plain(80);
        let t = table(
            &["NAME", "TYPE"],
            &[
                vec!["title".into(), "string".into()],
                vec!["id".into(), "integer".into()],
            ],
            &style,
        );
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines[0], "NAME   TYPE");
        assert_eq!(lines[1], "-----  -------");
        assert_eq!(lines[2], "title  string");
        assert_eq!(lines[3], "id     integer");
    }

    #[test]
    fn table_shrinks_wide_column() {
        let style = StyleOptions::plain(40);
        let t = table(&["K", "V"], &[vec!["k".into(), "v".repeat(80)]], &style);
        for line in t.lines() {
            assert!(display_width(line) <= 40, "line too wide: {line}");
        }
        assert!(t.contains('…'));
    }

    #[test]
    fn truncate() {
        assert_eq!(truncate_ellipsis("abcdef", 4), "abc…");
        assert_eq!(truncate_ellipsis("abc", 4), "abc");
    }

    #[test]
    fn strip_ansi_sequences() {
        assert_eq!(strip_ansi("\x1b[38;5;45mRED\x1b[0m"), "RED");
        assert_eq!(display_width("\x1b[2mab\x1b[0m"), 2);
    }

    #[test]
    fn color_respects_style() {
        let plain = StyleOptions::plain(80);
        assert_eq!(color(Role::Error, "x", &plain), "x");
        let colored = StyleOptions {
            use_color: true,
            ..plain
        };
        assert_eq!(color(Role::Dim, "x", &colored), "\x1b[2mx\x1b[0m");
    }
}
