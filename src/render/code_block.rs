//! Boxed, width-wrapped rendering of fenced and indented code blocks.
//!
//! A block is drawn as
//!
//! ```text
//!   ┌──────────┐
//!   │ let x =  │
//!   │ a_very_↵ │
//!   │ long     │
//!   └──────────┘
//! ```
//!
//! Interior rows are `columns - 7` cells wide. A line that does not fit is cut
//! into `columns - 8` cell segments, each followed by a continuation glyph,
//! and the final piece is padded like any other row.
//!
//! Every character survives a cut: the next segment starts exactly where the
//! previous one ended. (Older renderers of this box skipped the character at
//! each cut.) Control characters occupy no cells, both when deciding whether a
//! line fits and when padding it.

use unicode_width::UnicodeWidthChar;

const CONTINUATION: char = '↵';
const TAB: &str = "    ";

/// Render `literal` as a boxed code block for a terminal `columns` wide.
pub fn render(literal: &str, columns: u16) -> String {
    let columns = usize::from(columns);
    let border = columns.saturating_sub(5).max(1);
    let interior = columns.saturating_sub(7).max(1);
    let segment = columns.saturating_sub(8).max(1);

    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("  ┌{}┐\n", "─".repeat(border)));

    let lines: Vec<&str> = literal.split('\n').collect();
    for (i, line) in lines.iter().enumerate() {
        if i == lines.len() - 1 && line.trim_matches(' ').is_empty() {
            break;
        }

        let line = line.replace('\t', TAB);
        let mut rest = line.as_str();
        loop {
            if display_width(rest) <= interior {
                out.push_str(&format!("  │ {} │\n", pad(rest, interior)));
                break;
            }
            let (head, tail) = split_at_width(rest, segment);
            out.push_str(&format!("  │ {}{CONTINUATION} │\n", pad(head, segment)));
            rest = tail;
        }
    }

    out.push_str(&format!("  └{}┘\n", "─".repeat(border)));
    out
}

/// Split so the head is at most `width` cells, but never empty.
fn split_at_width(text: &str, width: usize) -> (&str, &str) {
    let mut used = 0;
    for (index, ch) in text.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            if index == 0 {
                let next = ch.len_utf8();
                return (&text[..next], &text[next..]);
            }
            return (&text[..index], &text[index..]);
        }
        used += ch_width;
    }
    (text, "")
}

/// Cells a terminal advances for `text`. Same per-character measure as
/// [`split_at_width`].
fn display_width(text: &str) -> usize {
    text.chars().map(|ch| ch.width().unwrap_or(0)).sum()
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{text}{}", " ".repeat(fill))
}
