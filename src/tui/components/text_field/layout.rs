//! Visual line layout for the TextField.
//!
//! The buffer is hard-wrapped by display width, so every visual line is a
//! contiguous byte range of the buffer. That makes cursor ↔ screen mapping
//! exact, including for wide characters and trailing spaces.

use std::ops::Range;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Split `text` into visual lines of at most `width` columns.
///
/// Always returns at least one (possibly empty) line. A zero width is
/// treated as one column so the layout never degenerates.
pub(super) fn visual_lines(text: &str, width: u16) -> Vec<Range<usize>> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    let mut offset = 0;

    for logical in text.split('\n') {
        let mut start = offset;
        let mut used = 0;
        for (i, c) in logical.char_indices() {
            let w = c.width().unwrap_or(0);
            if used + w > width && used > 0 {
                lines.push(start..offset + i);
                start = offset + i;
                used = 0;
            }
            used += w;
        }
        lines.push(start..offset + logical.len());
        offset += logical.len() + 1;
    }

    lines
}

/// Visual (row, column) of byte offset `pos`.
///
/// At a soft wrap boundary the cursor belongs to the following line.
pub(super) fn locate(text: &str, lines: &[Range<usize>], pos: usize) -> (usize, u16) {
    let row = lines.iter().rposition(|l| l.start <= pos).unwrap_or(0);
    let start = lines.get(row).map_or(0, |l| l.start);
    let col = text[start..pos].width();
    (row, u16::try_from(col).unwrap_or(u16::MAX))
}

/// Byte offset on `line` closest to display column `col` (never past the line end).
pub(super) fn offset_at(text: &str, line: &Range<usize>, col: u16) -> usize {
    let mut used = 0usize;
    for (i, c) in text[line.clone()].char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > usize::from(col) {
            return line.start + i;
        }
        used += w;
    }
    line.end
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map_or(0, |(i, _)| i)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}
